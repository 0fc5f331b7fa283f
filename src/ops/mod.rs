pub mod build;
pub mod enrich;
pub mod filter;
pub mod flatten;
pub mod menu;
