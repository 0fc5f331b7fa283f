use serde::{Deserialize, Serialize};

/// Configuration from kiosk.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KioskConfig {
    #[serde(default)]
    pub assets: AssetConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Prefix prepended to every item image name.
    #[serde(default = "default_image_prefix")]
    pub image_prefix: String,
    /// Path substituted for items without an image.
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        AssetConfig {
            image_prefix: default_image_prefix(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Maximum number of description words kept before truncation.
    #[serde(default = "default_word_limit")]
    pub description_word_limit: usize,
    /// Rows younger than this many days are flagged as new.
    #[serde(default = "default_new_window_days")]
    pub new_window_days: i64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        DirectoryConfig {
            description_word_limit: default_word_limit(),
            new_window_days: default_new_window_days(),
        }
    }
}

fn default_image_prefix() -> String {
    "images/content/".to_string()
}

fn default_placeholder_image() -> String {
    "images/placeholder.png".to_string()
}

fn default_word_limit() -> usize {
    20
}

fn default_new_window_days() -> i64 {
    30
}
