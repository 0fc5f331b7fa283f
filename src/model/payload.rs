use serde::{Deserialize, Deserializer};

/// Top-level shape of the static directory payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Payload {
    #[serde(default)]
    pub categories: Vec<RawCategory>,
    #[serde(default)]
    pub items: Vec<RawItem>,
}

/// One category node as it appears on the wire, possibly nested.
///
/// Fields are optional here; validation happens during flattening so a
/// single malformed node can be skipped without aborting the whole build.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCategory {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub children: Vec<RawCategory>,
}

/// One raw directory item as it appears on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItem {
    /// Id of the owning category. Matched against `RawCategory::id`.
    #[serde(default, deserialize_with = "string_or_number")]
    pub category: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    /// Comma-separated tag list, e.g. `"Design, Tools"`.
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "truthy")]
    pub featured: bool,
}

/// Ids in existing payloads appear both as strings and as bare numbers;
/// normalize both to a string so the category/item match stays loose.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Id>::deserialize(deserializer)?.map(|id| match id {
        Id::Str(s) => s,
        Id::Int(n) => n.to_string(),
        Id::Float(n) => n.to_string(),
    }))
}

/// Descriptions are occasionally non-string junk; anything that is not a
/// string ends up as an empty description rather than a parse failure.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Maybe {
        Str(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Maybe>::deserialize(deserializer)? {
        Some(Maybe::Str(s)) => Some(s),
        _ => None,
    })
}

/// The `featured` flag appears as `true`/`false` or as `0`/`1`.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Int(n)) => n != 0,
        None => false,
    })
}
