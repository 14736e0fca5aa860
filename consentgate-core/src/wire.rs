//! Serde helpers for backend payload quirks.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Integer(i64),
    Unsigned(u64),
}

/// Identifiers arrive as either JSON strings or integers depending on the table.
pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Integer(n) => n.to_string(),
        StringOrNumber::Unsigned(n) => n.to_string(),
    })
}

pub fn opt_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|value| match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Integer(n) => n.to_string(),
            StringOrNumber::Unsigned(n) => n.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "id_string")]
        id: String,
        #[serde(default, deserialize_with = "opt_id_string")]
        parent: Option<String>,
    }

    #[test]
    fn test_id_accepts_number_and_string() {
        let a: Row = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(a.id, "42");
        assert_eq!(a.parent, None);

        let b: Row = serde_json::from_str(r#"{"id": "MED-1", "parent": 7}"#).unwrap();
        assert_eq!(b.id, "MED-1");
        assert_eq!(b.parent.as_deref(), Some("7"));
    }

    #[test]
    fn test_id_rejects_objects() {
        assert!(serde_json::from_str::<Row>(r#"{"id": {"x": 1}}"#).is_err());
    }
}
