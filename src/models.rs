use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An article as returned by the AgenceEco API.
///
/// The server-side schema is loose: no field is guaranteed present, key names
/// drift between API revisions (`id`/`_id`/`articleId`, `title`/`titre`, …)
/// and value types are unreliable. Any absent or unexpectedly-typed field
/// degrades to `None` instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Article {
    #[serde(alias = "_id", alias = "articleId", deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(alias = "titre", deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(alias = "excerpt", deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(alias = "body", deserialize_with = "lenient_string")]
    pub content: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub publication_date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub published_at: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(alias = "cover", alias = "thumbnail", deserialize_with = "lenient_string")]
    pub image: Option<String>,
    #[serde(alias = "gallery", alias = "photos", deserialize_with = "lenient_string_list")]
    pub images: Option<Vec<String>>,
}

impl Article {
    /// Lenient conversion from an already-decoded JSON value. Only rejects
    /// values that are not objects; field-level surprises degrade to `None`.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if !value.is_object() {
            return Err(serde_json::Error::custom("article is not a JSON object"));
        }
        serde_json::from_value(value)
    }
}

/// Ids arrive as strings or numbers depending on the backend; both are
/// normalized to a non-empty string.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => {
            let s = s.trim().to_string();
            (!s.is_empty()).then_some(s)
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Keeps non-blank strings only; any other JSON type becomes `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => (!s.trim().is_empty()).then_some(s),
        _ => None,
    })
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(None);
    };
    let urls = items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        })
        .collect::<Vec<_>>();
    Ok((!urls.is_empty()).then_some(urls))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_accepts_string_number_and_alternate_keys() {
        let a: Article = serde_json::from_value(json!({ "id": "42" })).unwrap();
        assert_eq!(a.id.as_deref(), Some("42"));

        let a: Article = serde_json::from_value(json!({ "id": 42 })).unwrap();
        assert_eq!(a.id.as_deref(), Some("42"));

        let a: Article = serde_json::from_value(json!({ "_id": "abc" })).unwrap();
        assert_eq!(a.id.as_deref(), Some("abc"));

        let a: Article = serde_json::from_value(json!({ "articleId": 7 })).unwrap();
        assert_eq!(a.id.as_deref(), Some("7"));

        let a: Article = serde_json::from_value(json!({ "id": { "oid": 1 } })).unwrap();
        assert_eq!(a.id, None);
    }

    #[test]
    fn missing_fields_default_to_none() {
        let a: Article = serde_json::from_value(json!({})).unwrap();
        assert_eq!(a, Article::default());
    }

    #[test]
    fn non_string_values_degrade_to_none() {
        let a: Article = serde_json::from_value(json!({
            "title": 12,
            "description": ["x"],
            "content": null,
            "publicationDate": 1715300000,
            "date": false,
        }))
        .unwrap();
        assert_eq!(a.title, None);
        assert_eq!(a.description, None);
        assert_eq!(a.content, None);
        assert_eq!(a.publication_date, None);
        assert_eq!(a.date, None);
    }

    #[test]
    fn alternate_keys_are_accepted() {
        let a: Article = serde_json::from_value(json!({
            "titre": "Édito",
            "excerpt": "Résumé",
            "body": "Texte",
            "cover": "https://cdn.example/une.jpg",
            "gallery": ["https://cdn.example/1.jpg", 3, "https://cdn.example/2.jpg"],
        }))
        .unwrap();
        assert_eq!(a.title.as_deref(), Some("Édito"));
        assert_eq!(a.description.as_deref(), Some("Résumé"));
        assert_eq!(a.content.as_deref(), Some("Texte"));
        assert_eq!(a.image.as_deref(), Some("https://cdn.example/une.jpg"));
        assert_eq!(
            a.images,
            Some(vec![
                "https://cdn.example/1.jpg".to_string(),
                "https://cdn.example/2.jpg".to_string()
            ])
        );
    }

    #[test]
    fn from_value_rejects_non_objects() {
        assert!(Article::from_value(json!(null)).is_err());
        assert!(Article::from_value(json!([1, 2])).is_err());
        assert!(Article::from_value(json!({ "title": "ok" })).is_ok());
    }
}
