//! Initial-data bridge between server render and client hydration.
//!
//! Each route loader builds one [`InitialData`] bag per request: a mapping
//! from namespaced string keys (`"product:<slug>"`, `"seo:/"`, ...) to
//! JSON-serializable values. The bag is read server-side for rendering, then
//! embedded into the page as a single `<script>` assigning the JSON to the
//! [`GLOBAL_NAME`] global, where `static/js/storefront.js` picks it up so no
//! second fetch is needed on first paint.
//!
//! The bag is immutable once handed to the template layer; the client side
//! is read-only.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;

/// The well-known global identifier the embed assigns the bag to.
pub const GLOBAL_NAME: &str = "__PADMA_STATE__";

/// A per-request key-value bag of route data.
///
/// Keys are namespaced by the loader that owns them; each loader documents
/// its fixed key set so call sites can type-check against the subset they
/// read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitialData {
    entries: BTreeMap<String, Value>,
}

impl InitialData {
    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value under a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not serialize to JSON.
    pub fn insert<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<(), serde_json::Error> {
        self.entries.insert(key.into(), serde_json::to_value(value)?);
        Ok(())
    }

    /// Insert an explicit null sentinel (soft not-found).
    pub fn insert_null(&mut self, key: impl Into<String>) {
        self.entries.insert(key.into(), Value::Null);
    }

    /// Look up a key and deserialize its value.
    ///
    /// Returns `None` when the key is absent or the value does not
    /// deserialize to `T` (including the null sentinel for non-nullable
    /// targets).
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.entries.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Look up a key the loader guarantees to be present.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` when the key is missing or its value has
    /// an unexpected shape - a loader bug, not user error.
    pub fn require<T: DeserializeOwned>(&self, key: &str) -> Result<T, AppError> {
        self.get(key)
            .ok_or_else(|| AppError::Internal(format!("initial data missing key: {key}")))
    }

    /// Whether a key is present (the null sentinel counts as present).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether a key holds the null sentinel.
    #[must_use]
    pub fn is_null(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Some(Value::Null))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the bag as markup-safe JSON.
    ///
    /// Every `<`, `>`, and `&` is escaped to its `\uXXXX` form so no
    /// substring of the output can close the embedding script region. The
    /// escapes are plain JSON escapes, so parsing the output reproduces the
    /// bag exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(&self.entries)?;
        Ok(json
            .replace('&', "\\u0026")
            .replace('<', "\\u003c")
            .replace('>', "\\u003e"))
    }

    /// Render the one `<script>` embed that hands the bag to the client.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_embed_script(&self, nonce: &str) -> Result<String, serde_json::Error> {
        let json = self.to_json()?;
        Ok(format!(
            r#"<script id="initial-data" nonce="{nonce}">window.{GLOBAL_NAME} = {json};</script>"#
        ))
    }

    /// Parse a bag back from its JSON form (the hydration-side operation).
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: BTreeMap<String, Value> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_and_get_roundtrip() {
        let mut bag = InitialData::new();
        bag.insert("home:bestSellers", &vec!["a", "b"]).unwrap();
        let got: Vec<String> = bag.get("home:bestSellers").unwrap();
        assert_eq!(got, vec!["a", "b"]);
    }

    #[test]
    fn test_get_absent_key() {
        let bag = InitialData::new();
        assert_eq!(bag.get::<Value>("missing"), None);
        assert!(bag.require::<Value>("missing").is_err());
    }

    #[test]
    fn test_null_sentinel() {
        let mut bag = InitialData::new();
        bag.insert_null("product:gone");
        assert!(bag.contains_key("product:gone"));
        assert!(bag.is_null("product:gone"));
        // Typed lookup of the sentinel yields absence, not a panic
        assert_eq!(bag.get::<String>("product:gone"), None);
    }

    #[test]
    fn test_serialized_json_roundtrips_exactly() {
        let mut bag = InitialData::new();
        bag.insert("seo:/", &json!({"title": "Padma Bazar"})).unwrap();
        bag.insert("shop:total", &42).unwrap();

        let json = bag.to_json().unwrap();
        let parsed = InitialData::from_json(&json).unwrap();
        assert_eq!(parsed, bag);
    }

    #[test]
    fn test_script_closing_tag_is_escaped() {
        let mut bag = InitialData::new();
        bag.insert("evil", &"</script><script>alert(1)</script>")
            .unwrap();

        let json = bag.to_json().unwrap();
        assert!(!json.contains('<'));
        assert!(!json.contains('>'));
        assert!(!json.contains("</script>"));

        // Escaping is lossless: the value comes back byte-identical
        let parsed = InitialData::from_json(&json).unwrap();
        assert_eq!(
            parsed.get::<String>("evil").unwrap(),
            "</script><script>alert(1)</script>"
        );
    }

    #[test]
    fn test_ampersand_is_escaped() {
        let mut bag = InitialData::new();
        bag.insert("q", &"a&b").unwrap();
        let json = bag.to_json().unwrap();
        assert!(!json.contains('&'));
        let parsed = InitialData::from_json(&json).unwrap();
        assert_eq!(parsed.get::<String>("q").unwrap(), "a&b");
    }

    #[test]
    fn test_embed_script_wraps_single_region() {
        let mut bag = InitialData::new();
        bag.insert("evil", &"</script>").unwrap();
        let embed = bag.to_embed_script("abc123").unwrap();

        assert!(embed.starts_with("<script id=\"initial-data\" nonce=\"abc123\">"));
        assert!(embed.ends_with("</script>"));
        // Exactly one closing tag: the wrapper's own
        assert_eq!(embed.matches("</script>").count(), 1);
        assert!(embed.contains(&format!("window.{GLOBAL_NAME} =")));
    }
}
