//! Query string dictionary for HTTP request parameters.
//!
//! [`QueryDict`] keeps keys in the order they were submitted. Inline action
//! dispatch scans posted field names, so a stable order keeps error reports
//! and logs reproducible across requests.

use indexmap::IndexMap;
use url::form_urlencoded;

/// An ordered multi-value dictionary for query string and form data.
///
/// # Examples
///
/// ```
/// use django_rs_inline_actions_http::QueryDict;
///
/// let qd = QueryDict::parse("color=red&color=blue&size=large");
/// assert_eq!(qd.get("color"), Some("blue"));
/// assert_eq!(qd.get_list("color"), Some(&["red".to_string(), "blue".to_string()][..]));
/// assert_eq!(qd.keys().collect::<Vec<_>>(), vec!["color", "size"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryDict {
    data: IndexMap<String, Vec<String>>,
}

impl QueryDict {
    /// Creates a new, empty `QueryDict`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a URL-encoded string (`"key1=val1&key2=val2"`).
    ///
    /// Handles percent-encoding, `+` as space, and multiple values per key.
    pub fn parse(query_string: &str) -> Self {
        let mut dict = Self::new();
        for (key, value) in form_urlencoded::parse(query_string.as_bytes()) {
            dict.append(&key, &value);
        }
        dict
    }

    /// Returns the last value for the given key, or `None` if not present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// Returns all values for the given key, or `None` if not present.
    pub fn get_list(&self, key: &str) -> Option<&[String]> {
        self.data.get(key).map(Vec::as_slice)
    }

    /// Replaces all values for the given key with a single value.
    pub fn set(&mut self, key: &str, value: &str) {
        self.data.insert(key.to_string(), vec![value.to_string()]);
    }

    /// Appends a value to the list for the given key.
    pub fn append(&mut self, key: &str, value: &str) {
        self.data
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
    }

    /// Encodes this `QueryDict` as a URL query string, preserving key order.
    pub fn urlencode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.data {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the `QueryDict` contains no keys.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if the specified key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Returns an iterator over the keys in submission order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for QueryDict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (key, value) in iter {
            dict.append(key.as_ref(), value.as_ref());
        }
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let qd = QueryDict::parse("");
        assert!(qd.is_empty());
        assert_eq!(qd.len(), 0);
    }

    #[test]
    fn test_parse_percent_and_plus() {
        let qd = QueryDict::parse("title=Fooo+bar%21&empty=");
        assert_eq!(qd.get("title"), Some("Fooo bar!"));
        assert_eq!(qd.get("empty"), Some(""));
    }

    #[test]
    fn test_key_without_value() {
        let qd = QueryDict::parse("_save&_action__x=");
        assert!(qd.contains_key("_save"));
        assert_eq!(qd.get("_save"), Some(""));
        assert!(qd.contains_key("_action__x"));
    }

    #[test]
    fn test_keys_keep_submission_order() {
        let qd = QueryDict::parse("b=1&a=2&b=3&c=4");
        assert_eq!(qd.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(qd.get("b"), Some("3"));
    }

    #[test]
    fn test_set_replaces_values() {
        let mut qd = QueryDict::parse("a=1&a=2");
        qd.set("a", "3");
        assert_eq!(qd.get_list("a"), Some(&["3".to_string()][..]));
    }

    #[test]
    fn test_urlencode_escapes() {
        let qd: QueryDict = [("q", "a b"), ("o", "-id")].into_iter().collect();
        assert_eq!(qd.urlencode(), "q=a+b&o=-id");
    }

    #[test]
    fn test_get_missing() {
        let qd = QueryDict::new();
        assert!(qd.get("missing").is_none());
        assert!(qd.get_list("missing").is_none());
    }
}
