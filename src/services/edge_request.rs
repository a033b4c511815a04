//! Request shape exchanged with the edge runtime.
//!
//! Headers, query parameters and cookies are maps of name -> `{ "value": ... }`,
//! header names lower-cased, matching what the edge runtime hands to viewer-request
//! functions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeValue {
    pub value: String,
    /// Every occurrence of a repeated name, in arrival order.
    #[serde(
        rename = "multiValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub multi_value: Option<Vec<EdgeValue>>,
}

impl EdgeValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            multi_value: None,
        }
    }

    /// Apply `f` to the value and to every repeated occurrence.
    pub fn map_values(&mut self, f: impl Fn(&str) -> String) {
        self.value = f(&self.value);
        for entry in self.multi_value.iter_mut().flatten() {
            entry.value = f(&entry.value);
        }
    }
}

pub type EdgeMap = BTreeMap<String, EdgeValue>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRequest {
    pub method: String,
    pub uri: String,
    #[serde(default)]
    pub headers: EdgeMap,
    #[serde(default)]
    pub querystring: EdgeMap,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub cookies: EdgeMap,
}

impl EdgeRequest {
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            headers: EdgeMap::new(),
            querystring: EdgeMap::new(),
            cookies: EdgeMap::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), EdgeValue::new(value));
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_query(name, value);
        self
    }

    /// Header lookup; names compare case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.value.as_str())
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.querystring.get(name).map(|v| v.value.as_str())
    }

    /// Insert or overwrite a query parameter, dropping any repeated occurrences.
    pub fn set_query(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.querystring.insert(name.into(), EdgeValue::new(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_edge_runtime_shape() {
        let raw = json!({
            "method": "GET",
            "uri": "/documents/report.pdf",
            "headers": {
                "authorization": { "value": "Bearer abc" },
                "host": { "value": "cdn.example.com" }
            },
            "querystring": {
                "download": { "value": "1", "multiValue": [{ "value": "1" }] }
            }
        });

        let request: EdgeRequest = serde_json::from_value(raw).unwrap();

        assert_eq!(request.method, "GET");
        assert_eq!(request.header("Authorization"), Some("Bearer abc"));
        assert_eq!(request.query("download"), Some("1"));
        assert!(request.cookies.is_empty());
    }

    #[test]
    fn repeated_values_survive_reserialization() {
        let raw = json!({
            "method": "GET",
            "uri": "/a",
            "headers": {
                "accept-language": {
                    "value": "en",
                    "multiValue": [{ "value": "en" }, { "value": "fr" }]
                }
            },
            "querystring": {
                "tag": { "value": "1", "multiValue": [{ "value": "1" }, { "value": "2" }] }
            },
            "cookies": {
                "session": { "value": "abc" }
            }
        });

        let request: EdgeRequest = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(serde_json::to_value(&request).unwrap(), raw);
    }

    #[test]
    fn single_values_serialize_without_multi_value() {
        let request = EdgeRequest::new("GET", "/a").with_query("tag", "1");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["querystring"]["tag"], json!({ "value": "1" }));
    }

    #[test]
    fn map_values_touches_every_occurrence() {
        let mut value: EdgeValue = serde_json::from_value(json!({
            "value": "a.txt",
            "multiValue": [{ "value": "a.txt" }, { "value": "b.txt" }]
        }))
        .unwrap();

        value.map_values(|v| format!("acme/{v}"));

        assert_eq!(value.value, "acme/a.txt");
        let repeated: Vec<_> = value
            .multi_value
            .unwrap()
            .into_iter()
            .map(|v| v.value)
            .collect();
        assert_eq!(repeated, ["acme/a.txt", "acme/b.txt"]);
    }

    #[test]
    fn missing_maps_default_to_empty() {
        let request: EdgeRequest =
            serde_json::from_value(json!({ "method": "OPTIONS", "uri": "/" })).unwrap();

        assert!(request.headers.is_empty());
        assert!(request.querystring.is_empty());
    }

    #[test]
    fn set_query_overwrites_existing_value() {
        let mut request = EdgeRequest::new("GET", "/list").with_query("orgId", "evil");
        request.querystring.get_mut("orgId").unwrap().multi_value =
            Some(vec![EdgeValue::new("evil"), EdgeValue::new("other")]);

        request.set_query("orgId", "acme");

        assert_eq!(request.query("orgId"), Some("acme"));
        assert_eq!(request.querystring["orgId"].multi_value, None);
        assert_eq!(request.querystring.len(), 1);
    }
}
