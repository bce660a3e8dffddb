use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// Query string parameters with forgiving lookups.
#[derive(Debug, Default)]
pub struct QueryParams {
    map: HashMap<String, String>,
}

impl<'de> Deserialize<'de> for QueryParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = HashMap::<String, String>::deserialize(deserializer)?;
        Ok(QueryParams { map })
    }
}

impl QueryParams {
    /// Looks up `key`, then its camelCase spelling (`sort_by` also
    /// finds `sortBy`). Empty values count as absent, the same as an
    /// unselected form control.
    pub fn get(&self, key: &str) -> Option<&str> {
        let found = self
            .map
            .get(key)
            .or_else(|| self.map.get(&to_camel_case(key)));

        match found {
            Some(val) if !val.trim().is_empty() => Some(val.as_str()),
            _ => None,
        }
    }
}

fn to_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(value: serde_json::Value) -> QueryParams {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_snake_and_camel_case() {
        let p = params(serde_json::json!({"sortBy": "title.asc", "query": "alien"}));
        assert_eq!(p.get("sort_by"), Some("title.asc"));
        assert_eq!(p.get("query"), Some("alien"));
        assert_eq!(p.get("genre"), None);
    }

    #[test]
    fn test_empty_value_is_absent() {
        let p = params(serde_json::json!({"year": "", "genre": "  "}));
        assert_eq!(p.get("year"), None);
        assert_eq!(p.get("genre"), None);
    }
}
