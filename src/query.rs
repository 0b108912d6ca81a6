//! Query string assembly.
//!
//! GET requests carry their parameters in the URL, percent-encoded with
//! spaces as `%20`.

use serde_json::Value;

/// Encode key/value pairs as a `k=v&k=v` query string.
pub fn encode_pairs<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut out = String::new();
    for (key, value) in pairs {
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(&urlencoding::encode(key.as_ref()));
        out.push('=');
        out.push_str(&urlencoding::encode(value.as_ref()));
    }
    out
}

/// Append an encoded query string to a path, using `?` or `&` depending on
/// whether the path already carries one.
pub fn append_query<I, K, V>(path: &str, pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let encoded = encode_pairs(pairs);
    if encoded.is_empty() {
        return path.to_string();
    }
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{encoded}")
}

/// Flatten a JSON object into string pairs for the query string. Null values
/// are dropped; everything else is stringified.
pub(crate) fn pairs_from_object(params: &Value) -> Vec<(String, String)> {
    match params {
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), scalar_string(v)))
            .collect(),
        _ => Vec::new(),
    }
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encodes_space_as_percent_twenty() {
        let encoded = encode_pairs([("a", "1"), ("b", "x y")]);
        assert_eq!(encoded, "a=1&b=x%20y");
    }

    #[test]
    fn encodes_reserved_characters() {
        let encoded = encode_pairs([("redirect", "https://lettings.example/next?x=1")]);
        assert_eq!(
            encoded,
            "redirect=https%3A%2F%2Flettings.example%2Fnext%3Fx%3D1"
        );
    }

    #[test]
    fn encodes_unicode() {
        let encoded = encode_pairs([("city", "Tromsø")]);
        assert_eq!(encoded, "city=Troms%C3%B8");
    }

    #[test]
    fn appends_with_question_mark() {
        assert_eq!(append_query("/properties", [("page", "1")]), "/properties?page=1");
    }

    #[test]
    fn appends_with_ampersand_when_query_exists() {
        assert_eq!(
            append_query("/properties?page=2", [("size", "10")]),
            "/properties?page=2&size=10"
        );
    }

    #[test]
    fn empty_pairs_leave_path_untouched() {
        let none: [(&str, &str); 0] = [];
        assert_eq!(append_query("/properties", none), "/properties");
    }

    #[test]
    fn object_pairs_drop_nulls_and_stringify_scalars() {
        let params = json!({
            "status": "listed",
            "page": 2,
            "verified": true,
            "agent": null,
        });
        let pairs = pairs_from_object(&params);
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "2".to_string()),
                ("status".to_string(), "listed".to_string()),
                ("verified".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn non_object_params_produce_no_pairs() {
        assert!(pairs_from_object(&json!([1, 2, 3])).is_empty());
        assert!(pairs_from_object(&json!("plain")).is_empty());
    }
}
