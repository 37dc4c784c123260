//! Request/response normalization: snake_case ⇄ camelCase key conversion,
//! `{param}`-style path templating, and the recursive JSON response rewrite
//! (camelCase keys, nulls flattened to empty strings).
//!
//! Everything here is pure data transformation — no network I/O.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::Error;

/// Multi-valued query parameters for a single API call.
///
/// Built fresh per call and consumed by [`normalize_request`]; never share one
/// map across concurrent requests.
pub type QueryParams = BTreeMap<String, Vec<String>>;

/// Convert a snake_case string to camelCase.
///
/// An underscore is dropped and marks the following character for upper-casing;
/// every other character is emitted lower-cased. The output never contains an
/// underscore.
pub fn snake_to_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize = false;
    for c in s.chars() {
        if c == '_' {
            capitalize = true;
        } else if capitalize {
            out.extend(c.to_uppercase());
            capitalize = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Convert a camelCase string to snake_case.
///
/// Every upper-case character except the first is preceded by an underscore
/// and emitted lower-cased. A run of capitals is split letter by letter, so
/// `"APY"` becomes `"a_p_y"` — callers depend on this exact behavior.
pub fn camel_to_snake(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Resolve a `{name}` path template and prepare the query parameters.
///
/// Each `{identifier}` placeholder (`[A-Za-z0-9_]+`) is replaced by the
/// percent-encoded first value of the matching key, and that key is removed
/// from the map (extra values are discarded). A placeholder with no matching
/// non-empty key is left literally in the path. The remaining keys are
/// snake_cased and every value percent-encoded, ready to be serialized as a
/// query string.
///
/// Consumes the map and returns a fresh one, so the caller's data is never
/// mutated behind its back.
pub fn normalize_request(path: &str, params: QueryParams) -> (String, QueryParams) {
    let mut params = params;
    let resolved = substitute_placeholders(path, &mut params);

    let mut remaining = QueryParams::new();
    for (key, values) in params {
        let values = values
            .into_iter()
            .map(|v| urlencoding::encode(&v).into_owned())
            .collect();
        remaining.insert(camel_to_snake(&key), values);
    }

    (resolved, remaining)
}

fn substitute_placeholders(path: &str, params: &mut QueryParams) -> String {
    let mut out = String::with_capacity(path.len());
    let mut rest = path;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match tail[1..].find('}') {
            Some(end) if is_identifier(&tail[1..end + 1]) => {
                let name = &tail[1..end + 1];
                match params.get(name).and_then(|v| v.first()).cloned() {
                    Some(value) => {
                        out.push_str(&urlencoding::encode(&value));
                        params.remove(name);
                    }
                    // No matching parameter: the placeholder stays verbatim.
                    None => out.push_str(&tail[..end + 2]),
                }
                rest = &tail[end + 2..];
            }
            _ => {
                // Unterminated brace or non-identifier content, copy it through.
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Serialize prepared query parameters into a query string.
///
/// Values are expected to already be percent-encoded by [`normalize_request`];
/// multi-value order per key is preserved.
pub fn encode_query(params: &QueryParams) -> String {
    let mut pairs = Vec::new();
    for (key, values) in params {
        for value in values {
            pairs.push(format!("{}={}", key, value));
        }
    }
    pairs.join("&")
}

/// Recursively rebuild a JSON tree with all object keys converted to
/// camelCase. Arrays keep their order and length.
pub fn camel_case_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (snake_to_camel(&k), camel_case_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(camel_case_keys).collect()),
        other => other,
    }
}

/// Recursively replace every JSON null with an empty string, at any depth.
pub fn denullify(value: Value) -> Value {
    match value {
        Value::Null => Value::String(String::new()),
        Value::Object(map) => {
            Value::Object(map.into_iter().map(|(k, v)| (k, denullify(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(denullify).collect()),
        other => other,
    }
}

/// Normalize a raw JSON response body: camelCase all keys and flatten nulls
/// to empty strings, then re-encode.
///
/// Not idempotent in general — a second pass changes keys that still contain
/// underscores after the first.
pub fn normalize_response(raw: &[u8]) -> Result<Vec<u8>, Error> {
    let data: Value = serde_json::from_slice(raw).map_err(Error::Decode)?;
    let data = denullify(camel_case_keys(data));
    serde_json::to_vec(&data).map_err(Error::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(entries: &[(&str, &[&str])]) -> QueryParams {
        entries
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect()
    }

    #[test]
    fn snake_to_camel_basic() {
        assert_eq!(snake_to_camel("foo_bar"), "fooBar");
        assert_eq!(snake_to_camel("foo_bar_baz"), "fooBarBaz");
        assert_eq!(snake_to_camel(""), "");
        assert_eq!(snake_to_camel("already"), "already");
    }

    #[test]
    fn snake_to_camel_never_emits_underscores() {
        for s in ["_", "__", "_leading", "trailing_", "a__b", "MIXED_Case"] {
            assert!(!snake_to_camel(s).contains('_'), "input {:?}", s);
        }
    }

    #[test]
    fn camel_to_snake_basic() {
        assert_eq!(camel_to_snake("fooBar"), "foo_bar");
        assert_eq!(camel_to_snake("fooBarBaz"), "foo_bar_baz");
        assert_eq!(camel_to_snake("foo"), "foo");
        assert_eq!(camel_to_snake(""), "");
    }

    #[test]
    fn camel_to_snake_splits_capital_runs() {
        // Exact documented behavior: every capital gets its own underscore.
        assert_eq!(camel_to_snake("APY"), "a_p_y");
        assert_eq!(camel_to_snake("poolAPY"), "pool_a_p_y");
    }

    #[test]
    fn round_trip_fixed_points() {
        // Single-underscore-separated lowercase groups survive a round trip.
        for s in ["foo", "foo_bar", "a_b_c", "x1_y2"] {
            assert_eq!(camel_to_snake(&snake_to_camel(s)), s);
        }
        // Consecutive or leading/trailing underscores do not.
        for s in ["foo__bar", "_foo", "foo_"] {
            assert_ne!(camel_to_snake(&snake_to_camel(s)), s);
        }
    }

    #[test]
    fn request_substitutes_path_params_and_drops_them_from_query() {
        let (path, rest) =
            normalize_request("/v1/{foo}", params(&[("foo", &["bar"]), ("baz", &["qux"])]));
        assert_eq!(path, "/v1/bar");
        assert_eq!(rest, params(&[("baz", &["qux"])]));
    }

    #[test]
    fn request_leaves_missing_placeholder_verbatim() {
        let (path, rest) = normalize_request("/v1/{foo}", params(&[("baz", &["qux"])]));
        assert_eq!(path, "/v1/{foo}");
        assert_eq!(rest, params(&[("baz", &["qux"])]));
    }

    #[test]
    fn request_percent_encodes_path_values() {
        let (path, rest) = normalize_request("/v1/{foo}", params(&[("foo", &["bar/A+B=C"])]));
        assert_eq!(path, "/v1/bar%2FA%2BB%3DC");
        assert!(rest.is_empty());
    }

    #[test]
    fn request_percent_encodes_query_values() {
        let (path, rest) = normalize_request(
            "/v1/{foo}",
            params(&[("foo", &["bar"]), ("baz", &["qux/A+B=C"])]),
        );
        assert_eq!(path, "/v1/bar");
        assert_eq!(rest, params(&[("baz", &["qux%2FA%2BB%3DC"])]));
    }

    #[test]
    fn request_decamelizes_query_keys() {
        let (path, rest) = normalize_request(
            "/v1/{foo}",
            params(&[("foo", &["0x123"]), ("barBaz", &["qux"])]),
        );
        assert_eq!(path, "/v1/0x123");
        assert_eq!(rest, params(&[("bar_baz", &["qux"])]));
    }

    #[test]
    fn request_uses_first_value_and_discards_the_rest() {
        let (path, rest) =
            normalize_request("/v1/{foo}", params(&[("foo", &["first", "second"])]));
        assert_eq!(path, "/v1/first");
        assert!(rest.is_empty());
    }

    #[test]
    fn encode_query_preserves_multi_value_order() {
        let q = encode_query(&params(&[("a", &["1", "2"]), ("b", &["3"])]));
        assert_eq!(q, "a=1&a=2&b=3");
    }

    #[test]
    fn response_camel_cases_keys_and_flattens_nulls() {
        let raw = br#"{"foo_bar": "baz", "child": {"foo_bar": null}}"#;
        let out = normalize_response(raw).unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value, json!({"fooBar": "baz", "child": {"fooBar": ""}}));
    }

    #[test]
    fn response_recurses_into_arrays() {
        let raw = br#"[{"a_b": null}, {"a_b": 1}, null]"#;
        let out = normalize_response(raw).unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value, json!([{"aB": ""}, {"aB": 1}, ""]));
    }

    #[test]
    fn response_rejects_invalid_json() {
        assert!(matches!(
            normalize_response(b"not json"),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn normalization_is_not_idempotent() {
        // A second pass sees "fooBar" with no underscore before the capital
        // and lowercases it away.
        assert_eq!(snake_to_camel(&snake_to_camel("foo_bar")), "foobar");
        let once = normalize_response(br#"{"foo_bar": 1}"#).unwrap();
        let twice = normalize_response(&once).unwrap();
        let v: Value = serde_json::from_slice(&twice).unwrap();
        assert_eq!(v, json!({"foobar": 1}));
    }
}
