// src/ui/url_query.rs
use url::form_urlencoded;

fn pairs(params: &str) -> Vec<(String, String)> {
    let params = params.strip_prefix('?').unwrap_or(params);
    form_urlencoded::parse(params.as_bytes())
        .into_owned()
        .collect()
}

fn serialize(pairs: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// First value of `key`, if present
pub fn query_value(params: &str, key: &str) -> Option<String> {
    pairs(params)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

/// Set `key` to `value`. The first occurrence is replaced in place and any
/// further occurrences are dropped; other keys keep their order.
pub fn form_url_query(params: &str, key: &str, value: &str) -> String {
    let mut replaced = false;
    let mut out = Vec::new();
    for (k, v) in pairs(params) {
        if k != key {
            out.push((k, v));
        } else if !replaced {
            out.push((k, value.to_string()));
            replaced = true;
        }
    }
    if !replaced {
        out.push((key.to_string(), value.to_string()));
    }
    serialize(&out)
}

/// Drop every occurrence of the given keys
pub fn remove_keys_from_url_query(params: &str, keys: &[&str]) -> String {
    let kept: Vec<_> = pairs(params)
        .into_iter()
        .filter(|(k, _)| !keys.contains(&k.as_str()))
        .collect();
    serialize(&kept)
}

/// Join a path and a query string, omitting the `?` for an empty query
pub fn to_url(pathname: &str, query: &str) -> String {
    if query.is_empty() {
        pathname.to_string()
    } else {
        format!("{pathname}?{query}")
    }
}
