//! Query string encoding

use url::Url;

/// Percent-encode and join `pairs` into a query string.
///
/// Everything except RFC 3986 unreserved characters is escaped. Pairs whose
/// value is `None` are skipped entirely, never emitted as `key=`.
pub fn encode<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .into_iter()
        .filter_map(|(key, value)| {
            value.map(|value| {
                format!(
                    "{}={}",
                    urlencoding::encode(key.as_ref()),
                    urlencoding::encode(value.as_ref())
                )
            })
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Append encoded `pairs` to `url`, keeping any query it already has.
pub fn append<I, K, V>(url: &mut Url, pairs: I)
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let encoded = encode(pairs);
    if encoded.is_empty() {
        return;
    }

    let combined = match url.query() {
        Some(existing) if !existing.is_empty() => format!("{existing}&{encoded}"),
        _ => encoded,
    };
    url.set_query(Some(&combined));
}
