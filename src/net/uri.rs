//! URI creation, form encoding and query parameter editing.
//!
//! Parameter helpers work on plain strings so relative references such as
//! `/search?q=rust#top` are handled as well as absolute URLs. The fragment is
//! kept in place.

use crate::core::{FeilongError, Result};
use crate::lang::validate;
use percent_encoding::percent_decode_str;
use url::form_urlencoded;
use url::Url;

/// Parse an absolute URI
///
/// # Errors
///
/// `UriParse` when `uri` is not a valid absolute URL.
pub fn create(uri: &str) -> Result<Url> {
    validate::not_blank("uri", uri)?;
    Url::parse(uri.trim()).map_err(|e| FeilongError::uri_parse(uri, e.to_string()))
}

/// `application/x-www-form-urlencoded` encoding of UTF-8 text; space becomes `+`
///
/// ```rust
/// use feilong_core::net::uri;
///
/// assert_eq!(uri::encode(" "), "+");
/// assert_eq!(uri::encode("a&b=c"), "a%26b%3Dc");
/// ```
pub fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Reverse of [`encode`]. A `%` not followed by two hex digits is kept as is.
///
/// # Errors
///
/// `InvalidArgument` when the decoded bytes are not UTF-8.
pub fn decode(value: &str) -> Result<String> {
    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| {
            FeilongError::invalid_argument("value", format!("not UTF-8 after decoding: {}", e))
        })
}

struct UriParts<'a> {
    before_query: &'a str,
    query: &'a str,
    fragment: Option<&'a str>,
}

impl<'a> UriParts<'a> {
    fn split(uri: &'a str) -> Self {
        let (rest, fragment) = match uri.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (uri, None),
        };
        let (before_query, query) = rest.split_once('?').unwrap_or((rest, ""));
        Self {
            before_query,
            query,
            fragment,
        }
    }

    fn pairs(&self) -> Vec<(String, String)> {
        form_urlencoded::parse(self.query.as_bytes())
            .into_owned()
            .collect()
    }

    fn join(&self, pairs: &[(String, String)]) -> String {
        let mut out = self.before_query.to_string();
        let query = to_query_string(pairs);
        if !query.is_empty() {
            out.push('?');
            out.push_str(&query);
        }
        if let Some(fragment) = self.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }
}

/// Set `name` to `value`, replacing any existing values of `name`
///
/// ```rust
/// use feilong_core::net::uri;
///
/// let uri = uri::add_parameter("/list?page=1&size=20#top", "page", "2");
/// assert_eq!(uri, "/list?page=2&size=20#top");
/// ```
pub fn add_parameter(uri: &str, name: &str, value: &str) -> String {
    add_parameter_map(uri, &[(name, value)])
}

/// [`add_parameter`] for several parameters; new names are appended in order
pub fn add_parameter_map<K, V>(uri: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let parts = UriParts::split(uri);
    let mut pairs = parts.pairs();

    for (name, value) in params {
        let (name, value) = (name.as_ref(), value.as_ref());
        match pairs.iter().position(|(k, _)| k == name) {
            Some(first) => {
                pairs[first].1 = value.to_string();
                let mut index = 0;
                pairs.retain(|(k, _)| {
                    let keep = k != name || index == first;
                    index += 1;
                    keep
                });
            }
            None => pairs.push((name.to_string(), value.to_string())),
        }
    }

    parts.join(&pairs)
}

/// Drop every value of the named parameters
pub fn remove_parameter<S: AsRef<str>>(uri: &str, names: &[S]) -> String {
    let parts = UriParts::split(uri);
    let mut pairs = parts.pairs();
    pairs.retain(|(k, _)| !names.iter().any(|n| n.as_ref() == k));
    parts.join(&pairs)
}

/// Keep only the named parameters
pub fn retain_parameter<S: AsRef<str>>(uri: &str, names: &[S]) -> String {
    let parts = UriParts::split(uri);
    let mut pairs = parts.pairs();
    pairs.retain(|(k, _)| names.iter().any(|n| n.as_ref() == k));
    parts.join(&pairs)
}

/// Encode pairs as `a=1&b=2`, in the given order
pub fn to_query_string<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (k, v) in pairs {
        serializer.append_pair(k.as_ref(), v.as_ref());
    }
    serializer.finish()
}

/// Parse a query string into names with all their values, names in first-seen order.
///
/// A leading `?` is ignored.
pub fn parse_query(query: &str) -> Vec<(String, Vec<String>)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut params: Vec<(String, Vec<String>)> = Vec::new();

    for (name, value) in form_urlencoded::parse(query.as_bytes()).into_owned() {
        match params.iter_mut().find(|(k, _)| *k == name) {
            Some((_, values)) => values.push(value),
            None => params.push((name, vec![value])),
        }
    }
    params
}

/// First value of `name` in the query of `uri`
pub fn get_parameter(uri: &str, name: &str) -> Option<String> {
    UriParts::split(uri)
        .pairs()
        .into_iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v)
}
