//! Query string access on the page location

use url::form_urlencoded;
use url::Url;

/// First value of `name` in a `?a=b&c=d` search string, form-decoded.
///
/// Leading `?` is optional. Missing and empty values are both `None`.
pub fn query_param(search: &str, name: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Search part of an absolute or relative href, including the `?`
pub fn search_of(href: &str) -> &str {
    let without_fragment = href.split('#').next().unwrap_or(href);
    match without_fragment.find('?') {
        Some(i) => &without_fragment[i..],
        None => "",
    }
}

/// `href` with `name` set to `value`.
///
/// The first existing pair is replaced and later duplicates dropped; absent
/// parameters are appended. Other parameters and the fragment are kept.
/// Returns `None` if `href` is not an absolute URL.
pub fn with_query_param(href: &str, name: &str, value: &str) -> Option<String> {
    let mut url = Url::parse(href).ok()?;

    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut replaced = false;
    for (key, val) in url.query_pairs() {
        if key == name {
            if !replaced {
                pairs.push((key.into_owned(), value.to_string()));
                replaced = true;
            }
        } else {
            pairs.push((key.into_owned(), val.into_owned()));
        }
    }
    if !replaced {
        pairs.push((name.to_string(), value.to_string()));
    }

    url.query_pairs_mut().clear().extend_pairs(pairs);
    Some(url.to_string())
}
