//! Utility functions and helpers.

pub mod envelope;
pub mod http;

use url::Url;

/// Build an endpoint URL from a base URL, a path and query pairs.
///
/// The base path is kept, so `http://host/app` + `/api/chats` becomes
/// `http://host/app/api/chats`. Pairs are appended in the given order; no
/// `?` is added when there are none.
pub fn endpoint_url(base: &Url, path: &str, query: &[(String, String)]) -> Url {
    let mut url = base.clone();
    {
        let base_path = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{}/{}", base_path, path.trim_start_matches('/')));
    }
    url.set_query(None);
    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    url
}
