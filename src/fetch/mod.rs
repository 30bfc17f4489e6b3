mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use tracing::debug;

use crate::error::Result;

/// Issues a GET for `url` and returns the body, treating non-2xx as an error.
///
/// Errors never carry the URL: its query string holds the API key.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: reqwest::Url) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url);

    let resp = client
        .execute(req)
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(reqwest::Error::without_url)?;
    let bytes = resp.bytes().await.map_err(reqwest::Error::without_url)?;
    debug!(bytes = bytes.len(), "Response body received");
    Ok(bytes.to_vec())
}
