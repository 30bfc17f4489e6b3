use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use crate::error::{Result, TravelTimeError};
use crate::fetch::{BasicClient, HttpClient, fetch_bytes};
use crate::parser::{MatrixResponse, decode_response};
use crate::request::MatrixRequest;
use crate::services::distance_matrix::DistanceMatrixApi;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Google Maps Distance Matrix client.
pub struct GoogleMatrixClient<C = BasicClient> {
    http: C,
    base_url: Url,
}

impl GoogleMatrixClient<BasicClient> {
    /// Creates a client against `base_url` (normally [`DEFAULT_BASE_URL`]).
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_http(BasicClient::new()?, base_url)
    }
}

impl<C: HttpClient> GoogleMatrixClient<C> {
    pub fn with_http(http: C, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            TravelTimeError::config(format!("invalid base URL '{base_url}': {e}"))
        })?;
        Ok(Self { http, base_url })
    }

    /// Full request URL for `request`, key included.
    pub fn request_url(&self, request: &MatrixRequest) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().extend_pairs(request.query_pairs());
        url
    }
}

#[async_trait]
impl<C: HttpClient> DistanceMatrixApi for GoogleMatrixClient<C> {
    #[tracing::instrument(skip_all, fields(origins = %request.origins, destinations = %request.destinations, mode = %request.mode))]
    async fn query(&self, request: &MatrixRequest) -> Result<MatrixResponse> {
        let url = self.request_url(request);
        debug!(host = url.host_str().unwrap_or_default(), "Sending distance-matrix request");

        let body = fetch_bytes(&self.http, url).await?;
        decode_response(&body)
    }
}
