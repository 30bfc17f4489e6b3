//! Trait for a distance-matrix provider.

use async_trait::async_trait;

use crate::error::Result;
use crate::parser::MatrixResponse;
use crate::request::MatrixRequest;

/// Abstraction over a distance-matrix provider (e.g. Google Maps).
///
/// One call is one request against the provider's daily quota.
#[async_trait]
pub trait DistanceMatrixApi: Send + Sync {
    /// Sends `request` and returns the decoded response matrix.
    async fn query(&self, request: &MatrixRequest) -> Result<MatrixResponse>;
}
