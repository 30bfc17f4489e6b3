//! Distance-matrix response types and mapping of a response back onto pairs.

use serde::Deserialize;

use crate::error::{Result, TravelTimeError};
use crate::grouper::Group;
use crate::request::TravelMode;

/// Literal written in place of a duration for failed pairs.
pub const FAILURE_MARKER: &str = "failed";

const STATUS_OK: &str = "OK";

#[derive(Debug, Clone, Deserialize)]
pub struct MatrixResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatrixRow {
    #[serde(default)]
    pub elements: Vec<MatrixElement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatrixElement {
    pub status: String,
    #[serde(default)]
    pub duration: Option<DurationValue>,
}

/// Only the numeric seconds are read; `text` and `distance` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct DurationValue {
    pub value: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Duration(u64),
    Failed,
}

/// Outcome of a single origin/destination pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairResult {
    pub origin: String,
    pub destination: String,
    pub mode: TravelMode,
    pub outcome: Outcome,
    pub request_seq: u64,
}

impl PairResult {
    /// CSV fields: origin, destination, mode, seconds or failure marker, request number.
    pub fn to_record(&self) -> [String; 5] {
        let value = match self.outcome {
            Outcome::Duration(secs) => secs.to_string(),
            Outcome::Failed => FAILURE_MARKER.to_string(),
        };
        [
            self.origin.clone(),
            self.destination.clone(),
            self.mode.to_string(),
            value,
            self.request_seq.to_string(),
        ]
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedResults {
    pub successes: Vec<PairResult>,
    pub failures: Vec<PairResult>,
}

/// Decodes a raw JSON body into a [`MatrixResponse`].
pub fn decode_response(body: &[u8]) -> Result<MatrixResponse> {
    serde_json::from_slice(body)
        .map_err(|e| TravelTimeError::shape(format!("invalid distance-matrix JSON: {e}")))
}

/// Maps `response` onto the pairs of `group` in row-major order.
///
/// # Errors
///
/// [`TravelTimeError::Upstream`] if the response carries a top-level status
/// other than `OK`; [`TravelTimeError::DataShape`] if a row or element is
/// missing, or an `OK` element has no duration.
pub fn parse_results(
    group: &Group,
    mode: TravelMode,
    response: &MatrixResponse,
    request_seq: u64,
) -> Result<ParsedResults> {
    if let Some(status) = response.status.as_deref() {
        if status != STATUS_OK {
            return Err(TravelTimeError::Upstream {
                status: status.to_string(),
                message: response.error_message.clone(),
            });
        }
    }

    let mut parsed = ParsedResults::default();

    for (i, origin) in group.origins.iter().enumerate() {
        let row = response.rows.get(i).ok_or_else(|| {
            TravelTimeError::shape(format!(
                "expected {} rows, got {}",
                group.origins.len(),
                response.rows.len()
            ))
        })?;

        for (j, destination) in group.destinations.iter().enumerate() {
            let element = row.elements.get(j).ok_or_else(|| {
                TravelTimeError::shape(format!(
                    "row {i}: expected {} elements, got {}",
                    group.destinations.len(),
                    row.elements.len()
                ))
            })?;

            let outcome = if element.status == STATUS_OK {
                let duration = element.duration.as_ref().ok_or_else(|| {
                    TravelTimeError::shape(format!("element ({i},{j}) is OK but has no duration"))
                })?;
                Outcome::Duration(duration.value)
            } else {
                Outcome::Failed
            };

            let result = PairResult {
                origin: origin.clone(),
                destination: destination.clone(),
                mode,
                outcome,
                request_seq,
            };

            match outcome {
                Outcome::Duration(_) => parsed.successes.push(result),
                Outcome::Failed => parsed.failures.push(result),
            }
        }
    }

    Ok(parsed)
}
