//! JSON wire format for missions.
//!
//! ```text
//! {"waypoints":[{"lat":..,"long":..,"altitude":..,"speed":..,"heading":..,
//!   "gimbalPitch":..,"shootPhotoDistanceInterval":..,"actionTimeoutInSeconds":..}]}
//! ```
//!
//! Decoding checks shape and types only. Coordinate and heading ranges are
//! left to [`crate::doctor`].

use thiserror::Error;

use crate::mission::Mission;

/// Malformed or incomplete mission document.
#[derive(Debug, Error)]
#[error("mission decode failed: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

impl DecodeError {
    /// 1-based line of the offending input, 0 if unknown.
    pub fn line(&self) -> usize {
        self.0.line()
    }

    pub fn column(&self) -> usize {
        self.0.column()
    }

    /// True when the input was valid JSON but not a mission
    /// (missing key, wrong type).
    pub fn is_data(&self) -> bool {
        self.0.is_data()
    }
}

pub fn encode(mission: &Mission) -> String {
    // Only maps with non-string keys make serde_json fail; the model has none.
    serde_json::to_string(mission).expect("mission is always representable as JSON")
}

pub fn encode_pretty(mission: &Mission) -> String {
    serde_json::to_string_pretty(mission).expect("mission is always representable as JSON")
}

pub fn decode(json: &str) -> Result<Mission, DecodeError> {
    Ok(serde_json::from_str(json)?)
}

pub fn decode_slice(json: &[u8]) -> Result<Mission, DecodeError> {
    Ok(serde_json::from_slice(json)?)
}
