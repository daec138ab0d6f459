//! Hardcoded survey missions over a single city block. Kept as wire-format
//! documents so loading them goes through the same decoder as any other
//! mission.

use crate::codec::{decode, DecodeError};
use crate::mission::Mission;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    M1,
    M2,
}

impl Sample {
    pub fn name(self) -> &'static str {
        match self {
            Sample::M1 => "M1",
            Sample::M2 => "M2",
        }
    }

    pub fn json(self) -> &'static str {
        match self {
            Sample::M1 => M1_JSON,
            Sample::M2 => M2_JSON,
        }
    }

    pub fn load(self) -> Result<Mission, DecodeError> {
        decode(self.json())
    }
}

// Climb out heading SW, drop to survey altitude, then two photo passes.
const M1_JSON: &str = r#"{
  "waypoints": [
    {"lat": 37.785834, "long": -122.406417, "altitude": 91.44, "speed": 8.0, "heading": -131, "gimbalPitch": 0.0, "shootPhotoDistanceInterval": 0.0, "actionTimeoutInSeconds": 60},
    {"lat": 37.7850134311934, "long": -122.40757533714877, "altitude": 91.44, "speed": 8.0, "heading": -131, "gimbalPitch": 0.0, "shootPhotoDistanceInterval": 0.0, "actionTimeoutInSeconds": 60},
    {"lat": 37.7850134311934, "long": -122.40757533714877, "altitude": 60.96, "speed": 8.0, "heading": 90, "gimbalPitch": -90.0, "shootPhotoDistanceInterval": 0.0, "actionTimeoutInSeconds": 60},
    {"lat": 37.7850134311934, "long": -122.40757533714877, "altitude": 60.358997, "speed": 6.437376, "heading": 90, "gimbalPitch": -90.0, "shootPhotoDistanceInterval": 16.093441, "actionTimeoutInSeconds": 999},
    {"lat": 37.7850134311934, "long": -122.40666793382216, "altitude": 60.96, "speed": 6.437376, "heading": 90, "gimbalPitch": -90.0, "shootPhotoDistanceInterval": 0.0, "actionTimeoutInSeconds": 999},
    {"lat": 37.78526718105283, "long": -122.40666793382216, "altitude": 60.96, "speed": 6.437376, "heading": -90, "gimbalPitch": -90.0, "shootPhotoDistanceInterval": 16.093441, "actionTimeoutInSeconds": 999},
    {"lat": 37.78526718105283, "long": -122.40757533714877, "altitude": 60.96, "speed": 6.437376, "heading": -90, "gimbalPitch": -90.0, "shootPhotoDistanceInterval": 16.093441, "actionTimeoutInSeconds": 999}
  ]
}"#;

// M1 plus a third photo pass one row further north.
const M2_JSON: &str = r#"{
  "waypoints": [
    {"lat": 37.785834, "long": -122.406417, "altitude": 91.44, "speed": 8.0, "heading": -131, "gimbalPitch": 0.0, "shootPhotoDistanceInterval": 0.0, "actionTimeoutInSeconds": 60},
    {"lat": 37.7850134311934, "long": -122.40757533714877, "altitude": 91.44, "speed": 8.0, "heading": -131, "gimbalPitch": 0.0, "shootPhotoDistanceInterval": 0.0, "actionTimeoutInSeconds": 60},
    {"lat": 37.7850134311934, "long": -122.40757533714877, "altitude": 60.96, "speed": 8.0, "heading": 90, "gimbalPitch": -90.0, "shootPhotoDistanceInterval": 0.0, "actionTimeoutInSeconds": 60},
    {"lat": 37.7850134311934, "long": -122.40757533714877, "altitude": 60.358997, "speed": 6.437376, "heading": 90, "gimbalPitch": -90.0, "shootPhotoDistanceInterval": 16.093441, "actionTimeoutInSeconds": 999},
    {"lat": 37.7850134311934, "long": -122.40666793382216, "altitude": 60.96, "speed": 6.437376, "heading": 90, "gimbalPitch": -90.0, "shootPhotoDistanceInterval": 0.0, "actionTimeoutInSeconds": 999},
    {"lat": 37.78526718105283, "long": -122.40666793382216, "altitude": 60.96, "speed": 6.437376, "heading": -90, "gimbalPitch": -90.0, "shootPhotoDistanceInterval": 16.093441, "actionTimeoutInSeconds": 999},
    {"lat": 37.78526718105283, "long": -122.40757533714877, "altitude": 60.96, "speed": 6.437376, "heading": -90, "gimbalPitch": -90.0, "shootPhotoDistanceInterval": 16.093441, "actionTimeoutInSeconds": 999},
    {"lat": 37.78552093091226, "long": -122.40757533714877, "altitude": 60.96, "speed": 6.437376, "heading": 90, "gimbalPitch": -90.0, "shootPhotoDistanceInterval": 0.0, "actionTimeoutInSeconds": 999},
    {"lat": 37.78552093091226, "long": -122.40666793382216, "altitude": 60.96, "speed": 6.437376, "heading": 90, "gimbalPitch": -90.0, "shootPhotoDistanceInterval": 16.093441, "actionTimeoutInSeconds": 999}
  ]
}"#;
