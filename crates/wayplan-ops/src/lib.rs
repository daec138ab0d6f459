pub mod geo;
pub mod manager;
pub mod operator;
pub mod sim;
pub mod state;

use anyhow::Result;
use serde::Deserialize;

pub use manager::MissionManager;
pub use operator::{MissionOperator, OperatorError};
pub use state::{OperatorState, StatusUpdate};

/// Hard ceiling the autopilot accepts for any mission speed (m/s).
pub const MAX_SUPPORTED_SPEED: f32 = 15.0;

/// Mission-wide parameters applied on upload. They travel next to the
/// mission, not inside its wire format.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MissionSettings {
    /// Upper bound for speed changes made from the remote controller (m/s).
    pub max_flight_speed: f32,
    /// Speed used for waypoints whose own speed is 0 (m/s).
    pub auto_flight_speed: f32,
    pub goto_first_waypoint_mode: GotoFirstWaypointMode,
    pub heading_mode: HeadingMode,
    pub finished_action: FinishedAction,
    pub rotate_gimbal_pitch: bool,
    pub exit_mission_on_rc_signal_lost: bool,
    pub flight_path_mode: FlightPathMode,
}

impl Default for MissionSettings {
    fn default() -> Self {
        Self {
            max_flight_speed: 8.0,
            auto_flight_speed: 8.0,
            goto_first_waypoint_mode: GotoFirstWaypointMode::Safely,
            heading_mode: HeadingMode::UsingWaypointHeading,
            finished_action: FinishedAction::GoHome,
            rotate_gimbal_pitch: true,
            exit_mission_on_rc_signal_lost: true,
            flight_path_mode: FlightPathMode::Curved,
        }
    }
}

impl MissionSettings {
    pub fn check(&self) -> Result<()> {
        anyhow::ensure!(
            self.max_flight_speed > 0.0 && self.max_flight_speed <= MAX_SUPPORTED_SPEED,
            "mission.max_flight_speed must be in (0, {}]",
            MAX_SUPPORTED_SPEED
        );
        anyhow::ensure!(
            self.auto_flight_speed > 0.0 && self.auto_flight_speed <= self.max_flight_speed,
            "mission.auto_flight_speed must be in (0, max_flight_speed]"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GotoFirstWaypointMode {
    /// Climb to safe altitude first, then fly over.
    Safely,
    PointToPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingMode {
    Auto,
    UsingInitialDirection,
    ControlByRemoteController,
    UsingWaypointHeading,
    TowardPointOfInterest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishedAction {
    NoAction,
    GoHome,
    AutoLand,
    GoFirstWaypoint,
    ContinueUntilStop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightPathMode {
    Normal,
    Curved,
}
