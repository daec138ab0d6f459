//! In-process stand-in for the aircraft. Accepts the same call sequence a
//! real flight controller would and "flies" the mission by sleeping for each
//! leg's flight time, scaled by `time_scale`.

use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use wayplan_proto::{doctor, Mission};

use crate::geo;
use crate::operator::{MissionOperator, OperatorError};
use crate::state::OperatorState;
use crate::MissionSettings;

pub const MIN_WAYPOINTS: usize = 2;
pub const MAX_WAYPOINTS: usize = 99;
/// Slowest non-zero waypoint speed the autopilot will fly (m/s).
pub const MIN_WAYPOINT_SPEED: f32 = 0.1;

const UPLOAD_SECS_PER_WAYPOINT: f64 = 0.05;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub connected: bool,
    pub fail_upload: bool,
    pub fail_start: bool,
    /// Wall-clock seconds per simulated second. 0 flies instantly.
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { connected: true, fail_upload: false, fail_start: false, time_scale: 0.0 }
    }
}

pub struct SimOperator {
    cfg: SimConfig,
    state: OperatorState,
    staged: Option<(Mission, MissionSettings)>,
    flight: Option<JoinHandle<usize>>,
}

impl SimOperator {
    pub fn new(cfg: SimConfig) -> Self {
        let state = if cfg.connected { OperatorState::ReadyToUpload } else { OperatorState::Disconnected };
        Self { cfg, state, staged: None, flight: None }
    }

    fn expect_state(&self, op: &'static str, want: OperatorState) -> Result<(), OperatorError> {
        if self.state == OperatorState::Disconnected {
            return Err(OperatorError::Link("aircraft not connected".into()));
        }
        if self.state != want {
            return Err(OperatorError::InvalidState { op, state: self.state });
        }
        Ok(())
    }
}

impl Drop for SimOperator {
    fn drop(&mut self) {
        if let Some(flight) = &self.flight {
            flight.abort();
        }
    }
}

/// Wall-clock time for `secs` of simulated flight. Durations too large to
/// represent are capped, which sleeps effectively forever.
fn wall_time(secs: f64, time_scale: f64) -> Option<Duration> {
    let s = secs * time_scale;
    if !(s > 0.0) {
        return None;
    }
    Some(Duration::try_from_secs_f64(s).unwrap_or(Duration::MAX))
}

/// Parameter checks the autopilot runs before accepting a mission.
pub fn check_uploadable(mission: &Mission, settings: &MissionSettings) -> Result<()> {
    settings.check()?;
    anyhow::ensure!(
        (MIN_WAYPOINTS..=MAX_WAYPOINTS).contains(&mission.len()),
        "mission needs {}..={} waypoints, has {}",
        MIN_WAYPOINTS,
        MAX_WAYPOINTS,
        mission.len()
    );
    doctor::check_mission(mission)?;
    for (i, wp) in mission.iter().enumerate() {
        anyhow::ensure!(
            wp.speed <= settings.max_flight_speed,
            "waypoint #{} speed {} exceeds max_flight_speed {}", i, wp.speed, settings.max_flight_speed
        );
        anyhow::ensure!(
            wp.speed == 0.0 || wp.speed >= MIN_WAYPOINT_SPEED,
            "waypoint #{} speed {} below {} m/s", i, wp.speed, MIN_WAYPOINT_SPEED
        );
    }
    Ok(())
}

impl MissionOperator for SimOperator {
    fn load(&mut self, mission: &Mission, settings: &MissionSettings) -> Result<(), OperatorError> {
        if self.state == OperatorState::Disconnected {
            return Err(OperatorError::Link("aircraft not connected".into()));
        }
        if self.state == OperatorState::Executing {
            return Err(OperatorError::InvalidState { op: "load", state: self.state });
        }
        check_uploadable(mission, settings).map_err(|e| OperatorError::Rejected(format!("{:#}", e)))?;

        self.staged = Some((mission.clone(), settings.clone()));
        self.state = OperatorState::ReadyToUpload;
        debug!("sim: staged {} waypoints", mission.len());
        Ok(())
    }

    async fn upload(&mut self) -> Result<(), OperatorError> {
        // Only reachable when a previous upload future was dropped mid-way.
        if self.state == OperatorState::Uploading {
            warn!("sim: previous upload was interrupted, retrying");
            self.state = OperatorState::ReadyToUpload;
        }
        self.expect_state("upload", OperatorState::ReadyToUpload)?;
        let n = match &self.staged {
            Some((m, _)) => m.len(),
            None => return Err(OperatorError::Rejected("no mission loaded".into())),
        };

        self.state = OperatorState::Uploading;
        if let Some(d) = wall_time(UPLOAD_SECS_PER_WAYPOINT * n as f64, self.cfg.time_scale) {
            tokio::time::sleep(d).await;
        }
        if self.cfg.fail_upload {
            self.state = OperatorState::ReadyToUpload;
            warn!("sim: upload failure injected");
            return Err(OperatorError::Link("upload timed out".into()));
        }

        self.state = OperatorState::ReadyToExecute;
        info!("sim: uploaded {} waypoints", n);
        Ok(())
    }

    async fn start(&mut self) -> Result<(), OperatorError> {
        self.expect_state("start", OperatorState::ReadyToExecute)?;
        if self.cfg.fail_start {
            warn!("sim: start failure injected");
            return Err(OperatorError::Rejected("aircraft refused to take off".into()));
        }
        let Some((mission, settings)) = self.staged.clone() else {
            return Err(OperatorError::Rejected("no mission loaded".into()));
        };

        let time_scale = self.cfg.time_scale;
        self.flight = Some(tokio::spawn(fly(mission, settings, time_scale)));
        self.state = OperatorState::Executing;
        info!("sim: mission started");
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), OperatorError> {
        self.expect_state("stop", OperatorState::Executing)?;
        if let Some(flight) = &self.flight {
            flight.abort();
        }
        // Stopping discards the mission; it has to be loaded again.
        self.staged = None;
        self.state = OperatorState::ReadyToUpload;
        info!("sim: mission stopped");
        Ok(())
    }

    async fn execution_finished(&mut self) -> Result<(), OperatorError> {
        let Some(flight) = self.flight.as_mut() else {
            return Err(OperatorError::InvalidState { op: "execution_finished", state: self.state });
        };
        let res = flight.await;
        self.flight = None;
        if self.state == OperatorState::Executing {
            self.state = OperatorState::ReadyToUpload;
        }
        match res {
            Ok(reached) => {
                info!("sim: mission finished after {} waypoints", reached);
                Ok(())
            }
            Err(e) if e.is_cancelled() => Err(OperatorError::Aborted),
            Err(e) => Err(OperatorError::Link(format!("flight task failed: {}", e))),
        }
    }

    fn state(&self) -> OperatorState {
        self.state
    }
}

async fn fly(mission: Mission, settings: MissionSettings, time_scale: f64) -> usize {
    let wps = mission.waypoints();
    for (i, leg) in wps.windows(2).enumerate() {
        let dist = geo::leg_length_m(&leg[0], &leg[1]);
        let speed = geo::leg_speed(&leg[1], &settings) as f64;
        let secs = if speed > 0.0 { dist / speed } else { 0.0 };
        if let Some(d) = wall_time(secs, time_scale) {
            tokio::time::sleep(d).await;
        }
        debug!(
            "sim: reached waypoint {}/{} ({:.1}m in {:.1}s, heading {}, gimbal {})",
            i + 2, wps.len(), dist, secs, leg[1].heading, leg[1].gimbal_pitch
        );
    }
    info!("sim: last waypoint reached, finished action {:?}", settings.finished_action);
    wps.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayplan_proto::{Sample, Waypoint};

    #[test]
    fn samples_are_uploadable() {
        let s = MissionSettings::default();
        check_uploadable(&Sample::M1.load().unwrap(), &s).unwrap();
        check_uploadable(&Sample::M2.load().unwrap(), &s).unwrap();
    }

    #[test]
    fn single_waypoint_is_rejected() {
        let m: Mission = std::iter::once(Waypoint::at(1.0, 1.0)).collect();
        assert!(check_uploadable(&m, &MissionSettings::default()).is_err());
    }

    #[test]
    fn too_many_waypoints_are_rejected() {
        let m: Mission = (0..100).map(|i| Waypoint::at(0.001 * i as f64, 0.0)).collect();
        let err = check_uploadable(&m, &MissionSettings::default()).unwrap_err();
        assert!(err.to_string().contains("has 100"));
    }

    #[test]
    fn crawling_waypoint_is_rejected() {
        let mut m = Mission::new();
        m.push(Waypoint::at(1.0, 1.0));
        m.push(Waypoint { speed: 1e-30, ..Waypoint::at(1.001, 1.0) });
        let err = check_uploadable(&m, &MissionSettings::default()).unwrap_err();
        assert!(err.to_string().contains("waypoint #1 speed"), "{}", err);
    }

    #[test]
    fn wall_time_never_panics() {
        assert_eq!(wall_time(0.0, 1.0), None);
        assert_eq!(wall_time(10.0, 0.0), None);
        assert_eq!(wall_time(f64::NAN, 1.0), None);
        assert_eq!(wall_time(2.0, 0.5), Some(Duration::from_secs(1)));
        assert_eq!(wall_time(5.5e31, 1.0), Some(Duration::MAX));
        assert_eq!(wall_time(1e300, 1e300), Some(Duration::MAX));
    }

    #[tokio::test]
    async fn dropping_operator_aborts_flight() {
        let mut op = SimOperator::new(SimConfig { time_scale: 1.0, ..Default::default() });
        op.load(&Sample::M1.load().unwrap(), &MissionSettings::default()).unwrap();
        op.upload().await.unwrap();
        op.start().await.unwrap();
        let flight = op.flight.as_ref().unwrap().abort_handle();

        drop(op);
        for _ in 0..10 {
            if flight.is_finished() { break; }
            tokio::task::yield_now().await;
        }
        assert!(flight.is_finished());
    }

    #[test]
    fn overspeed_waypoint_is_rejected() {
        let mut m = Mission::new();
        m.push(Waypoint::at(1.0, 1.0));
        m.push(Waypoint { speed: 12.0, ..Waypoint::at(1.001, 1.0) });
        let err = check_uploadable(&m, &MissionSettings::default()).unwrap_err();
        assert!(err.to_string().contains("waypoint #1 speed 12"));
    }
}
