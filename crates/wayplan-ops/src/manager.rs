use tokio::sync::watch;
use tracing::{info, warn};
use wayplan_proto::{decode, DecodeError, Mission, Sample};

use crate::operator::{MissionOperator, OperatorError};
use crate::state::StatusUpdate;
use crate::MissionSettings;

/// Owns the mission being prepared and drives it through an operator,
/// publishing a status line after every step.
pub struct MissionManager<O> {
    mission: Mission,
    settings: MissionSettings,
    operator: Option<O>,
    status: watch::Sender<StatusUpdate>,
}

impl<O: MissionOperator> MissionManager<O> {
    /// `operator` is `None` when no aircraft is attached; uploads then fail
    /// with [`OperatorError::Unavailable`].
    pub fn new(settings: MissionSettings, operator: Option<O>) -> Self {
        let (status, _) = watch::channel(StatusUpdate::default());
        Self { mission: Mission::new(), settings, operator, status }
    }

    pub fn subscribe(&self) -> watch::Receiver<StatusUpdate> {
        self.status.subscribe()
    }

    pub fn status(&self) -> String {
        self.status.borrow().text.clone()
    }

    pub fn mission(&self) -> &Mission {
        &self.mission
    }

    pub fn settings(&self) -> &MissionSettings {
        &self.settings
    }

    pub fn operator(&self) -> Option<&O> {
        self.operator.as_ref()
    }

    fn set_status(&self, text: impl Into<String>) {
        publish(&self.status, text);
    }

    pub fn load_sample(&mut self, sample: Sample) -> Result<usize, DecodeError> {
        let mission = sample.load()?;
        self.mission.remove_all();
        self.mission.extend(mission.iter().copied());
        self.set_status(format!("Loaded {}", sample.name()));
        Ok(self.mission.len())
    }

    /// Replaces the current mission with a decoded one. On error the current
    /// mission is kept.
    pub fn load_json(&mut self, json: &str) -> Result<usize, DecodeError> {
        match decode(json) {
            Ok(mission) => {
                self.mission = mission;
                self.set_status(format!("Loaded mission ({} waypoints)", self.mission.len()));
                Ok(self.mission.len())
            }
            Err(e) => {
                warn!("load mission: {}", e);
                self.set_status("Load mission failed.");
                Err(e)
            }
        }
    }

    pub async fn upload_mission(&mut self) -> Result<(), OperatorError> {
        let Some(op) = self.operator.as_mut() else {
            return Err(self.no_operator());
        };
        publish(&self.status, "Uploading");
        let res = match op.load(&self.mission, &self.settings) {
            Ok(()) => op.upload().await,
            Err(e) => Err(e),
        };
        self.report(res, "Upload mission finished.", "Upload mission failed.")
    }

    pub async fn start_mission(&mut self) -> Result<(), OperatorError> {
        let Some(op) = self.operator.as_mut() else {
            return Err(self.no_operator());
        };
        publish(&self.status, "Starting mission");
        let res = op.start().await;
        self.report(res, "Start mission finished.", "Start mission failed.")
    }

    pub async fn stop_mission(&mut self) -> Result<(), OperatorError> {
        let Some(op) = self.operator.as_mut() else {
            return Err(self.no_operator());
        };
        let res = op.stop().await;
        self.report(res, "Stop mission finished.", "Stop mission failed.")
    }

    /// Waits for a started mission to end.
    pub async fn wait_for_execution(&mut self) -> Result<(), OperatorError> {
        let Some(op) = self.operator.as_mut() else {
            return Err(self.no_operator());
        };
        let res = op.execution_finished().await;
        self.report(res, "Mission execution finished.", "Mission execution failed.")
    }

    fn no_operator(&self) -> OperatorError {
        self.set_status("Mission Operator is nil");
        OperatorError::Unavailable
    }

    fn report(
        &self,
        res: Result<(), OperatorError>,
        ok: &str,
        failed: &str,
    ) -> Result<(), OperatorError> {
        match &res {
            Ok(()) => self.set_status(ok),
            Err(e) => {
                warn!("{} {}", failed, e);
                self.set_status(failed);
            }
        }
        res
    }
}

// Takes the sender alone so it can run while the operator is borrowed.
fn publish(status: &watch::Sender<StatusUpdate>, text: impl Into<String>) {
    let update = StatusUpdate::now(text);
    info!("status: {}", update.text);
    status.send_replace(update);
}
