use thiserror::Error;
use wayplan_proto::Mission;

use crate::state::OperatorState;
use crate::MissionSettings;

#[derive(Debug, Error)]
pub enum OperatorError {
    #[error("no mission operator available")]
    Unavailable,

    #[error("mission rejected: {0}")]
    Rejected(String),

    #[error("{op} not allowed while {state:?}")]
    InvalidState { op: &'static str, state: OperatorState },

    #[error("aircraft link: {0}")]
    Link(String),

    #[error("mission execution aborted")]
    Aborted,
}

/// The aircraft side of a waypoint mission. Implementations talk to the
/// flight controller; nothing here knows how.
///
/// Expected call order: `load`, `upload`, `start`, then `execution_finished`
/// (or `stop`). Out-of-order calls fail with [`OperatorError::InvalidState`].
#[allow(async_fn_in_trait)]
pub trait MissionOperator {
    /// Stage a mission for upload. Parameter checks happen here.
    fn load(&mut self, mission: &Mission, settings: &MissionSettings) -> Result<(), OperatorError>;

    async fn upload(&mut self) -> Result<(), OperatorError>;

    async fn start(&mut self) -> Result<(), OperatorError>;

    async fn stop(&mut self) -> Result<(), OperatorError>;

    /// Resolves once a started mission ends, successfully or not.
    async fn execution_finished(&mut self) -> Result<(), OperatorError>;

    fn state(&self) -> OperatorState;
}
