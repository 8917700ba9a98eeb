pub mod calibration;
pub mod jump;
pub mod metrics;
pub mod presence;
pub mod reference;
pub mod session;

pub use calibration::{calibrate_scale, CalibrationScale, CALIBRATION_FACTOR};
pub use jump::{JumpEvent, JumpPhase, JumpPhaseDetector};
pub use metrics::{jump_height_cm, MetricsFrame, SessionMetrics};
pub use presence::body_in_frame;
pub use reference::ReferenceBaseline;
pub use session::{JumpSession, MetricsSnapshot, SessionReport};
