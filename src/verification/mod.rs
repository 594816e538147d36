pub mod commands;
pub mod controller;
pub mod state;

pub use controller::VerificationController;
pub use state::{ScanPhase, ScanSession, ScanSnapshot};
