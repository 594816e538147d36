pub mod commands;
pub mod controller;
pub mod loop_worker;
pub mod state;

pub use controller::WatchdogController;
pub use state::WatchdogState;
