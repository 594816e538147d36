pub mod client;
pub mod error;
pub mod types;

mod ai;
mod chat;
mod manufacturer;
mod medicine;
mod pharmacy;
mod qr;
mod watchdog;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiResult};
