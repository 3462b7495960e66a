pub mod api;
pub mod commands;
pub mod config;
pub mod contracts;
pub mod error;
pub mod money;
pub mod schedule;
pub mod statement;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
