pub mod channels;
pub mod config;
pub mod error;
pub mod notify;
pub mod profile;
pub mod types;

pub use config::AppConfig;
pub use error::{WorkflowError, WorkflowResult};
