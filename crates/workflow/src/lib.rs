//! Campaign review and multi-channel launch workflow: submission
//! validation, the human review gate, and the fan-out launch orchestrator.

pub mod approval;
pub mod orchestrator;
pub mod store;
pub mod validator;

pub use approval::{ApprovalDecision, ApprovalWorkflow, ApproveOptions, Rejection, SubmitOutcome};
pub use orchestrator::LaunchOrchestrator;
pub use store::CampaignStore;
