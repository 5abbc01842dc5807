//! Notification collaborator trait. The workflow emits review-lifecycle
//! notifications through an `Arc<dyn Notifier>`; delivery is best-effort,
//! and a failed send is logged by the caller, never fatal to the
//! operation that triggered it.

use serde_json::Value;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Outbound notification sink: event-style sends (email/webhook backends)
/// plus owner-facing in-app notifications.
pub trait Notifier: Send + Sync {
    fn send(&self, event_type: &str, recipient: Uuid, data: Value) -> anyhow::Result<()>;

    fn create_in_app(
        &self,
        user_id: Uuid,
        kind: &str,
        title: &str,
        message: &str,
        data: Value,
    ) -> anyhow::Result<()>;
}

/// No-op notifier for tests and wiring without a notification backend.
pub struct NoOpNotifier;

impl Notifier for NoOpNotifier {
    fn send(&self, _event_type: &str, _recipient: Uuid, _data: Value) -> anyhow::Result<()> {
        Ok(())
    }

    fn create_in_app(
        &self,
        _user_id: Uuid,
        _kind: &str,
        _title: &str,
        _message: &str,
        _data: Value,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}

pub fn noop_notifier() -> Arc<dyn Notifier> {
    Arc::new(NoOpNotifier)
}

/// A sent event captured by [`CaptureNotifier`].
#[derive(Debug, Clone)]
pub struct SentEvent {
    pub event_type: String,
    pub recipient: Uuid,
    pub data: Value,
}

/// An in-app notification captured by [`CaptureNotifier`].
#[derive(Debug, Clone)]
pub struct InAppEvent {
    pub user_id: Uuid,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub data: Value,
}

/// In-memory notifier that records everything, for assertions in tests.
#[derive(Default)]
pub struct CaptureNotifier {
    sent: Mutex<Vec<SentEvent>>,
    in_app: Mutex<Vec<InAppEvent>>,
}

impl CaptureNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentEvent> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }

    pub fn in_app(&self) -> Vec<InAppEvent> {
        self.in_app.lock().expect("notifier mutex poisoned").clone()
    }

    pub fn count_type(&self, event_type: &str) -> usize {
        self.sent
            .lock()
            .expect("notifier mutex poisoned")
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }
}

impl Notifier for CaptureNotifier {
    fn send(&self, event_type: &str, recipient: Uuid, data: Value) -> anyhow::Result<()> {
        self.sent
            .lock()
            .expect("notifier mutex poisoned")
            .push(SentEvent {
                event_type: event_type.to_string(),
                recipient,
                data,
            });
        Ok(())
    }

    fn create_in_app(
        &self,
        user_id: Uuid,
        kind: &str,
        title: &str,
        message: &str,
        data: Value,
    ) -> anyhow::Result<()> {
        self.in_app
            .lock()
            .expect("notifier mutex poisoned")
            .push(InAppEvent {
                user_id,
                kind: kind.to_string(),
                title: title.to_string(),
                message: message.to_string(),
                data,
            });
        Ok(())
    }
}

/// Notifier whose backend is always down, for asserting that notification
/// failures never fail a workflow operation.
pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn send(&self, _event_type: &str, _recipient: Uuid, _data: Value) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("notifier backend unavailable"))
    }

    fn create_in_app(
        &self,
        _user_id: Uuid,
        _kind: &str,
        _title: &str,
        _message: &str,
        _data: Value,
    ) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("notifier backend unavailable"))
    }
}
