//! Transient notifications raised by the controllers.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cache::lock::mutex_lock;
use crate::domain::resource::ResourceKind;

const SOURCE: &str = "application::toasts";

pub const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(1500);
pub const DEFAULT_MAX_VISIBLE: usize = 3;

pub const FORM_FAILURE: &str = "Something went wrong";
pub const DELETE_FAILURE: &str = "Something went wrong while delete";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub text: String,
    #[serde(rename = "ttl_ms", serialize_with = "serialize_ttl")]
    pub ttl: Duration,
    #[serde(skip)]
    raised_at: Instant,
}

impl Toast {
    fn new(kind: ToastKind, text: String, ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            text,
            ttl,
            raised_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.raised_at.elapsed() >= self.ttl
    }
}

fn serialize_ttl<S: serde::Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX))
}

/// Shared notification sink; clones push into the same stack.
#[derive(Debug, Clone)]
pub struct Toasts {
    inner: Arc<Mutex<VecDeque<Toast>>>,
    ttl: Duration,
    max_visible: usize,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL, DEFAULT_MAX_VISIBLE)
    }
}

impl Toasts {
    pub fn new(ttl: Duration, max_visible: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
            ttl,
            max_visible: max_visible.max(1),
        }
    }

    pub fn success(&self, text: impl Into<String>) -> Uuid {
        let text = text.into();
        info!(target = SOURCE, kind = "success", text = %text, "notification");
        self.push(Toast::new(ToastKind::Success, text, self.ttl))
    }

    pub fn error(&self, text: impl Into<String>) -> Uuid {
        let text = text.into();
        warn!(target = SOURCE, kind = "error", text = %text, "notification");
        self.push(Toast::new(ToastKind::Error, text, self.ttl))
    }

    fn push(&self, toast: Toast) -> Uuid {
        let id = toast.id;
        let mut stack = self.lock();
        stack.push_back(toast);
        while stack.len() > self.max_visible {
            stack.pop_front();
        }
        id
    }

    /// Unexpired notifications, oldest first.
    pub fn visible(&self) -> Vec<Toast> {
        let mut stack = self.lock();
        stack.retain(|toast| !toast.is_expired());
        stack.iter().cloned().collect()
    }

    pub fn dismiss(&self, id: Uuid) {
        self.lock().retain(|toast| toast.id != id);
    }

    /// Take every retained notification, expired or not.
    pub fn drain(&self) -> Vec<Toast> {
        self.lock().drain(..).collect()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Toast>> {
        mutex_lock(&self.inner, SOURCE, "toasts")
    }
}

pub fn created_message(kind: ResourceKind) -> String {
    format!("{} created successfully", kind.name())
}

pub fn updated_message(kind: ResourceKind) -> String {
    format!("{} updated successfully", kind.name())
}

pub fn deleted_message(kind: ResourceKind) -> String {
    format!("{} deleted successfully", kind.name())
}
