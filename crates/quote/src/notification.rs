use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::OffsetDateTime;
use tokio::task::JoinHandle;
use ulid::Ulid;

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(5000);

#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    /// Background colour of the toast.
    pub fn color(&self) -> &'static str {
        match self {
            NotificationKind::Info => "#3182ce",
            NotificationKind::Success => "#38a169",
            NotificationKind::Warning => "#d69e2e",
            NotificationKind::Error => "#e53e3e",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: Ulid,
    pub message: String,
    pub kind: NotificationKind,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            id: Ulid::new(),
            message: message.into(),
            kind,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

/// Where notifications get rendered (a toast container, a terminal, a test recorder).
pub trait NotificationSink: Send + Sync + 'static {
    fn show(&self, notification: &Notification);
    fn remove(&self, id: Ulid);
}

struct Active {
    notification: Notification,
    auto_dismiss: Option<JoinHandle<()>>,
}

struct Inner<S> {
    sink: S,
    ttl: Duration,
    current: Mutex<Option<Active>>,
}

impl<S> Inner<S> {
    fn slot(&self) -> MutexGuard<'_, Option<Active>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: NotificationSink> Inner<S> {
    fn expire(&self, id: Ulid) {
        let mut current = self.slot();
        if current.as_ref().is_some_and(|a| a.notification.id == id) {
            *current = None;
            self.sink.remove(id);
            tracing::debug!(%id, "notification expired");
        }
    }
}

/// Shows at most one notification at a time and dismisses it after the display window.
///
/// Every operation completes without yielding, so a caller that got a result back from its
/// transport cannot be cancelled between the result and the notification announcing it.
pub struct NotificationPresenter<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for NotificationPresenter<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: NotificationSink> NotificationPresenter<S> {
    pub fn new(sink: S, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                sink,
                ttl,
                current: Mutex::new(None),
            }),
        }
    }

    pub fn sink(&self) -> &S {
        &self.inner.sink
    }

    /// Must be called from within a tokio runtime, which drives the auto-dismiss timer.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> Notification {
        let notification = Notification::new(message, kind);
        let mut current = self.inner.slot();

        if let Some(previous) = current.take() {
            if let Some(handle) = previous.auto_dismiss {
                handle.abort();
            }
            self.inner.sink.remove(previous.notification.id);
        }

        self.inner.sink.show(&notification);
        tracing::debug!(id = %notification.id, kind = %kind, "notification shown");

        let inner = self.inner.clone();
        let id = notification.id;
        let auto_dismiss = tokio::spawn(async move {
            tokio::time::sleep(inner.ttl).await;
            inner.expire(id);
        });

        *current = Some(Active {
            notification: notification.clone(),
            auto_dismiss: Some(auto_dismiss),
        });

        notification
    }

    /// User dismissal (click). Returns false when the notification is already gone.
    pub fn dismiss(&self, id: Ulid) -> bool {
        let mut current = self.inner.slot();
        if !current.as_ref().is_some_and(|a| a.notification.id == id) {
            return false;
        }

        if let Some(active) = current.take() {
            if let Some(handle) = active.auto_dismiss {
                handle.abort();
            }
            self.inner.sink.remove(id);
        }

        true
    }

    pub fn current(&self) -> Option<Notification> {
        self.inner.slot().as_ref().map(|a| a.notification.clone())
    }

    /// Cancels the pending auto-dismiss. The rendered notification stays until the sink is torn
    /// down with it.
    pub fn shutdown(&self) {
        let mut current = self.inner.slot();
        if let Some(handle) = current.as_mut().and_then(|a| a.auto_dismiss.take()) {
            handle.abort();
        }
    }
}
