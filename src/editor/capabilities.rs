//! Capabilities the page editor is handed instead of reaching for globals.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Default,
    Warning,
    Destructive,
}

/// Short notification shown to the editing user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn new(variant: ToastVariant, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant,
        }
    }
}

/// Toast bus
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Route changes requested by the editor
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Notifier that writes toasts to the log, for headless use
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Destructive => {
                tracing::error!(title = %toast.title, description = %toast.description, "toast")
            }
            ToastVariant::Warning => {
                tracing::warn!(title = %toast.title, description = %toast.description, "toast")
            }
            ToastVariant::Default => {
                tracing::info!(title = %toast.title, description = %toast.description, "toast")
            }
        }
    }
}
