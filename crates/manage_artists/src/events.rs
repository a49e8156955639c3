//! Controller events, toast notifications and error modeling for the
//! artist list screen.

use client_core::ClientError;
use shared::{error::ErrorCode, protocol::ArtistPage};
use thiserror::Error;
use tokio::sync::mpsc;

/// Messages delivered back to the task that owns the controller.
#[derive(Debug)]
pub enum ControllerEvent {
    FetchSettled {
        seq: u64,
        result: Result<ArtistPage, FetchError>,
    },
    /// Posted by a dialog after a successful mutation.
    Revalidate,
}

/// Why a listing fetch produced no page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Client(#[from] ClientError),
    /// The `ArtistsApi` implementation panicked before answering.
    #[error("artist list request panicked: {0}")]
    Panicked(String),
}

/// Receiving half of the controller's event queue.
pub struct ControllerEvents {
    rx: mpsc::UnboundedReceiver<ControllerEvent>,
}

impl ControllerEvents {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<ControllerEvent>) -> Self {
        Self { rx }
    }

    pub async fn recv(&mut self) -> Option<ControllerEvent> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<ControllerEvent> {
        self.rx.try_recv().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Server,
    Decode,
    Validation,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    ListArtists,
    LoadArtist,
    CreateArtist,
    EditArtist,
}

impl UiErrorContext {
    fn summary(self) -> &'static str {
        match self {
            Self::ListArtists => "Nie udało się pobrać listy artystów",
            Self::LoadArtist => "Nie udało się wczytać artysty",
            Self::CreateArtist => "Nie udało się utworzyć artysty",
            Self::EditArtist => "Nie udało się zapisać artysty",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Transport(_) => UiErrorCategory::Transport,
            ClientError::Decode(_) => UiErrorCategory::Decode,
            ClientError::Status {
                code: Some(ErrorCode::Validation),
                ..
            } => UiErrorCategory::Validation,
            ClientError::Status { .. } => UiErrorCategory::Server,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_fetch_error(context: UiErrorContext, err: &FetchError) -> Self {
        match err {
            FetchError::Client(err) => Self::from_client_error(context, err),
            FetchError::Panicked(_) => Self {
                category: UiErrorCategory::Internal,
                context,
                message: err.to_string(),
            },
        }
    }

    pub fn validation(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Validation,
            context,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastSeverity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub severity: ToastSeverity,
    pub summary: String,
    pub detail: String,
}

impl Toast {
    pub fn success(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: ToastSeverity::Success,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn error(err: &UiError) -> Self {
        Self {
            severity: ToastSeverity::Error,
            summary: err.context().summary().to_string(),
            detail: err.message().to_string(),
        }
    }
}

/// User-facing notification sink (toast area of the admin layout).
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}
