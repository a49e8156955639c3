//! Create/edit dialog collaborators. A dialog talks to the service on its
//! own and reports a successful mutation back to the list controller through
//! a [`Revalidate`] handle.

use std::sync::Arc;

use client_core::{ArtistsApi, ClientError};
use shared::{
    domain::ArtistId,
    protocol::{Artist, ArtistDraft},
};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::events::{ControllerEvent, Notifier, Toast, UiError, UiErrorContext};

/// "On success" notification handed to dialogs. Triggers a plain re-fetch
/// of the current query; it neither resets the page nor moves the epoch.
#[derive(Clone)]
pub struct Revalidate {
    tx: mpsc::UnboundedSender<ControllerEvent>,
}

impl Revalidate {
    pub(crate) fn new(tx: mpsc::UnboundedSender<ControllerEvent>) -> Self {
        Self { tx }
    }

    pub fn notify(&self) {
        if self.tx.send(ControllerEvent::Revalidate).is_err() {
            debug!("list controller is gone; revalidate dropped");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Create,
    Edit(ArtistId),
}

#[derive(Debug, Error)]
pub enum DialogError {
    #[error("artist name must not be empty")]
    EmptyName,
    #[error(transparent)]
    Client(#[from] ClientError),
}

pub struct ArtistDialog {
    kind: DialogKind,
    api: Arc<dyn ArtistsApi>,
    notifier: Arc<dyn Notifier>,
    on_success: Revalidate,
}

impl ArtistDialog {
    pub fn new(
        kind: DialogKind,
        api: Arc<dyn ArtistsApi>,
        notifier: Arc<dyn Notifier>,
        on_success: Revalidate,
    ) -> Self {
        Self {
            kind,
            api,
            notifier,
            on_success,
        }
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn header(&self) -> &'static str {
        match self.kind {
            DialogKind::Create => "Utwórz artystę",
            DialogKind::Edit(_) => "Edytuj artystę",
        }
    }

    fn context(&self) -> UiErrorContext {
        match self.kind {
            DialogKind::Create => UiErrorContext::CreateArtist,
            DialogKind::Edit(_) => UiErrorContext::EditArtist,
        }
    }

    /// Fetches the record being edited; create dialogs start empty.
    pub async fn load(&self) -> Result<Option<Artist>, DialogError> {
        let DialogKind::Edit(id) = self.kind else {
            return Ok(None);
        };
        match self.api.get_artist(id).await {
            Ok(artist) => Ok(Some(artist)),
            Err(err) => {
                let ui = UiError::from_client_error(UiErrorContext::LoadArtist, &err);
                self.notifier.notify(Toast::error(&ui));
                Err(err.into())
            }
        }
    }

    pub async fn submit(&self, draft: ArtistDraft) -> Result<Artist, DialogError> {
        let draft = ArtistDraft::new(draft.name.trim());
        if draft.name.is_empty() {
            let ui = UiError::validation(self.context(), DialogError::EmptyName.to_string());
            self.notifier.notify(Toast::error(&ui));
            return Err(DialogError::EmptyName);
        }

        let result = match self.kind {
            DialogKind::Create => self.api.create_artist(&draft).await,
            DialogKind::Edit(id) => self.api.update_artist(id, &draft).await,
        };

        match result {
            Ok(artist) => {
                info!(artist_id = %artist.id_artist, kind = ?self.kind, "artist saved");
                let summary = match self.kind {
                    DialogKind::Create => "Utworzono artystę",
                    DialogKind::Edit(_) => "Zapisano zmiany",
                };
                self.notifier.notify(Toast::success(summary, artist.name.clone()));
                self.on_success.notify();
                Ok(artist)
            }
            Err(err) => {
                let ui = UiError::from_client_error(self.context(), &err);
                self.notifier.notify(Toast::error(&ui));
                Err(err.into())
            }
        }
    }
}
