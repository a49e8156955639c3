//! List-state controller for the artist administration screen.
//!
//! [`ArtistListController`] owns a [`ListState`] and performs the I/O the
//! state asks for: every fetch runs on a spawned task and reports back as a
//! [`ControllerEvent`] that the owning task feeds into
//! [`ArtistListController::handle_event`]. All state mutation therefore
//! happens on a single task.

use std::{any::Any, sync::Arc};

use client_core::ArtistsApi;
use shared::{
    domain::ArtistId,
    protocol::{Artist, ArtistPage},
};
use tokio::{sync::mpsc, task::AbortHandle};
use tracing::{debug, info, warn};

pub mod dialogs;
pub mod events;
pub mod pagination;
pub mod state;
pub mod view;

pub use dialogs::{ArtistDialog, DialogError, DialogKind, Revalidate};
pub use events::{
    ControllerEvent, ControllerEvents, FetchError, Notifier, Toast, ToastSeverity, UiError, UiErrorCategory,
    UiErrorContext,
};
pub use pagination::{PageChange, DEFAULT_ROWS_PER_PAGE};
pub use state::{FetchTicket, ListState, SearchQuery, Settlement, Transition};
pub use view::{detail_route, ListView, EMPTY_MESSAGE, LIST_TITLE};

pub struct ArtistListController {
    state: ListState,
    api: Arc<dyn ArtistsApi>,
    notifier: Arc<dyn Notifier>,
    events_tx: mpsc::UnboundedSender<ControllerEvent>,
    in_flight: Option<AbortHandle>,
}

impl ArtistListController {
    pub fn new(
        api: Arc<dyn ArtistsApi>,
        notifier: Arc<dyn Notifier>,
        page_size: u32,
    ) -> (Self, ControllerEvents) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let controller = Self {
            state: ListState::new(page_size),
            api,
            notifier,
            events_tx,
            in_flight: None,
        };
        (controller, ControllerEvents::new(events_rx))
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn view(&self) -> ListView<'_> {
        ListView::from_state(&self.state)
    }

    pub fn mount(&mut self) -> bool {
        let transition = self.state.mount();
        self.run(transition)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.state.set_search(search);
    }

    /// Returns `false` when the action was ignored because a fetch is in flight.
    pub fn apply_filter(&mut self) -> bool {
        let transition = self.state.apply_filter();
        self.run(transition)
    }

    pub fn reset_filters(&mut self) -> bool {
        let transition = self.state.reset_filters();
        self.run(transition)
    }

    pub fn change_page(&mut self, change: PageChange) -> bool {
        let transition = self.state.change_page(change);
        self.run(transition)
    }

    /// Re-fetches the current query without touching the filter epoch.
    pub fn refresh_list(&mut self) -> u64 {
        let ticket = self.state.refresh_list();
        let seq = ticket.seq;
        self.dispatch(ticket);
        seq
    }

    pub fn edit_row(&mut self, artist_id: ArtistId) {
        self.state.edit_row(artist_id);
    }

    pub fn close_edit_dialog(&mut self) {
        self.state.close_edit_dialog();
    }

    pub fn open_create_dialog(&mut self) {
        self.state.open_create_dialog();
    }

    pub fn close_create_dialog(&mut self) {
        self.state.close_create_dialog();
    }

    pub fn detail_route(&self, artist: &Artist) -> String {
        detail_route(artist)
    }

    pub fn revalidate_handle(&self) -> Revalidate {
        Revalidate::new(self.events_tx.clone())
    }

    pub fn create_dialog(&self) -> ArtistDialog {
        ArtistDialog::new(
            DialogKind::Create,
            Arc::clone(&self.api),
            Arc::clone(&self.notifier),
            self.revalidate_handle(),
        )
    }

    /// Dialog for the row selected with [`Self::edit_row`], if any.
    pub fn edit_dialog(&self) -> Option<ArtistDialog> {
        let artist_id = self.state.selected_artist()?;
        Some(ArtistDialog::new(
            DialogKind::Edit(artist_id),
            Arc::clone(&self.api),
            Arc::clone(&self.notifier),
            self.revalidate_handle(),
        ))
    }

    pub fn handle_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::FetchSettled { seq, result } => self.settle(seq, result),
            ControllerEvent::Revalidate => {
                debug!("dialog mutation succeeded; re-fetching current query");
                self.refresh_list();
            }
        }
    }

    /// Feeds events into the controller until no fetch is in flight.
    pub async fn settle_pending(&mut self, events: &mut ControllerEvents) {
        while self.state.loading() {
            let Some(event) = events.recv().await else {
                break;
            };
            self.handle_event(event);
        }
    }

    fn settle(&mut self, seq: u64, result: Result<ArtistPage, FetchError>) {
        match self.state.settle(seq, result) {
            Settlement::Applied { current_page } => {
                self.in_flight = None;
                let count = self.state.artists().map_or(0, |page| page.count);
                info!(seq, current_page, count, "artist list refreshed");
            }
            Settlement::Failed(err) => {
                self.in_flight = None;
                warn!(seq, error = %err, "artist list fetch failed");
                let ui = UiError::from_fetch_error(UiErrorContext::ListArtists, &err);
                self.notifier.notify(Toast::error(&ui));
            }
            Settlement::Stale => {
                debug!(
                    seq,
                    latest = self.state.dispatched_seq(),
                    "discarding superseded fetch result"
                );
            }
        }
    }

    fn run(&mut self, transition: Transition) -> bool {
        match transition {
            Transition::Refetch(ticket) => {
                self.dispatch(ticket);
                true
            }
            Transition::Ignored => false,
        }
    }

    /// The request runs on its own task. A panic inside the `ArtistsApi`
    /// implementation settles `seq` as [`FetchError::Panicked`]; an abort
    /// settles nothing.
    fn dispatch(&mut self, ticket: FetchTicket) {
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }
        debug!(
            seq = ticket.seq,
            page = ticket.query.page,
            search = ?ticket.query.search,
            "dispatching artist list fetch"
        );
        let FetchTicket { seq, query } = ticket;
        let api = Arc::clone(&self.api);
        let request = tokio::spawn(async move { api.list_artists(&query).await });
        self.in_flight = Some(request.abort_handle());

        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = match request.await {
                Ok(result) => result.map_err(FetchError::from),
                Err(err) if err.is_cancelled() => return,
                Err(err) => Err(FetchError::Panicked(panic_message(err.into_panic()))),
            };
            let _ = events_tx.send(ControllerEvent::FetchSettled { seq, result });
        });
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => payload
            .downcast_ref::<&str>()
            .map_or_else(|| "unknown panic".to_string(), |message| message.to_string()),
    }
}

impl Drop for ArtistListController {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
