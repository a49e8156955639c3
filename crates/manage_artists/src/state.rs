//! Sans-IO list state: search text, page, loading flag, the last fetched page
//! and the filter epoch that decides when the listing must be re-fetched.

use shared::{
    domain::{ArtistId, FIRST_PAGE},
    protocol::{ArtistPage, ListArtistsQuery},
};

use crate::{
    events::FetchError,
    pagination::{page_for_first, PageChange, DEFAULT_ROWS_PER_PAGE},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub search: String,
    pub page: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: FIRST_PAGE,
        }
    }
}

impl SearchQuery {
    pub fn to_request(&self) -> ListArtistsQuery {
        ListArtistsQuery::new(&self.search, self.page)
    }
}

/// A dispatched listing request. `seq` is strictly increasing per state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub query: ListArtistsQuery,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Nothing to fetch, or the action was blocked by an in-flight fetch.
    Ignored,
    Refetch(FetchTicket),
}

impl Transition {
    pub fn ticket(&self) -> Option<&FetchTicket> {
        match self {
            Self::Refetch(ticket) => Some(ticket),
            Self::Ignored => None,
        }
    }
}

#[derive(Debug)]
pub enum Settlement {
    Applied { current_page: u32 },
    Failed(FetchError),
    /// A newer fetch was dispatched after this one; its result was dropped.
    Stale,
}

#[derive(Debug)]
pub struct ListState {
    query: SearchQuery,
    page_size: u32,
    filter_epoch: u64,
    observed_epoch: u64,
    loading: bool,
    artists: Option<ArtistPage>,
    dispatched_seq: u64,
    selected_artist: Option<ArtistId>,
    create_dialog_visible: bool,
    edit_dialog_visible: bool,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS_PER_PAGE)
    }
}

impl ListState {
    pub fn new(page_size: u32) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_ROWS_PER_PAGE
        } else {
            page_size
        };
        Self {
            query: SearchQuery::default(),
            page_size,
            filter_epoch: 0,
            observed_epoch: 0,
            loading: false,
            artists: None,
            dispatched_seq: 0,
            selected_artist: None,
            create_dialog_visible: false,
            edit_dialog_visible: false,
        }
    }

    pub fn search(&self) -> &str {
        &self.query.search
    }

    pub fn page(&self) -> u32 {
        self.query.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn artists(&self) -> Option<&ArtistPage> {
        self.artists.as_ref()
    }

    pub fn filter_epoch(&self) -> u64 {
        self.filter_epoch
    }

    pub fn dispatched_seq(&self) -> u64 {
        self.dispatched_seq
    }

    pub fn selected_artist(&self) -> Option<ArtistId> {
        self.selected_artist
    }

    pub fn create_dialog_visible(&self) -> bool {
        self.create_dialog_visible
    }

    pub fn edit_dialog_visible(&self) -> bool {
        self.edit_dialog_visible
    }

    /// Updates the local search text. Never triggers a fetch.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn set_page(&mut self, page: u32) {
        self.query.page = page.max(FIRST_PAGE);
    }

    /// Initial load: the first epoch always fetches page one.
    pub fn mount(&mut self) -> Transition {
        if self.filter_epoch != 0 {
            return Transition::Ignored;
        }
        self.query.page = FIRST_PAGE;
        self.bump_epoch()
    }

    pub fn apply_filter(&mut self) -> Transition {
        if self.loading {
            return Transition::Ignored;
        }
        self.query.page = FIRST_PAGE;
        self.bump_epoch()
    }

    pub fn reset_filters(&mut self) -> Transition {
        if self.loading {
            return Transition::Ignored;
        }
        self.query.search.clear();
        self.query.page = FIRST_PAGE;
        self.bump_epoch()
    }

    /// Paginator navigation. The page size is fixed per state, so the
    /// event's own `rows` is not trusted for the index computation.
    pub fn change_page(&mut self, change: PageChange) -> Transition {
        if self.loading {
            return Transition::Ignored;
        }
        if change.rows != self.page_size {
            tracing::debug!(
                event_rows = change.rows,
                page_size = self.page_size,
                "paginator page size differs from configured page size"
            );
        }
        self.query.page = page_for_first(change.first, self.page_size);
        self.bump_epoch()
    }

    fn bump_epoch(&mut self) -> Transition {
        self.filter_epoch += 1;
        self.observe_epoch()
    }

    /// Issues exactly one fetch per epoch change.
    pub fn observe_epoch(&mut self) -> Transition {
        if self.filter_epoch == self.observed_epoch {
            return Transition::Ignored;
        }
        self.observed_epoch = self.filter_epoch;
        Transition::Refetch(self.refresh_list())
    }

    /// Plain re-fetch of the current query. Clears the displayed page so the
    /// view shows a loading state instead of stale rows.
    pub fn refresh_list(&mut self) -> FetchTicket {
        self.loading = true;
        self.artists = None;
        self.dispatched_seq += 1;
        FetchTicket {
            seq: self.dispatched_seq,
            query: self.query.to_request(),
        }
    }

    pub fn settle(&mut self, seq: u64, result: Result<ArtistPage, FetchError>) -> Settlement {
        if seq != self.dispatched_seq {
            return Settlement::Stale;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                let current_page = page.current_page.max(FIRST_PAGE);
                self.query.page = current_page;
                self.artists = Some(page);
                Settlement::Applied { current_page }
            }
            Err(err) => Settlement::Failed(err),
        }
    }

    pub fn edit_row(&mut self, artist_id: ArtistId) {
        self.selected_artist = Some(artist_id);
        self.edit_dialog_visible = true;
    }

    pub fn close_edit_dialog(&mut self) {
        self.edit_dialog_visible = false;
        self.selected_artist = None;
    }

    pub fn open_create_dialog(&mut self) {
        self.create_dialog_visible = true;
    }

    pub fn close_create_dialog(&mut self) {
        self.create_dialog_visible = false;
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
