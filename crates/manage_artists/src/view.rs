//! Read-only snapshot of the list state for whatever renders the table.

use client_core::generate_id_string;
use shared::{domain::ArtistId, protocol::Artist};

use crate::{
    pagination::{first_for_page, page_count},
    state::ListState,
};

pub const LIST_TITLE: &str = "Artyści";
pub const EMPTY_MESSAGE: &str = "Nie znaleziono artystów";

#[derive(Debug, Clone, PartialEq)]
pub struct ListView<'a> {
    pub rows: &'a [Artist],
    pub total_records: u64,
    pub page: u32,
    pub page_count: u32,
    pub first: u64,
    pub page_size: u32,
    pub search: &'a str,
    pub loading: bool,
    /// Filter and reset buttons are disabled while a fetch is in flight.
    pub actions_enabled: bool,
    pub show_empty_message: bool,
    pub create_dialog_visible: bool,
    pub edit_dialog_visible: bool,
    pub selected_artist: Option<ArtistId>,
}

impl<'a> ListView<'a> {
    pub fn from_state(state: &'a ListState) -> Self {
        let (rows, total_records) = match state.artists() {
            Some(page) => (page.results.as_slice(), page.count),
            None => (&[][..], 0),
        };
        let loading = state.loading();
        Self {
            rows,
            total_records,
            page: state.page(),
            page_count: page_count(total_records, state.page_size()),
            first: first_for_page(state.page(), state.page_size()),
            page_size: state.page_size(),
            search: state.search(),
            loading,
            actions_enabled: !loading,
            show_empty_message: !loading && rows.is_empty(),
            create_dialog_visible: state.create_dialog_visible(),
            edit_dialog_visible: state.edit_dialog_visible(),
            selected_artist: state.selected_artist(),
        }
    }
}

/// Route of the public detail page for an artist row.
pub fn detail_route(artist: &Artist) -> String {
    format!("/artists/{}", generate_id_string(&artist.name, artist.id_artist))
}
