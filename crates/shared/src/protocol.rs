use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{ArtistId, FIRST_PAGE};

/// Artist record as served by the remote service.
///
/// Only `idArtist` and `name` are interpreted by clients; any other field is
/// carried through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id_artist: ArtistId,
    pub name: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Artist {
    pub fn new(id_artist: ArtistId, name: impl Into<String>) -> Self {
        Self {
            id_artist,
            name: name.into(),
            extra: BTreeMap::new(),
        }
    }
}

/// One server-side page of the artist listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistPage {
    pub results: Vec<Artist>,
    pub count: u64,
    pub current_page: u32,
}

/// Query string of `GET /artists`. An absent `search` means "no filter".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListArtistsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub page: u32,
}

impl ListArtistsQuery {
    pub fn new(search: &str, page: u32) -> Self {
        Self {
            search: (!search.is_empty()).then(|| search.to_string()),
            page: page.max(FIRST_PAGE),
        }
    }
}

/// Request body for creating or editing an artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistDraft {
    pub name: String,
}

impl ArtistDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
