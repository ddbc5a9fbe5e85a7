// src/controller/planner.rs

//! Board query planning.
//!
//! Turns the current filter state and session into the single request the
//! board should issue next. Pure: no I/O, no clock.

use crate::error::Result;
use crate::models::{BoardFilter, DateOrder, Tag};
use crate::services::ensure_filterable;
use crate::session::Session;

/// Filter and search state owned by the board controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub date_order: DateOrder,
    pub tag: Option<Tag>,
    pub search_query: String,
}

impl FilterState {
    pub fn new(date_order: DateOrder) -> Self {
        Self {
            date_order,
            ..Self::default()
        }
    }

    /// Trimmed search text, if any.
    pub fn search_text(&self) -> Option<&str> {
        let text = self.search_query.trim();
        (!text.is_empty()).then_some(text)
    }
}

/// Request the board should dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardRequest {
    /// List with date order and optional tag
    Filter(BoardFilter),
    /// Free-text search; date order and tag are ignored
    Search(String),
}

impl BoardRequest {
    pub fn mode(&self) -> RequestMode {
        match self {
            BoardRequest::Filter(_) => RequestMode::Filter,
            BoardRequest::Search(_) => RequestMode::Search,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    Filter,
    Search,
}

/// Plan the next board request.
///
/// A non-empty trimmed search query always selects search mode. In filter
/// mode the tag must be `ADOPT` or `REJECT`; the list service checks this
/// again on its own.
pub fn plan(state: &FilterState, session: &Session) -> Result<BoardRequest> {
    session.credential()?;

    if let Some(text) = state.search_text() {
        return Ok(BoardRequest::Search(text.to_string()));
    }

    if let Some(tag) = &state.tag {
        ensure_filterable(tag)?;
    }

    Ok(BoardRequest::Filter(BoardFilter {
        date_order: Some(state.date_order),
        tag: state.tag.clone(),
    }))
}
