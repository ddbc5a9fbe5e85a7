// src/controller/view.rs

//! Board view state and per-item display classification.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::controller::planner::RequestMode;
use crate::models::{BoardItem, Tag};

/// Snapshot of what the board currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    /// Items from the latest completed request
    pub items: Vec<BoardItem>,
    /// A request is outstanding
    pub loading: bool,
    /// Failure message; when set, `items` is empty
    pub error: Option<String>,
    /// Generation of the request this view belongs to
    pub generation: u64,
    /// Mode of the latest planned request
    pub mode: Option<RequestMode>,
}

impl BoardView {
    pub fn rows(&self) -> Vec<BoardRow> {
        self.items.iter().map(BoardRow::from_item).collect()
    }
}

/// Style class of a board item badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    Best,
    Progress,
    Adopt,
    Reject,
    End,
}

impl TagClass {
    /// Class for an item; best posts override the tag.
    pub fn of(item: &BoardItem) -> Self {
        Self::for_tag(&item.tag, item.is_best)
    }

    pub fn for_tag(tag: &Tag, is_best: bool) -> Self {
        if is_best {
            return TagClass::Best;
        }
        match tag {
            Tag::Adopt => TagClass::Adopt,
            Tag::Reject => TagClass::Reject,
            Tag::End => TagClass::End,
            Tag::InProgress | Tag::Other(_) => TagClass::Progress,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TagClass::Best => "tag-best",
            TagClass::Progress => "tag-progress",
            TagClass::Adopt => "tag-adopt",
            TagClass::Reject => "tag-reject",
            TagClass::End => "tag-end",
        }
    }
}

/// Format a timestamp as `YYYY.MM.DD` in the local calendar.
pub fn format_date(raw: &str) -> String {
    format_date_in(raw, &Local)
}

/// Format a timestamp as `YYYY.MM.DD` in the calendar of `tz`.
///
/// Timestamps with an offset are converted to `tz`; offset-less ones are
/// already wall-clock time and are used as is. Unparseable text is returned
/// unchanged.
pub fn format_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String {
    let raw = raw.trim();
    let date = if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        Some(dt.with_timezone(tz).date_naive())
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Some(naive.date())
    } else {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    };

    match date {
        Some(date) => date.format("%Y.%m.%d").to_string(),
        None => raw.to_string(),
    }
}

/// One rendered line of the board list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRow {
    pub id: i64,
    pub best: bool,
    pub label: String,
    pub class: TagClass,
    pub title: String,
    pub author: String,
    pub date: String,
    pub likes: u64,
    pub dislikes: u64,
}

impl BoardRow {
    pub fn from_item(item: &BoardItem) -> Self {
        Self {
            id: item.id,
            best: item.is_best,
            label: item.tag.label().to_string(),
            class: TagClass::of(item),
            title: item.title.clone(),
            author: item.author.clone(),
            date: format_date(&item.created_at),
            likes: item.like_count,
            dislikes: item.dislike_count,
        }
    }
}

impl fmt::Display for BoardRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:<5} ", self.id)?;
        if self.best {
            write!(f, "[best] ")?;
        }
        write!(
            f,
            "[{}] {}  ({}, {})  +{} -{}",
            self.label, self.title, self.author, self.date, self.likes, self.dislikes
        )
    }
}
