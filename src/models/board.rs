// src/models/board.rs

//! Public board item, tag and date-order types.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle tag of an inquiry thread.
///
/// Tags the backend sends that are not one of the four known values are
/// kept verbatim in `Other` so that a new server-side tag never breaks
/// decoding of the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tag {
    InProgress,
    Adopt,
    Reject,
    End,
    Other(String),
}

impl Tag {
    /// Wire representation of the tag.
    pub fn as_str(&self) -> &str {
        match self {
            Tag::InProgress => "IN_PROGRESS",
            Tag::Adopt => "ADOPT",
            Tag::Reject => "REJECT",
            Tag::End => "END",
            Tag::Other(raw) => raw,
        }
    }

    /// Display label; unknown tags pass through raw.
    pub fn label(&self) -> &str {
        match self {
            Tag::InProgress => "in progress",
            Tag::Adopt => "adopted",
            Tag::Reject => "rejected",
            Tag::End => "ended",
            Tag::Other(raw) => raw,
        }
    }

    /// Lenient parse for user input: case, `-` and spaces are ignored.
    ///
    /// Server tags go through the exact `From<String>` instead.
    pub fn parse_loose(input: &str) -> Self {
        let input = input.trim();
        let normalized = input.to_ascii_uppercase().replace(['-', ' '], "_");
        match Tag::from(normalized) {
            Tag::Other(_) => Tag::Other(input.to_string()),
            known => known,
        }
    }

    /// Whether the board list endpoint accepts this tag as a filter.
    pub fn is_filterable(&self) -> bool {
        matches!(self, Tag::Adopt | Tag::Reject)
    }
}

impl From<String> for Tag {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "IN_PROGRESS" => Tag::InProgress,
            "ADOPT" => Tag::Adopt,
            "REJECT" => Tag::Reject,
            "END" => Tag::End,
            _ => Tag::Other(raw),
        }
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Tag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Tag::parse_loose(s))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering of the public board list by creation date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateOrder {
    #[default]
    Recent,
    Oldest,
}

impl DateOrder {
    /// Wire representation used for the `datefilter` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            DateOrder::Recent => "RECENT",
            DateOrder::Oldest => "OLDEST",
        }
    }
}

impl FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recent" | "newest" => Ok(DateOrder::Recent),
            "oldest" => Ok(DateOrder::Oldest),
            other => Err(format!("unknown date order '{other}' (expected recent or oldest)")),
        }
    }
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inquiry thread as listed on the public board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardItem {
    /// Chat room identifier
    #[serde(rename = "chatRoomId")]
    pub id: i64,

    /// Editorial highlight
    #[serde(rename = "best", default)]
    pub is_best: bool,

    #[serde(rename = "likeCnt", default)]
    pub like_count: u64,

    #[serde(rename = "dislikeCnt", default)]
    pub dislike_count: u64,

    pub title: String,

    pub tag: Tag,

    /// Author display name
    #[serde(default)]
    pub author: String,

    /// Creation timestamp as sent by the server (ISO-8601)
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Filter parameters for the public board list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardFilter {
    pub date_order: Option<DateOrder>,
    pub tag: Option<Tag>,
}

impl BoardFilter {
    pub fn new(date_order: DateOrder) -> Self {
        Self {
            date_order: Some(date_order),
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::TagClass;

    #[test]
    fn user_input_tags_parse_loosely() {
        assert_eq!("adopt".parse::<Tag>().unwrap(), Tag::Adopt);
        assert_eq!("in-progress".parse::<Tag>().unwrap(), Tag::InProgress);
        assert_eq!(Tag::parse_loose(" end "), Tag::End);
        assert_eq!(Tag::parse_loose(" bogus "), Tag::Other("bogus".to_string()));
    }

    #[test]
    fn wire_tags_match_exactly() {
        let json = r#"{"chatRoomId":3,"best":false,"likeCnt":0,"dislikeCnt":0,
            "title":"t","tag":"adopt","author":"a","createdAt":"2024-01-05T00:00:00Z"}"#;
        let item: BoardItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.tag, Tag::Other("adopt".to_string()));
        assert_eq!(item.tag.label(), "adopt");
        assert_eq!(TagClass::of(&item), TagClass::Progress);
        assert_eq!(serde_json::to_string(&item.tag).unwrap(), "\"adopt\"");

        let tag: Tag = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(tag, Tag::Other("in-progress".to_string()));
    }

    #[test]
    fn unknown_tag_is_kept_raw() {
        let tag: Tag = serde_json::from_str("\"ARCHIVED\"").unwrap();
        assert_eq!(tag, Tag::Other("ARCHIVED".to_string()));
        assert_eq!(tag.label(), "ARCHIVED");
        assert_eq!(serde_json::to_string(&tag).unwrap(), "\"ARCHIVED\"");
    }

    #[test]
    fn only_adopt_and_reject_are_filterable() {
        assert!(Tag::Adopt.is_filterable());
        assert!(Tag::Reject.is_filterable());
        assert!(!Tag::InProgress.is_filterable());
        assert!(!Tag::End.is_filterable());
        assert!(!Tag::Other("X".into()).is_filterable());
    }

    #[test]
    fn board_item_uses_wire_names() {
        let json = r#"{"chatRoomId":7,"best":false,"likeCnt":2,"dislikeCnt":1,
            "title":"Library hours","tag":"REJECT","author":"kim","createdAt":"2024-03-01T09:00:00"}"#;
        let item: BoardItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.like_count, 2);
        assert_eq!(item.tag, Tag::Reject);
        assert_eq!(item.created_at, "2024-03-01T09:00:00");
    }

    #[test]
    fn date_order_parse() {
        assert_eq!("OLDEST".parse::<DateOrder>().unwrap(), DateOrder::Oldest);
        assert!("sideways".parse::<DateOrder>().is_err());
        assert_eq!(DateOrder::default().as_str(), "RECENT");
    }
}
