//! Student roster entry.

use serde::{Deserialize, Serialize};

/// A student as returned by the admin user listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    #[serde(rename = "userId")]
    pub user_id: i64,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub name: String,
}

impl Student {
    /// Case-insensitive match on name or email, plain substring on the id.
    ///
    /// `needle` must already be lower-cased.
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.user_id.to_string().contains(needle)
    }
}

/// Filter a roster by a free-text query, preserving order.
pub fn filter_students<'a>(students: &'a [Student], query: &str) -> Vec<&'a Student> {
    let query = query.trim();
    if query.is_empty() {
        return students.iter().collect();
    }

    let needle = query.to_lowercase();
    students.iter().filter(|s| s.matches(&needle)).collect()
}
