//! Note entity for incidents, communications and action items.

use crate::model::EntityId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Closed set of note categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteCategory {
    School,
    Home,
    Health,
}

impl NoteCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::School => "School",
            Self::Home => "Home",
            Self::Health => "Health",
        }
    }
}

impl Display for NoteCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for category values coming from form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNoteCategory(pub String);

impl Display for UnknownNoteCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown note category `{}`; expected School|Home|Health",
            self.0
        )
    }
}

impl Error for UnknownNoteCategory {}

impl FromStr for NoteCategory {
    type Err = UnknownNoteCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "school" => Ok(Self::School),
            "home" => Ok(Self::Home),
            "health" => Ok(Self::Health),
            _ => Err(UnknownNoteCategory(value.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: EntityId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub category: NoteCategory,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_items: Option<String>,
}

impl Note {
    pub fn new(title: impl Into<String>, category: NoteCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            date: None,
            category,
            summary: String::new(),
            action_items: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NoteCategory;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("health".parse::<NoteCategory>().unwrap(), NoteCategory::Health);
        assert_eq!(" School ".parse::<NoteCategory>().unwrap(), NoteCategory::School);
        assert!("work".parse::<NoteCategory>().is_err());
    }
}
