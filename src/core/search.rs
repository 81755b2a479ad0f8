use crate::domain::model::Book;
use crate::utils::error::LibraryError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Book attributes that can be searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Title,
    Author,
    Category,
    Isbn,
}

impl SearchField {
    pub const ALL: [Self; 4] = [Self::Title, Self::Author, Self::Category, Self::Isbn];

    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Category => "category",
            Self::Isbn => "isbn",
        }
    }

    pub fn value_of(self, book: &Book) -> Cow<'_, str> {
        match self {
            Self::Title => Cow::Borrowed(&book.title),
            Self::Author => Cow::Owned(book.author.to_string()),
            Self::Category => Cow::Borrowed(&book.category),
            Self::Isbn => Cow::Borrowed(&book.isbn),
        }
    }

    /// Case-insensitive exact match. An author also matches on either half
    /// of the name alone.
    pub fn matches(self, book: &Book, value: &str) -> bool {
        let wanted = value.to_lowercase();
        if self.value_of(book).to_lowercase() == wanted {
            return true;
        }

        match self {
            Self::Author => {
                book.author.given_name.to_lowercase() == wanted
                    || book.author.family_name.to_lowercase() == wanted
            }
            _ => false,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchField {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LibraryError::InvalidConfigValueError {
                field: "search field".to_string(),
                value: s.to_string(),
                reason: format!(
                    "Unknown field. Valid fields: {}",
                    Self::ALL.map(Self::name).join(", ")
                ),
            })
    }
}
