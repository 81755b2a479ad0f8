use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub given_name: String,
    pub family_name: String,
}

impl Author {
    pub fn new(given_name: impl Into<String>, family_name: impl Into<String>) -> Self {
        Self {
            given_name: given_name.into(),
            family_name: family_name.into(),
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.given_name, self.family_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: Author,
    pub category: String,
    pub isbn: String,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: Author,
        category: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author,
            category: category.into(),
            isbn: isbn.into(),
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} - Category: {} - ISBN: {}",
            self.title, self.author, self.category, self.isbn
        )
    }
}

/// A book currently held by a member. `book` is the same allocation the
/// catalog indexes, so both views always describe one object.
#[derive(Debug, Clone)]
pub struct Loan {
    pub book: Rc<Book>,
    pub loaned_at: DateTime<Utc>,
}

impl Loan {
    pub fn isbn(&self) -> &str {
        &self.book.isbn
    }
}

#[derive(Debug, Clone)]
pub struct Member {
    pub name: String,
    pub id: String,
    loans: Vec<Loan>,
}

impl Member {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            loans: Vec::new(),
        }
    }

    /// Loans in the order they were made.
    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn borrowed_books(&self) -> impl Iterator<Item = &Book> + '_ {
        self.loans.iter().map(|loan| loan.book.as_ref())
    }

    pub fn has_loan(&self, isbn: &str) -> bool {
        self.loans.iter().any(|loan| loan.isbn() == isbn)
    }

    pub(crate) fn push_loan(&mut self, loan: Loan) {
        self.loans.push(loan);
    }

    pub(crate) fn take_loan(&mut self, isbn: &str) -> Option<Loan> {
        let position = self.loans.iter().position(|loan| loan.isbn() == isbn)?;
        Some(self.loans.remove(position))
    }

    pub(crate) fn drain_loans(&mut self) -> Vec<Loan> {
        std::mem::take(&mut self.loans)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Member: {} - ID: {}", self.name, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BookStatus {
    Available,
    Loaned { member_ids: Vec<String> },
}
