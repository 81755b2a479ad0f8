use crate::core::library::Library;
use crate::core::search::SearchField;
use crate::domain::model::{Author, Book, Member};
use crate::domain::ports::Notifier;
use crate::utils::error::{ErrorKind, LibraryError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One library operation expressed as data, so a whole session can be
/// scripted in a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Action {
    AddBook { book: Book },
    RemoveBook { isbn: String },
    RegisterMember { name: String, id: String },
    UnregisterMember { member_id: String },
    LoanBook { isbn: String, member_id: String },
    ReturnBook { isbn: String, member_id: String },
    SearchBooks { field: SearchField, value: String },
    ListLoans { member_id: String },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddBook { .. } => "add_book",
            Self::RemoveBook { .. } => "remove_book",
            Self::RegisterMember { .. } => "register_member",
            Self::UnregisterMember { .. } => "unregister_member",
            Self::LoanBook { .. } => "loan_book",
            Self::ReturnBook { .. } => "return_book",
            Self::SearchBooks { .. } => "search_books",
            Self::ListLoans { .. } => "list_loans",
        }
    }

    pub fn apply<N: Notifier>(&self, library: &mut Library<N>) -> ActionOutcome {
        let result: Result<Vec<Book>, LibraryError> = match self {
            Self::AddBook { book } => library.add_book(book.clone()).map(|()| Vec::new()),
            Self::RemoveBook { isbn } => library
                .remove_book(isbn)
                .map(|book| vec![book.as_ref().clone()]),
            Self::RegisterMember { name, id } => library
                .register_member(Member::new(name.as_str(), id.as_str()))
                .map(|()| Vec::new()),
            Self::UnregisterMember { member_id } => {
                library.unregister_member(member_id).map(|_| Vec::new())
            }
            Self::LoanBook { isbn, member_id } => {
                library.loan_book(isbn, member_id).map(|()| Vec::new())
            }
            Self::ReturnBook { isbn, member_id } => library
                .return_book(isbn, member_id)
                .map(|book| vec![book.as_ref().clone()]),
            Self::SearchBooks { field, value } => Ok(library
                .search_books(*field, value)
                .into_iter()
                .cloned()
                .collect()),
            Self::ListLoans { member_id } => library
                .list_loans(member_id)
                .map(|books| books.into_iter().cloned().collect()),
        };

        match result {
            Ok(books) => ActionOutcome {
                action: self.to_string(),
                ok: true,
                error: None,
                error_kind: None,
                books,
            },
            Err(err) => ActionOutcome {
                action: self.to_string(),
                ok: false,
                error: Some(err.to_string()),
                error_kind: Some(err.kind()),
                books: Vec::new(),
            },
        }
    }

    /// The walkthrough the command-line driver runs when no script is given.
    pub fn demo_script() -> Vec<Self> {
        let first = "978-3-16-148410-0";
        let second = "978-1-23-456789-7";

        vec![
            Self::AddBook {
                book: Book::new(
                    "Cien años de soledad",
                    Author::new("Gabriel", "García Márquez"),
                    "Ficción",
                    first,
                ),
            },
            Self::AddBook {
                book: Book::new(
                    "El Quijote",
                    Author::new("Miguel", "de Cervantes"),
                    "Clásico",
                    second,
                ),
            },
            Self::RegisterMember {
                name: "Clinton Alvarado".to_string(),
                id: "001".to_string(),
            },
            Self::RegisterMember {
                name: "María Pérez".to_string(),
                id: "002".to_string(),
            },
            Self::LoanBook {
                isbn: first.to_string(),
                member_id: "001".to_string(),
            },
            Self::LoanBook {
                isbn: second.to_string(),
                member_id: "002".to_string(),
            },
            Self::ListLoans {
                member_id: "001".to_string(),
            },
            Self::ReturnBook {
                isbn: first.to_string(),
                member_id: "001".to_string(),
            },
            Self::SearchBooks {
                field: SearchField::Title,
                value: "Cien años de soledad".to_string(),
            },
            Self::UnregisterMember {
                member_id: "002".to_string(),
            },
        ]
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddBook { book } => write!(f, "add_book({})", book.isbn),
            Self::RemoveBook { isbn } => write!(f, "remove_book({isbn})"),
            Self::RegisterMember { id, .. } => write!(f, "register_member({id})"),
            Self::UnregisterMember { member_id } => write!(f, "unregister_member({member_id})"),
            Self::LoanBook { isbn, member_id } => write!(f, "loan_book({isbn}, {member_id})"),
            Self::ReturnBook { isbn, member_id } => write!(f, "return_book({isbn}, {member_id})"),
            Self::SearchBooks { field, value } => write!(f, "search_books({field}, {value})"),
            Self::ListLoans { member_id } => write!(f, "list_loans({member_id})"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionOutcome {
    pub action: String,
    pub ok: bool,
    pub error: Option<String>,
    pub error_kind: Option<ErrorKind>,
    /// Books the operation produced: search hits, listed loans, or the book
    /// that was removed or returned.
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub outcomes: Vec<ActionOutcome>,
    pub succeeded: usize,
    pub failed: usize,
    pub book_count: usize,
    pub member_count: usize,
}

/// Replays actions against a library. A failed action is recorded and the
/// session moves on to the next one.
#[derive(Debug)]
pub struct Session<N: Notifier> {
    library: Library<N>,
}

impl<N: Notifier> Session<N> {
    pub fn new(library: Library<N>) -> Self {
        Self { library }
    }

    pub fn run(&mut self, actions: &[Action]) -> SessionSummary {
        tracing::debug!("Running session with {} action(s)", actions.len());

        let outcomes: Vec<ActionOutcome> = actions
            .iter()
            .map(|action| {
                let outcome = action.apply(&mut self.library);
                if let Some(kind) = outcome.error_kind {
                    tracing::debug!("{} -> {:?}", outcome.action, kind);
                }
                outcome
            })
            .collect();

        let failed = outcomes.iter().filter(|outcome| !outcome.ok).count();
        SessionSummary {
            succeeded: outcomes.len() - failed,
            failed,
            book_count: self.library.book_count(),
            member_count: self.library.member_count(),
            outcomes,
        }
    }

    pub fn library(&self) -> &Library<N> {
        &self.library
    }

    pub fn into_library(self) -> Library<N> {
        self.library
    }
}
