use crate::utils::error::LibraryError;
use std::fmt;

/// Status message emitted after every library operation.
#[derive(Debug)]
pub enum Notification<'a> {
    BookAdded { title: &'a str },
    /// `released` names the members whose loans of the book were dropped.
    BookRemoved {
        title: &'a str,
        released: &'a [String],
    },
    MemberRegistered { name: &'a str },
    /// `released` lists the titles the member no longer holds.
    MemberUnregistered {
        name: &'a str,
        released: &'a [String],
    },
    BookLoaned { title: &'a str, member_name: &'a str },
    BookReturned { title: &'a str, member_name: &'a str },
    SearchResults {
        field: &'a str,
        value: &'a str,
        matches: &'a [String],
    },
    LoanListing {
        member_name: &'a str,
        books: &'a [String],
    },
    Failed {
        operation: &'static str,
        error: &'a LibraryError,
    },
}

impl Notification<'_> {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for Notification<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BookAdded { title } => write!(f, "Book '{title}' added to the library."),
            Self::BookRemoved { title, released } => {
                write!(f, "Book '{title}' has been removed from the library.")?;
                if !released.is_empty() {
                    write!(f, " Loans released: {}.", released.join(", "))?;
                }
                Ok(())
            }
            Self::MemberRegistered { name } => write!(f, "Member '{name}' registered."),
            Self::MemberUnregistered { name, released } => {
                write!(f, "Member '{name}' unregistered.")?;
                if !released.is_empty() {
                    write!(f, " Books released: {}.", released.join(", "))?;
                }
                Ok(())
            }
            Self::BookLoaned { title, member_name } => {
                write!(f, "Book '{title}' loaned to '{member_name}'.")
            }
            Self::BookReturned { title, member_name } => {
                write!(f, "Book '{title}' returned by '{member_name}'.")
            }
            Self::SearchResults {
                field,
                value,
                matches,
            } => {
                if matches.is_empty() {
                    return write!(f, "No books found with {field} '{value}'.");
                }
                write!(f, "Books with {field} '{value}':")?;
                for book in matches.iter() {
                    write!(f, "\n  {book}")?;
                }
                Ok(())
            }
            Self::LoanListing { member_name, books } => {
                if books.is_empty() {
                    return write!(f, "No books loaned to '{member_name}'.");
                }
                write!(f, "Books loaned to '{member_name}':")?;
                for book in books.iter() {
                    write!(f, "\n  {book}")?;
                }
                Ok(())
            }
            Self::Failed { operation, error } => write!(f, "{operation} failed: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_listing_message() {
        let notification = Notification::LoanListing {
            member_name: "María Pérez",
            books: &[],
        };
        assert_eq!(notification.to_string(), "No books loaned to 'María Pérez'.");
    }

    #[test]
    fn test_removal_lists_released_loans() {
        let plain = Notification::BookRemoved {
            title: "T1",
            released: &[],
        };
        assert_eq!(plain.to_string(), "Book 'T1' has been removed from the library.");

        let released = vec!["One".to_string(), "Two".to_string()];
        let cascaded = Notification::BookRemoved {
            title: "T1",
            released: &released,
        };
        assert_eq!(
            cascaded.to_string(),
            "Book 'T1' has been removed from the library. Loans released: One, Two."
        );
    }

    #[test]
    fn test_search_results_message() {
        let matches = vec!["T1 by A B - Category: C - ISBN: A".to_string()];
        let notification = Notification::SearchResults {
            field: "title",
            value: "t1",
            matches: &matches,
        };
        assert_eq!(
            notification.to_string(),
            "Books with title 't1':\n  T1 by A B - Category: C - ISBN: A"
        );
    }

    #[test]
    fn test_failure_message() {
        let error = LibraryError::MemberNotFound {
            member_id: "009".to_string(),
        };
        let notification = Notification::Failed {
            operation: "loan_book",
            error: &error,
        };
        assert!(notification.is_failure());
        assert_eq!(
            notification.to_string(),
            "loan_book failed: No member registered with ID 009"
        );
    }
}
