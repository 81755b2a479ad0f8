use crate::adapters::notifier::TracingNotifier;
use crate::core::policy::{LibraryPolicy, LoanExclusivity, OutstandingLoanPolicy};
use crate::core::search::SearchField;
use crate::domain::model::{Book, BookStatus, Loan, Member};
use crate::domain::notification::Notification;
use crate::domain::ports::Notifier;
use crate::utils::error::{LibraryError, Result};
use crate::utils::validation::is_standard_isbn;
use chrono::Utc;
use std::collections::BTreeMap;
use std::rc::Rc;

/// In-memory catalog of books and registry of members.
///
/// Every mutating operation, search and loan listing reports its outcome to
/// the notifier exactly once, whether it succeeds or fails. Loans released by
/// a cascading removal are part of that one notification. Plain lookups
/// (`book`, `member`, `book_status`, ...) are silent.
#[derive(Debug)]
pub struct Library<N: Notifier = TracingNotifier> {
    books: BTreeMap<String, Rc<Book>>,
    members: BTreeMap<String, Member>,
    policy: LibraryPolicy,
    notifier: N,
}

impl Default for Library {
    fn default() -> Self {
        Self::new(LibraryPolicy::default(), TracingNotifier)
    }
}

impl<N: Notifier> Library<N> {
    pub fn new(policy: LibraryPolicy, notifier: N) -> Self {
        Self {
            books: BTreeMap::new(),
            members: BTreeMap::new(),
            policy,
            notifier,
        }
    }

    pub fn with_notifier(notifier: N) -> Self {
        Self::new(LibraryPolicy::default(), notifier)
    }

    pub fn policy(&self) -> LibraryPolicy {
        self.policy
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn report<T>(notifier: &N, operation: &'static str, error: LibraryError) -> Result<T> {
        notifier.notify(&Notification::Failed {
            operation,
            error: &error,
        });
        Err(error)
    }

    pub fn add_book(&mut self, book: Book) -> Result<()> {
        if self.books.contains_key(&book.isbn) {
            return Self::report(
                &self.notifier,
                "add_book",
                LibraryError::BookAlreadyExists { isbn: book.isbn },
            );
        }

        if !is_standard_isbn(&book.isbn) {
            tracing::debug!("ISBN '{}' is not in ISBN-10/13 form", book.isbn);
        }

        self.notifier
            .notify(&Notification::BookAdded { title: &book.title });
        self.books.insert(book.isbn.clone(), Rc::new(book));
        Ok(())
    }

    pub fn remove_book(&mut self, isbn: &str) -> Result<Rc<Book>> {
        let Some(book) = self.books.get(isbn).cloned() else {
            return Self::report(
                &self.notifier,
                "remove_book",
                LibraryError::BookNotFound {
                    isbn: isbn.to_string(),
                },
            );
        };

        let holders = self.holder_ids(isbn);
        let mut released = Vec::new();
        match self.policy.on_outstanding_loans {
            OutstandingLoanPolicy::Block if !holders.is_empty() => {
                return Self::report(
                    &self.notifier,
                    "remove_book",
                    LibraryError::OutstandingLoans {
                        subject: format!("Book '{}'", book.title),
                        count: holders.len(),
                    },
                );
            }
            OutstandingLoanPolicy::Cascade => {
                for member in self.members.values_mut() {
                    if member.take_loan(isbn).is_some() {
                        released.push(member.name.clone());
                    }
                }
            }
            OutstandingLoanPolicy::Block | OutstandingLoanPolicy::Ignore => {
                if !holders.is_empty() {
                    tracing::debug!(
                        "Removing '{}' while still loaned to {:?}",
                        book.title,
                        holders
                    );
                }
            }
        }

        self.books.remove(isbn);
        self.notifier.notify(&Notification::BookRemoved {
            title: &book.title,
            released: &released,
        });
        Ok(book)
    }

    pub fn register_member(&mut self, member: Member) -> Result<()> {
        if self.members.contains_key(&member.id) {
            return Self::report(
                &self.notifier,
                "register_member",
                LibraryError::MemberAlreadyExists {
                    member_id: member.id,
                },
            );
        }

        self.notifier
            .notify(&Notification::MemberRegistered { name: &member.name });
        self.members.insert(member.id.clone(), member);
        Ok(())
    }

    /// Under `Ignore` the returned member still lists the loans it held; the
    /// library no longer tracks them.
    pub fn unregister_member(&mut self, member_id: &str) -> Result<Member> {
        let Some(mut member) = self.members.remove(member_id) else {
            return Self::report(
                &self.notifier,
                "unregister_member",
                LibraryError::MemberNotFound {
                    member_id: member_id.to_string(),
                },
            );
        };

        let outstanding = member.loans().len();
        if outstanding > 0 && self.policy.on_outstanding_loans == OutstandingLoanPolicy::Block {
            let error = LibraryError::OutstandingLoans {
                subject: format!("Member '{}'", member.name),
                count: outstanding,
            };
            self.members.insert(member.id.clone(), member);
            return Self::report(&self.notifier, "unregister_member", error);
        }

        let released: Vec<String> =
            if self.policy.on_outstanding_loans == OutstandingLoanPolicy::Cascade {
                member
                    .drain_loans()
                    .into_iter()
                    .map(|loan| loan.book.title.clone())
                    .collect()
            } else {
                Vec::new()
            };

        self.notifier.notify(&Notification::MemberUnregistered {
            name: &member.name,
            released: &released,
        });
        Ok(member)
    }

    pub fn loan_book(&mut self, isbn: &str, member_id: &str) -> Result<()> {
        let Some(book) = self.books.get(isbn).cloned() else {
            return Self::report(
                &self.notifier,
                "loan_book",
                LibraryError::BookNotFound {
                    isbn: isbn.to_string(),
                },
            );
        };

        let other_holder = match self.policy.exclusivity {
            LoanExclusivity::Exclusive => self
                .members
                .values()
                .find(|other| other.id != member_id && other.has_loan(isbn))
                .map(|holder| holder.id.clone()),
            LoanExclusivity::PerMember => None,
        };

        let Some(member) = self.members.get_mut(member_id) else {
            return Self::report(
                &self.notifier,
                "loan_book",
                LibraryError::MemberNotFound {
                    member_id: member_id.to_string(),
                },
            );
        };

        if member.has_loan(isbn) {
            return Self::report(
                &self.notifier,
                "loan_book",
                LibraryError::AlreadyLoaned {
                    isbn: isbn.to_string(),
                    title: book.title.clone(),
                    member_id: member_id.to_string(),
                },
            );
        }

        if let Some(holder_id) = other_holder {
            return Self::report(
                &self.notifier,
                "loan_book",
                LibraryError::LoanedToAnotherMember {
                    isbn: isbn.to_string(),
                    title: book.title.clone(),
                    holder_id,
                },
            );
        }

        member.push_loan(Loan {
            book: Rc::clone(&book),
            loaned_at: Utc::now(),
        });
        self.notifier.notify(&Notification::BookLoaned {
            title: &book.title,
            member_name: &member.name,
        });
        Ok(())
    }

    pub fn return_book(&mut self, isbn: &str, member_id: &str) -> Result<Rc<Book>> {
        let Some(member) = self.members.get_mut(member_id) else {
            return Self::report(
                &self.notifier,
                "return_book",
                LibraryError::MemberNotFound {
                    member_id: member_id.to_string(),
                },
            );
        };

        let Some(loan) = member.take_loan(isbn) else {
            return Self::report(
                &self.notifier,
                "return_book",
                LibraryError::NotLoanedToMember {
                    isbn: isbn.to_string(),
                    member_id: member_id.to_string(),
                },
            );
        };

        self.notifier.notify(&Notification::BookReturned {
            title: &loan.book.title,
            member_name: &member.name,
        });
        Ok(loan.book)
    }

    /// Books whose `field` equals `value`, ignoring case, in ISBN order.
    pub fn search_books(&self, field: SearchField, value: &str) -> Vec<&Book> {
        let found: Vec<&Book> = self
            .books
            .values()
            .map(Rc::as_ref)
            .filter(|book| field.matches(book, value))
            .collect();

        let rendered: Vec<String> = found.iter().map(ToString::to_string).collect();
        self.notifier.notify(&Notification::SearchResults {
            field: field.name(),
            value,
            matches: &rendered,
        });
        found
    }

    /// The member's borrowed books, oldest loan first.
    pub fn list_loans(&self, member_id: &str) -> Result<Vec<&Book>> {
        let Some(member) = self.members.get(member_id) else {
            return Self::report(
                &self.notifier,
                "list_loans",
                LibraryError::MemberNotFound {
                    member_id: member_id.to_string(),
                },
            );
        };

        let books: Vec<&Book> = member.borrowed_books().collect();
        let rendered: Vec<String> = books.iter().map(ToString::to_string).collect();
        self.notifier.notify(&Notification::LoanListing {
            member_name: &member.name,
            books: &rendered,
        });
        Ok(books)
    }

    pub fn book(&self, isbn: &str) -> Option<&Book> {
        self.books.get(isbn).map(Rc::as_ref)
    }

    pub fn member(&self, member_id: &str) -> Option<&Member> {
        self.members.get(member_id)
    }

    pub fn books(&self) -> impl Iterator<Item = &Book> + '_ {
        self.books.values().map(Rc::as_ref)
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> + '_ {
        self.members.values()
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn loans(&self, member_id: &str) -> Option<&[Loan]> {
        self.members.get(member_id).map(Member::loans)
    }

    /// Registered members currently holding `isbn`. More than one only under
    /// `LoanExclusivity::PerMember`.
    pub fn holders_of(&self, isbn: &str) -> Vec<&Member> {
        self.members
            .values()
            .filter(|member| member.has_loan(isbn))
            .collect()
    }

    /// `None` when the ISBN is not catalogued.
    pub fn book_status(&self, isbn: &str) -> Option<BookStatus> {
        if !self.books.contains_key(isbn) {
            return None;
        }

        let member_ids = self.holder_ids(isbn);
        if member_ids.is_empty() {
            Some(BookStatus::Available)
        } else {
            Some(BookStatus::Loaned { member_ids })
        }
    }

    fn holder_ids(&self, isbn: &str) -> Vec<String> {
        self.holders_of(isbn)
            .into_iter()
            .map(|member| member.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::notifier::MemoryNotifier;
    use crate::domain::model::Author;
    use crate::utils::error::ErrorKind;

    fn book(title: &str, isbn: &str) -> Book {
        Book::new(title, Author::new("Gabriel", "García Márquez"), "Ficción", isbn)
    }

    fn library(policy: LibraryPolicy) -> Library<MemoryNotifier> {
        let mut library = Library::new(policy, MemoryNotifier::default());
        library.add_book(book("T1", "A")).unwrap();
        library.add_book(book("T2", "B")).unwrap();
        library
            .register_member(Member::new("Clinton Alvarado", "001"))
            .unwrap();
        library
            .register_member(Member::new("María Pérez", "002"))
            .unwrap();
        library.notifier().clear();
        library
    }

    #[test]
    fn test_loan_shares_catalog_book() {
        let mut library = library(LibraryPolicy::default());
        library.loan_book("A", "001").unwrap();

        let loans = library.loans("001").unwrap();
        assert_eq!(loans.len(), 1);
        assert!(std::ptr::eq(
            loans[0].book.as_ref(),
            library.book("A").unwrap()
        ));
    }

    #[test]
    fn test_exclusive_loan_rejects_second_holder() {
        let mut library = library(LibraryPolicy::default());
        library.loan_book("A", "001").unwrap();

        let err = library.loan_book("A", "002").unwrap_err();
        assert!(matches!(
            err,
            LibraryError::LoanedToAnotherMember { ref holder_id, .. } if holder_id == "001"
        ));
        assert_eq!(err.kind(), ErrorKind::AlreadyLoaned);
        assert!(library.loans("002").unwrap().is_empty());
    }

    #[test]
    fn test_per_member_loan_allows_second_holder() {
        let policy = LibraryPolicy::new(LoanExclusivity::PerMember, OutstandingLoanPolicy::Cascade);
        let mut library = library(policy);
        library.loan_book("A", "001").unwrap();
        library.loan_book("A", "002").unwrap();

        assert_eq!(
            library.book_status("A"),
            Some(BookStatus::Loaned {
                member_ids: vec!["001".to_string(), "002".to_string()]
            })
        );
    }

    #[test]
    fn test_book_status_transitions() {
        let mut library = library(LibraryPolicy::default());
        assert_eq!(library.book_status("A"), Some(BookStatus::Available));
        assert_eq!(library.book_status("Z"), None);

        library.loan_book("A", "001").unwrap();
        assert_eq!(
            library.book_status("A"),
            Some(BookStatus::Loaned {
                member_ids: vec!["001".to_string()]
            })
        );

        library.return_book("A", "001").unwrap();
        assert_eq!(library.book_status("A"), Some(BookStatus::Available));
    }

    #[test]
    fn test_default_library_is_empty() {
        let library: Library = Library::default();
        assert_eq!(library.book_count(), 0);
        assert_eq!(library.member_count(), 0);
        assert_eq!(library.policy().exclusivity, LoanExclusivity::Exclusive);
        assert_eq!(
            library.policy().on_outstanding_loans,
            OutstandingLoanPolicy::Cascade
        );
    }

    #[test]
    fn test_failures_are_notified() {
        let library = library(LibraryPolicy::default());
        assert!(library.list_loans("404").is_err());

        let messages = library.notifier().messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0],
            "list_loans failed: No member registered with ID 404"
        );
    }
}
