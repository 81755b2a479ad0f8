pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use self::adapters::notifier::{ConsoleNotifier, MemoryNotifier, SilentNotifier, TracingNotifier};
pub use self::config::{CatalogConfig, CliConfig};
pub use self::core::{
    library::Library,
    policy::{LibraryPolicy, LoanExclusivity, OutstandingLoanPolicy},
    search::SearchField,
    session::{Action, Session, SessionSummary},
};
pub use self::domain::model::{Author, Book, BookStatus, Loan, Member};
pub use self::domain::notification::Notification;
pub use self::domain::ports::{Notifier, PolicyProvider};
pub use self::utils::error::{ErrorKind, LibraryError, Result};
