pub mod library;
pub mod policy;
pub mod search;
pub mod session;

pub use crate::domain::model::{Author, Book, BookStatus, Loan, Member};
pub use crate::domain::ports::{Notifier, PolicyProvider};
pub use crate::utils::error::Result;
