use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("A book with ISBN {isbn} already exists in the library")]
    BookAlreadyExists { isbn: String },

    #[error("A member with ID {member_id} is already registered")]
    MemberAlreadyExists { member_id: String },

    #[error("No book with ISBN {isbn} in the library")]
    BookNotFound { isbn: String },

    #[error("No member registered with ID {member_id}")]
    MemberNotFound { member_id: String },

    #[error("Book '{title}' is already loaned to member {member_id}")]
    AlreadyLoaned {
        isbn: String,
        title: String,
        member_id: String,
    },

    #[error("Book '{title}' is currently loaned to another member ({holder_id})")]
    LoanedToAnotherMember {
        isbn: String,
        title: String,
        holder_id: String,
    },

    #[error("Book with ISBN {isbn} is not loaned to member {member_id}")]
    NotLoanedToMember { isbn: String, member_id: String },

    #[error("{subject} still has {count} outstanding loan(s)")]
    OutstandingLoans { subject: String, count: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// Coarse outcome classes callers and tests can match on without caring
/// about the payload of each variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AlreadyExists,
    NotFound,
    AlreadyLoaned,
    NotLoanedToMember,
    OutstandingLoans,
    Configuration,
}

impl LibraryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BookAlreadyExists { .. } | Self::MemberAlreadyExists { .. } => {
                ErrorKind::AlreadyExists
            }
            Self::BookNotFound { .. } | Self::MemberNotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyLoaned { .. } | Self::LoanedToAnotherMember { .. } => {
                ErrorKind::AlreadyLoaned
            }
            Self::NotLoanedToMember { .. } => ErrorKind::NotLoanedToMember,
            Self::OutstandingLoans { .. } => ErrorKind::OutstandingLoans,
            Self::IoError(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorKind::Configuration,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::BookAlreadyExists { .. } => "Use a different ISBN or remove the existing book first",
            Self::MemberAlreadyExists { .. } => "Pick an unused member ID",
            Self::BookNotFound { .. } => "Check the ISBN against the catalog listing",
            Self::MemberNotFound { .. } => "Register the member before using this ID",
            Self::AlreadyLoaned { .. } => "The member already holds this book",
            Self::LoanedToAnotherMember { .. } => "Wait until the current holder returns the book",
            Self::NotLoanedToMember { .. } => "List the member's loans to find the right ISBN",
            Self::OutstandingLoans { .. } => "Return the outstanding books first",
            Self::IoError(_) => "Make sure the file exists and is readable",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again"
            }
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;
