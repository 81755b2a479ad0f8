use crate::domain::ports::PolicyProvider;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who else may hold a book that is already on loan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum LoanExclusivity {
    /// A book is held by at most one member at a time.
    #[default]
    Exclusive,
    /// Only the same member is refused a second loan of the book.
    PerMember,
}

/// What removing a book or unregistering a member does to loans that are
/// still outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum OutstandingLoanPolicy {
    /// Release the affected loans along with the removal.
    #[default]
    Cascade,
    /// Refuse the removal while loans are outstanding.
    Block,
    /// Remove without touching loans. Members may keep books the catalog no
    /// longer lists.
    Ignore,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryPolicy {
    pub exclusivity: LoanExclusivity,
    pub on_outstanding_loans: OutstandingLoanPolicy,
}

impl LibraryPolicy {
    pub fn new(exclusivity: LoanExclusivity, on_outstanding_loans: OutstandingLoanPolicy) -> Self {
        Self {
            exclusivity,
            on_outstanding_loans,
        }
    }

    pub fn from_provider<P: PolicyProvider + ?Sized>(provider: &P) -> Self {
        Self::new(provider.loan_exclusivity(), provider.outstanding_loan_policy())
    }
}

impl PolicyProvider for LibraryPolicy {
    fn loan_exclusivity(&self) -> LoanExclusivity {
        self.exclusivity
    }

    fn outstanding_loan_policy(&self) -> OutstandingLoanPolicy {
        self.on_outstanding_loans
    }
}

impl fmt::Display for LibraryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "exclusivity={:?}, on_outstanding_loans={:?}",
            self.exclusivity, self.on_outstanding_loans
        )
    }
}
