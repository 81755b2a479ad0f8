use crate::core::library::Library;
use crate::core::policy::{LibraryPolicy, LoanExclusivity, OutstandingLoanPolicy};
use crate::core::session::Action;
use crate::domain::model::{Book, Member};
use crate::domain::ports::{Notifier, PolicyProvider};
use crate::utils::error::{LibraryError, Result};
use crate::utils::validation::{
    is_standard_isbn, validate_identifier, validate_non_empty_string, validate_unique_keys,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Catalog seed, loan policy and an optional script of actions, read from
/// TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub policy: LibraryPolicy,
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub members: Vec<MemberRecord>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub name: String,
    pub id: String,
}

impl CatalogConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LibraryError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LibraryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LibraryError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        for book in &self.books {
            validate_identifier("books.isbn", &book.isbn)?;
            validate_non_empty_string("books.title", &book.title)?;
            if !is_standard_isbn(&book.isbn) {
                tracing::warn!("Seed book '{}' uses a non-standard ISBN '{}'", book.title, book.isbn);
            }
        }
        validate_unique_keys("books.isbn", self.books.iter().map(|book| book.isbn.as_str()))?;

        for member in &self.members {
            validate_identifier("members.id", &member.id)?;
            validate_non_empty_string("members.name", &member.name)?;
        }
        validate_unique_keys("members.id", self.members.iter().map(|member| member.id.as_str()))?;

        Ok(())
    }

    /// Apply command-line overrides on top of the `[policy]` table.
    pub fn override_policy(
        &mut self,
        exclusivity: Option<LoanExclusivity>,
        on_outstanding_loans: Option<OutstandingLoanPolicy>,
    ) {
        if let Some(exclusivity) = exclusivity {
            self.policy.exclusivity = exclusivity;
        }
        if let Some(on_outstanding_loans) = on_outstanding_loans {
            self.policy.on_outstanding_loans = on_outstanding_loans;
        }
    }

    /// Build a library holding the seed books and members.
    pub fn build_library<N: Notifier>(&self, notifier: N) -> Result<Library<N>> {
        let mut library = Library::new(LibraryPolicy::from_provider(self), notifier);

        for book in &self.books {
            library.add_book(book.clone())?;
        }
        for member in &self.members {
            library.register_member(Member::new(member.name.as_str(), member.id.as_str()))?;
        }

        tracing::debug!(
            "Seeded {} book(s) and {} member(s)",
            library.book_count(),
            library.member_count()
        );
        Ok(library)
    }
}

impl PolicyProvider for CatalogConfig {
    fn loan_exclusivity(&self) -> LoanExclusivity {
        self.policy.exclusivity
    }

    fn outstanding_loan_policy(&self) -> OutstandingLoanPolicy {
        self.policy.on_outstanding_loans
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
