//! Field validation for the book edit form.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Four digits, leading digit 1-9.
static PUBLICATION_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[1-9][0-9]{3}$").unwrap_or_else(|err| panic!("year pattern: {err}"))
});

/// Reasons a form cannot be confirmed. The display strings are what the
/// form shows in its error message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Book name cannot be empty.")]
    EmptyName,

    #[error("Author must be selected.")]
    NoAuthorSelected,

    #[error("Publication year must be a valid year.")]
    InvalidYear,
}

impl ValidationError {
    /// Name of the offending form field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyName => "name",
            ValidationError::NoAuthorSelected => "author",
            ValidationError::InvalidYear => "publication_year",
        }
    }
}

pub fn is_valid_publication_year(value: &str) -> bool {
    PUBLICATION_YEAR.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_four_digit_years() {
        for year in ["1000", "1965", "2024", "9999"] {
            assert!(is_valid_publication_year(year), "{year} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_years() {
        for year in ["0999", "99", "10000", "", "abcd", " 1965", "1965\n", "19a5"] {
            assert!(!is_valid_publication_year(year), "{year:?} should be invalid");
        }
    }

    #[test]
    fn fields_name_the_input() {
        assert_eq!(ValidationError::EmptyName.field(), "name");
        assert_eq!(ValidationError::InvalidYear.field(), "publication_year");
    }
}
