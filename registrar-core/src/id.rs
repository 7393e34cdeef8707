use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[expect(clippy::expect_used, reason = "the pattern is a literal and always compiles")]
static PROFESSOR_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2,3}\d{1,4}$").expect("professor id pattern compiles"));

#[expect(clippy::expect_used, reason = "the pattern is a literal and always compiles")]
static COURSE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{4}\d{4}$").expect("course id pattern compiles"));

#[expect(clippy::expect_used, reason = "the pattern is a literal and always compiles")]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern compiles")
});

/// A professor's university id: 2–3 lowercase letters followed by 1–4 digits
/// (e.g. `js2233`).
///
/// Construction validates the pattern, and the serde impls go through the
/// same check, so an id arriving in a path segment, a JSON body, or a query
/// string is rejected before any handler logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfessorId(String);

impl ProfessorId {
    /// Creates a `ProfessorId` from any string-like value.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidProfessorId`] if the value does not match
    /// `^[a-z]{2,3}\d{1,4}$`.
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        if PROFESSOR_ID_PATTERN.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidProfessorId { value })
        }
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfessorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ProfessorId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for ProfessorId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<ProfessorId> for String {
    fn from(id: ProfessorId) -> Self {
        id.0
    }
}

/// A course id: exactly 4 uppercase letters followed by exactly 4 digits
/// (e.g. `COMS4153`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseId(String);

impl CourseId {
    /// Creates a `CourseId` from any string-like value.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidCourseId`] if the value does not match
    /// `^[A-Z]{4}\d{4}$`.
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        if COURSE_ID_PATTERN.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidCourseId { value })
        }
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CourseId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for CourseId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<CourseId> for String {
    fn from(id: CourseId) -> Self {
        id.0
    }
}

/// A structurally validated email address.
///
/// The check is the pragmatic `local@domain.tld` shape, not full RFC 5322.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates an `EmailAddress` from any string-like value.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidEmail`] if the value is not shaped like
    /// an email address.
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        if EMAIL_PATTERN.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidEmail { value })
        }
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for EmailAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest::proptest! {
        #[test]
        fn proptest_professor_id_accepts_every_pattern_match(s in "[a-z]{2,3}[0-9]{1,4}") {
            proptest::prop_assert!(ProfessorId::new(s.clone()).is_ok(), "'{}' should validate", s);
        }

        #[test]
        fn proptest_professor_id_rejects_overlong_digit_runs(s in "[a-z]{2,3}[0-9]{5,8}") {
            proptest::prop_assert!(ProfessorId::new(s).is_err());
        }

        #[test]
        fn proptest_professor_id_rejects_uppercase_prefixes(s in "[A-Z]{2,3}[0-9]{1,4}") {
            proptest::prop_assert!(ProfessorId::new(s).is_err());
        }

        #[test]
        fn proptest_course_id_accepts_every_pattern_match(s in "[A-Z]{4}[0-9]{4}") {
            let id = match CourseId::new(s.clone()) {
                Ok(id) => id,
                Err(e) => return Err(proptest::test_runner::TestCaseError::fail(e.to_string())),
            };
            proptest::prop_assert_eq!(id.as_str(), s);
        }

        #[test]
        fn proptest_course_id_rejects_short_letter_runs(s in "[A-Z]{1,3}[0-9]{4}") {
            proptest::prop_assert!(CourseId::new(s).is_err());
        }
    }
}
