use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{CourseId, EmailAddress, ProfessorId};

/// The client-supplied fields of a professor.
///
/// This is both the create payload and the instructor snapshot embedded in a
/// course record: what a client submits on create is exactly what a course
/// copies at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ProfessorProfile {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// University id, the record's primary key.
    pub id: ProfessorId,
    /// Contact email address.
    pub email: EmailAddress,
    /// Ids of courses this professor teaches. Order is preserved; entries
    /// are not checked against the course store.
    #[serde(default)]
    pub courses: Vec<CourseId>,
}

impl ProfessorProfile {
    /// Creates a profile from its parts.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        id: ProfessorId,
        email: EmailAddress,
        courses: Vec<CourseId>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            id,
            email,
            courses,
        }
    }
}

/// A stored professor record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Professor {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// University id. Immutable by convention only: a patch may carry a new
    /// value, and the store key keeps the create-time one.
    pub id: ProfessorId,
    /// Contact email address.
    pub email: EmailAddress,
    /// Ids of courses this professor teaches.
    pub courses: Vec<CourseId>,
    /// When the record was created (UTC, server-assigned).
    pub created_at: DateTime<Utc>,
    /// When the record last changed (UTC, server-assigned).
    pub updated_at: DateTime<Utc>,
}

impl Professor {
    /// Builds a fresh record from a client profile. Both timestamps are set
    /// to `now`, so `created_at == updated_at` on a new record.
    #[must_use]
    pub fn create(profile: ProfessorProfile, now: DateTime<Utc>) -> Self {
        Self {
            first_name: profile.first_name,
            last_name: profile.last_name,
            id: profile.id,
            email: profile.email,
            courses: profile.courses,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the supplied fields of `update` onto this record. Unset fields
    /// are retained; `updated_at` is stamped to `now` even when the patch is
    /// empty.
    pub fn apply(&mut self, update: ProfessorUpdate, now: DateTime<Utc>) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(id) = update.id {
            self.id = id;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(courses) = update.courses {
            self.courses = courses;
        }
        self.updated_at = now;
    }
}

/// Partial update for a professor; only supplied fields change.
#[derive(Debug, Clone, Default, Deserialize)]
#[non_exhaustive]
pub struct ProfessorUpdate {
    /// New first name, if supplied.
    pub first_name: Option<String>,
    /// New last name, if supplied.
    pub last_name: Option<String>,
    /// New university id, if supplied. The store key is not re-derived.
    pub id: Option<ProfessorId>,
    /// New email address, if supplied.
    pub email: Option<EmailAddress>,
    /// Replaces the entire course list, if supplied.
    pub courses: Option<Vec<CourseId>>,
}
