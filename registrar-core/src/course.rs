use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::CourseId;
use crate::professor::ProfessorProfile;

/// The client-supplied fields of a course.
///
/// Wire names keep the original API's casing (`courseID`, `courseName`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct CourseProfile {
    /// Course id, the record's primary key.
    #[serde(rename = "courseID")]
    pub course_id: CourseId,
    /// Human-readable course name.
    #[serde(rename = "courseName")]
    pub course_name: String,
    /// Snapshot of the instructor's profile, copied at write time. Not a
    /// reference: later changes to the professor record do not propagate.
    pub instructor: ProfessorProfile,
    /// Free-text assignment descriptions.
    #[serde(default)]
    pub assignment: Vec<String>,
}

impl CourseProfile {
    /// Creates a profile from its parts.
    #[must_use]
    pub fn new(
        course_id: CourseId,
        course_name: impl Into<String>,
        instructor: ProfessorProfile,
        assignment: Vec<String>,
    ) -> Self {
        Self {
            course_id,
            course_name: course_name.into(),
            instructor,
            assignment,
        }
    }
}

/// A stored course record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Course {
    /// Course id. Immutable by convention only, as with professor ids.
    #[serde(rename = "courseID")]
    pub course_id: CourseId,
    /// Human-readable course name.
    #[serde(rename = "courseName")]
    pub course_name: String,
    /// Instructor snapshot taken when the course was written.
    pub instructor: ProfessorProfile,
    /// Free-text assignment descriptions.
    pub assignment: Vec<String>,
    /// When the record was created (UTC, server-assigned).
    pub created_at: DateTime<Utc>,
    /// When the record last changed (UTC, server-assigned).
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Builds a fresh record from a client profile. Both timestamps are set
    /// to `now`.
    #[must_use]
    pub fn create(profile: CourseProfile, now: DateTime<Utc>) -> Self {
        Self {
            course_id: profile.course_id,
            course_name: profile.course_name,
            instructor: profile.instructor,
            assignment: profile.assignment,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the supplied fields of `update` onto this record. Unset fields
    /// are retained; `updated_at` is stamped to `now` even when the patch is
    /// empty.
    pub fn apply(&mut self, update: CourseUpdate, now: DateTime<Utc>) {
        if let Some(course_id) = update.course_id {
            self.course_id = course_id;
        }
        if let Some(course_name) = update.course_name {
            self.course_name = course_name;
        }
        if let Some(instructor) = update.instructor {
            self.instructor = instructor;
        }
        if let Some(assignment) = update.assignment {
            self.assignment = assignment;
        }
        self.updated_at = now;
    }
}

/// Partial update for a course; only supplied fields change.
///
/// A supplied `instructor` replaces the whole snapshot. Its shape is
/// validated but it is never checked against the professor store.
#[derive(Debug, Clone, Default, Deserialize)]
#[non_exhaustive]
pub struct CourseUpdate {
    /// New course id, if supplied. The store key is not re-derived.
    #[serde(rename = "courseID")]
    pub course_id: Option<CourseId>,
    /// New course name, if supplied.
    #[serde(rename = "courseName")]
    pub course_name: Option<String>,
    /// Replaces the entire instructor snapshot, if supplied.
    pub instructor: Option<ProfessorProfile>,
    /// Replaces the entire assignment list, if supplied.
    pub assignment: Option<Vec<String>>,
}
