//! In-memory registries for professor and course records.
//!
//! Each store is a single `RwLock` around an insertion-ordered map, so list
//! responses come back in creation order. There is no versioning and no
//! cross-record transaction: concurrent writes to one record are
//! last-write-wins.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use registrar_core::{
    Course, CourseId, CourseProfile, CourseUpdate, Professor, ProfessorId, ProfessorProfile,
    ProfessorUpdate,
};
use serde::Deserialize;

// An empty query value is treated as an absent filter.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ── Professors ────────────────────────────────────────────────────────────────

/// Query filters for listing professors. Present filters are ANDed.
#[derive(Debug, Clone, Default, Deserialize)]
#[non_exhaustive]
pub struct ProfessorFilter {
    /// Case-insensitive exact match on first name.
    pub first_name: Option<String>,
    /// Case-insensitive exact match on last name.
    pub last_name: Option<String>,
    /// Exact match on the stored id field.
    pub id: Option<ProfessorId>,
}

impl ProfessorFilter {
    fn matches(&self, professor: &Professor) -> bool {
        if let Some(first_name) = non_empty(self.first_name.as_deref()) {
            if professor.first_name.to_lowercase() != first_name.to_lowercase() {
                return false;
            }
        }
        if let Some(last_name) = non_empty(self.last_name.as_deref()) {
            if professor.last_name.to_lowercase() != last_name.to_lowercase() {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if &professor.id != id {
                return false;
            }
        }
        true
    }
}

/// Thread-safe registry of professor records, keyed by professor id.
#[derive(Debug, Default)]
pub struct ProfessorStore {
    records: RwLock<IndexMap<ProfessorId, Professor>>,
}

impl ProfessorStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new record built from `profile`, with both timestamps set
    /// to `now`. Returns `None` without mutating if any stored record
    /// already carries the same id field.
    ///
    /// Uniqueness is checked against stored id fields rather than map keys:
    /// an id that arrived via a patch still collides.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned (a previous thread
    /// panicked while holding the write lock).
    pub fn create(&self, profile: ProfessorProfile, now: DateTime<Utc>) -> Option<Professor> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut records = self.records.write().expect("professor store write lock poisoned");
        if records.values().any(|p| p.id == profile.id) {
            return None;
        }
        let record = Professor::create(profile, now);
        records.insert(record.id.clone(), record.clone());
        Some(record)
    }

    /// Returns all records in insertion order, narrowed by `filter`.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn list(&self, filter: &ProfessorFilter) -> Vec<Professor> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let records = self.records.read().expect("professor store read lock poisoned");
        records.values().filter(|p| filter.matches(p)).cloned().collect()
    }

    /// Looks up a record by its store key.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn get(&self, id: &ProfessorId) -> Option<Professor> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let records = self.records.read().expect("professor store read lock poisoned");
        records.get(id).cloned()
    }

    /// Applies `update` to the record stored under `id` and returns the
    /// merged record, or `None` if the key is absent. The store key never
    /// changes, even when the patch carries a new id field.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn update(
        &self,
        id: &ProfessorId,
        update: ProfessorUpdate,
        now: DateTime<Utc>,
    ) -> Option<Professor> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut records = self.records.write().expect("professor store write lock poisoned");
        let record = records.get_mut(id)?;
        record.apply(update, now);
        Some(record.clone())
    }

    /// Removes the record under `id`, preserving the order of the rest.
    /// Returns `true` if it existed. No cascade: courses embedding this
    /// professor keep their snapshot.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn remove(&self, id: &ProfessorId) -> bool {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut records = self.records.write().expect("professor store write lock poisoned");
        records.shift_remove(id).is_some()
    }
}

// ── Courses ───────────────────────────────────────────────────────────────────

/// Query filters for listing courses. Present filters are ANDed.
#[derive(Debug, Clone, Default, Deserialize)]
#[non_exhaustive]
pub struct CourseFilter {
    /// Exact match on the stored course id field.
    pub course_id: Option<CourseId>,
    /// Case-insensitive substring match on the course name.
    pub course_name: Option<String>,
    /// Exact match on the embedded instructor snapshot's id.
    pub instructor_id: Option<ProfessorId>,
}

impl CourseFilter {
    fn matches(&self, course: &Course) -> bool {
        if let Some(course_id) = &self.course_id {
            if &course.course_id != course_id {
                return false;
            }
        }
        if let Some(course_name) = non_empty(self.course_name.as_deref()) {
            if !course.course_name.to_lowercase().contains(&course_name.to_lowercase()) {
                return false;
            }
        }
        if let Some(instructor_id) = &self.instructor_id {
            if &course.instructor.id != instructor_id {
                return false;
            }
        }
        true
    }
}

/// Thread-safe registry of course records, keyed by course id.
#[derive(Debug, Default)]
pub struct CourseStore {
    records: RwLock<IndexMap<CourseId, Course>>,
}

impl CourseStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new record built from `profile`, with both timestamps set
    /// to `now`. Returns `None` without mutating if any stored record
    /// already carries the same course id field.
    ///
    /// The embedded instructor is stored as given: a snapshot, never checked
    /// against the professor store.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn create(&self, profile: CourseProfile, now: DateTime<Utc>) -> Option<Course> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut records = self.records.write().expect("course store write lock poisoned");
        if records.values().any(|c| c.course_id == profile.course_id) {
            return None;
        }
        let record = Course::create(profile, now);
        records.insert(record.course_id.clone(), record.clone());
        Some(record)
    }

    /// Returns all records in insertion order, narrowed by `filter`.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn list(&self, filter: &CourseFilter) -> Vec<Course> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let records = self.records.read().expect("course store read lock poisoned");
        records.values().filter(|c| filter.matches(c)).cloned().collect()
    }

    /// Looks up a record by its store key.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn get(&self, id: &CourseId) -> Option<Course> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let records = self.records.read().expect("course store read lock poisoned");
        records.get(id).cloned()
    }

    /// Applies `update` to the record stored under `id` and returns the
    /// merged record, or `None` if the key is absent.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn update(&self, id: &CourseId, update: CourseUpdate, now: DateTime<Utc>) -> Option<Course> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut records = self.records.write().expect("course store write lock poisoned");
        let record = records.get_mut(id)?;
        record.apply(update, now);
        Some(record.clone())
    }

    /// Removes the record under `id`, preserving the order of the rest.
    /// Returns `true` if it existed.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn remove(&self, id: &CourseId) -> bool {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut records = self.records.write().expect("course store write lock poisoned");
        records.shift_remove(id).is_some()
    }
}
