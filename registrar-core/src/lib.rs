//! Core domain types for the registrar CRUD service.
//!
//! Defines the fundamental types shared by the HTTP gateway: the
//! pattern-constrained identifiers, the professor and course records with
//! their server-assigned timestamps, and the create/update payload shapes.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod course;
pub mod error;
pub mod id;
pub mod professor;

pub use course::{Course, CourseProfile, CourseUpdate};
pub use error::CoreError;
pub use id::{CourseId, EmailAddress, ProfessorId};
pub use professor::{Professor, ProfessorProfile, ProfessorUpdate};
