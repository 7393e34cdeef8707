/// Errors produced by the `registrar-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A professor id did not match the required pattern.
    #[error("invalid professor id '{value}': expected 2-3 lowercase letters followed by 1-4 digits")]
    InvalidProfessorId { value: String },

    /// A course id did not match the required pattern.
    #[error("invalid course id '{value}': expected 4 uppercase letters followed by 4 digits")]
    InvalidCourseId { value: String },

    /// An email address is not structurally valid.
    #[error("invalid email address '{value}'")]
    InvalidEmail { value: String },
}
