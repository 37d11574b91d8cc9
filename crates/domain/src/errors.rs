use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Title is required")]
    EmptyTitle,

    #[error("Title is too long (max {max} characters, got {actual})")]
    TitleTooLong { max: usize, actual: usize },

    #[error("Invalid TodoId: {0}")]
    InvalidTodoId(String),
}
