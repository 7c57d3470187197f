/// Failures reported by the container APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Error {
    /// The requested key does not exist in the container.
    #[error("key not found")]
    KeyNotFound,

    /// The [`Position`](crate::Position) is the past-the-end sentinel and
    /// does not refer to an element.
    #[error("position is past the end of the container")]
    EndPosition,

    /// The [`Position`](crate::Position) referred to an element that has since
    /// been erased, or was issued by another container.
    #[error("position refers to an erased element")]
    StalePosition,

    /// The start of a position range comes after its end.
    #[error("range start follows its end")]
    InvalidRange,
}

/// A [`Result`](std::result::Result) defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
