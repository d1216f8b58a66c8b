use thiserror::Error;

/// Errors reported by the fallible constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The tree range `[min, max)` is empty or inverted.
    #[error("invalid interval tree range [{min}, {max}): min must be less than max")]
    InvalidBounds { min: i64, max: i64 },
}

/// Wrapper over `std::result::Result` with this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
