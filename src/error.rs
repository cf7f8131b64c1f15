//! Error type shared by `Sequence` and `AssocMap`.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Construction parameter rejected; the payload names the parameter.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// Sequence position outside the valid range for the operation.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// No chain node matched the queried key.
    #[error("key not found")]
    KeyNotFound,
}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(
            Error::InvalidArgument("initial_capacity").to_string(),
            "invalid argument: initial_capacity"
        );
        assert_eq!(
            Error::IndexOutOfRange { index: 3, len: 1 }.to_string(),
            "index 3 out of range for length 1"
        );
        assert_eq!(Error::KeyNotFound.to_string(), "key not found");
    }
}
