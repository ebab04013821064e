use thiserror::Error;

/// A list of possible errors returned by countrace.
#[derive(Error, Debug)]
pub enum Error {
    /// An argument is out of its valid range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The OS failed to spawn a worker thread.
    #[error("IO {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized [`Result`] type returned by countrace.
pub type Result<T, E = Error> = std::result::Result<T, E>;
