use thiserror::Error;

/// Errors raised by the ring buffer and stream setup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A write asked for at least as many slots as are free.
    ///
    /// One slot is always held back, so a write of `n` samples needs
    /// `free > n`.
    #[error("ring buffer write of {requested} samples rejected, only {free} free")]
    CapacityExceeded { requested: usize, free: usize },

    /// A read asked for more samples than are stored.
    #[error("ring buffer read of {requested} samples rejected, only {available} available")]
    Underrun { requested: usize, available: usize },

    #[error("invalid stream settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, Error>;
