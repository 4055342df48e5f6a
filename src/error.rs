use thiserror::Error as ThisError;

/// Status codes surfaced by the modular substrate and the PAKE operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[non_exhaustive]
pub enum Error {
    /// An input violates the caller contract of the modular substrate, e.g.
    /// an undersized residue buffer or a value not strictly below the
    /// modulus.
    #[error("bad input data")]
    BadInput,

    /// An output buffer cannot hold the data it must receive, or an input
    /// magnitude does not fit the available limbs.
    #[error("buffer too small")]
    BufferTooSmall,

    /// An argument is outside the accepted domain of a PAKE call.
    #[error("invalid argument")]
    InvalidArgument,

    /// The peer's accumulated round payload was rejected by the engine.
    #[error("protocol data invalid")]
    DataInvalid,

    /// Staged protocol bytes are internally inconsistent.
    #[error("protocol data corrupt")]
    DataCorrupt,

    /// The requested algorithm, suite or binding is not supported.
    #[error("not supported")]
    NotSupported,

    /// The key's usage policy forbids this operation.
    #[error("not permitted")]
    NotPermitted,

    /// The staging buffer cannot absorb the supplied input.
    #[error("insufficient memory")]
    InsufficientMemory,

    /// The handle is not in a state that allows this call.
    #[error("bad state")]
    BadState,

    /// An internal consistency check failed.
    #[error("corruption detected")]
    CorruptionDetected,

    /// An unspecified failure was reported by a collaborator.
    #[error("generic error")]
    Generic,
}

/// Result of a fallible operation in this crate.
pub type Result<T> = core::result::Result<T, Error>;
