//! Seam to the EC-JPAKE round engine.
//!
//! The engine owns the curve arithmetic, the Schnorr proofs and the
//! round-one/round-two wire formats; this crate only stages and slices
//! its byte blobs. Implementations are driven through six entry points
//! mirroring the classic EC-JPAKE API: password setup, two round writers,
//! two round readers, and the shared-key export.

use rand_core::CryptoRngCore;
use thiserror::Error as ThisError;

use crate::pake::suite::HashAlg;
use crate::Error;

/// Which side of the exchange the engine plays.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EngineRole {
    /// Initiating (client) side.
    Client,
    /// Responding (server) side.
    Server,
}

/// Curves an engine can be set up over.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum CurveId {
    /// NIST P-256 / secp256r1.
    Secp256R1,
}

/// Failures reported by an EC-JPAKE engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[non_exhaustive]
pub enum EngineError {
    /// A field element or curve point in the peer's payload is malformed.
    #[error("malformed field element or curve point")]
    BadInput,
    /// A key embedded in the peer's payload is invalid for the curve.
    #[error("invalid key")]
    InvalidKey,
    /// A zero-knowledge proof failed to verify.
    #[error("proof verification failed")]
    VerifyFailed,
    /// The provided output buffer cannot hold the round payload.
    #[error("output buffer too small")]
    BufferTooSmall,
    /// The negotiated hash is not available to the engine.
    #[error("hash algorithm unavailable")]
    HashUnavailable,
    /// The engine detected internal corruption.
    #[error("corruption detected")]
    Corruption,
    /// Any other engine failure.
    #[error("unspecified engine failure")]
    Other,
}

impl From<EngineError> for Error {
    fn from(err: EngineError) -> Error {
        match err {
            EngineError::BadInput | EngineError::InvalidKey | EngineError::VerifyFailed => {
                Error::DataInvalid
            }
            EngineError::BufferTooSmall => Error::BufferTooSmall,
            EngineError::HashUnavailable => Error::NotSupported,
            EngineError::Corruption => Error::CorruptionDetected,
            EngineError::Other => Error::Generic,
        }
    }
}

/// A round-at-a-time EC-JPAKE engine.
///
/// Writers fill `output` with the full round payload and return the
/// number of bytes produced; readers consume the full accumulated round.
/// `Default` stands in for the engine's zero-initialized context; the
/// operation drops the engine on abort.
pub trait JpakeEngine: Default {
    /// Binds role, hash, curve and the raw password material.
    fn setup(
        &mut self,
        role: EngineRole,
        hash: HashAlg,
        curve: CurveId,
        password: &[u8],
    ) -> Result<(), EngineError>;

    /// Writes the round-one payload (both key-share halves with their
    /// proofs).
    fn write_round_one(
        &mut self,
        output: &mut [u8],
        rng: &mut dyn CryptoRngCore,
    ) -> Result<usize, EngineError>;

    /// Writes the round-two payload (the combined key share with its
    /// proof).
    fn write_round_two(
        &mut self,
        output: &mut [u8],
        rng: &mut dyn CryptoRngCore,
    ) -> Result<usize, EngineError>;

    /// Consumes the peer's round-one payload.
    fn read_round_one(&mut self, input: &[u8]) -> Result<(), EngineError>;

    /// Consumes the peer's round-two payload.
    fn read_round_two(&mut self, input: &[u8]) -> Result<(), EngineError>;

    /// Derives the shared secret into `output`, returning its length.
    fn write_shared_key(
        &mut self,
        output: &mut [u8],
        rng: &mut dyn CryptoRngCore,
    ) -> Result<usize, EngineError>;
}
