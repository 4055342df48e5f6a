//! Streaming PAKE operation over a round-at-a-time EC-JPAKE engine.
//!
//! A [`PakeOperation`] exposes the protocol one payload at a time: for
//! each round, key-share / ZK-public / ZK-proof parts are produced by
//! [`PakeOperation::output`] and absorbed by [`PakeOperation::input`],
//! while the engine underneath reads and writes whole rounds. Outgoing
//! rounds are staged in an internal buffer and sliced per call; incoming
//! parts accumulate until the round's final ZK proof, at which point the
//! whole blob is handed to the engine — the only place a protocol-level
//! failure can surface.
//!
//! The EC-JPAKE engine, the password store and the key-derivation sink
//! are supplied by the caller through the [`JpakeEngine`],
//! [`PasswordStore`] and [`DerivationSink`] seams.

mod engine;
mod operation;
mod store;
mod suite;

pub use self::{
    engine::{CurveId, EngineError, EngineRole, JpakeEngine},
    operation::{PakeOperation, PAKE_BUFFER_SIZE},
    store::{DerivationSink, KeyAttributes, KeyId, KeyType, PasswordStore, UsageFlags},
    suite::{CipherSuite, EcFamily, HashAlg, PakeAlgorithm, PakePrimitive, PakeRole, PakeStep, PrimitiveType},
};
