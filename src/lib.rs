//! Constant-time modular residues and a streaming PAKE operation.
//!
//! This crate provides the two building blocks at the core of a PSA-style
//! PAKE implementation:
//!
//! - [`modular`]: runtime moduli over caller-supplied limb buffers with a
//!   selectable internal representation (Montgomery or opportunistic
//!   reduction), plus non-owning [`modular::Residue`] views whose byte
//!   import/export and conditional assignment are constant time.
//! - [`pake`]: a [`pake::PakeOperation`] handle that drives an EC-JPAKE
//!   exchange through per-step key-share/ZK-public/ZK-proof payloads while
//!   calling a round-at-a-time engine underneath. The engine, the password
//!   store and the key-derivation sink are trait seams supplied by the
//!   caller.
//!
//! All secret-bearing intermediate buffers are zeroized on release, and
//! every branch or memory access in the residue primitives is independent
//! of limb values.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_lifetimes, unused_qualifications)]

mod error;
mod limb;

pub mod modular;
pub mod pake;

pub use crate::{
    error::{Error, Result},
    limb::{Limb, Word},
};
