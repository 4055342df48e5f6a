//! Modular residue arithmetic substrate.
//!
//! A [`Modulus`] describes a positive integer `p > 1` over a borrowed limb
//! slice and owns whatever precomputation its internal representation
//! needs (for Montgomery form: the low word of `-p^{-1} mod 2^W` and
//! `R^2 mod p`). A [`Residue`] is a non-owning view into a caller-supplied
//! limb buffer whose value is guaranteed, at binding time and thereafter,
//! to lie strictly below `p`.
//!
//! The checks that guard these guarantees are constant time: binding and
//! import compare against `p` without early exit, conditional assignment
//! and swap take a [`subtle::Choice`], and export timing depends only on
//! buffer lengths.

mod modulus;
mod montgomery;
mod raw;
mod residue;

pub use self::{
    modulus::{ExtRep, Modulus, ReprSelector, MAX_LIMBS},
    residue::Residue,
};
