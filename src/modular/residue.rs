//! Non-owning residue views over caller-supplied limb buffers.

use subtle::Choice;
use zeroize::Zeroize;

use crate::{Error, Limb, Result};

use super::{raw, ExtRep, Modulus};

/// A view of caller-owned limbs interpreted modulo a [`Modulus`].
///
/// Binding checks, in constant time, that the buffer's value is strictly
/// below the modulus; every mutation preserves that bound. The view
/// borrows the modulus, so the modulus always outlives the residue, and
/// releasing the residue is just letting it go out of scope (the buffer
/// stays with the caller).
#[derive(Debug)]
pub struct Residue<'a, 'p> {
    limbs: &'a mut [Limb],
    modulus: &'a Modulus<'p>,
}

impl<'a, 'p> Residue<'a, 'p> {
    /// Binds `buffer` to `modulus`.
    ///
    /// The buffer must span at least `modulus.num_limbs()` limbs and its
    /// value, read as little-endian limbs over its full length, must be
    /// strictly less than `p`; both violations are [`Error::BadInput`].
    /// The value comparison runs without early exit. Only the low
    /// `modulus.num_limbs()` limbs take part in subsequent operations.
    pub fn new(buffer: &'a mut [Limb], modulus: &'a Modulus<'p>) -> Result<Self> {
        if buffer.len() < modulus.num_limbs() {
            return Err(Error::BadInput);
        }
        if !bool::from(raw::ct_lt(buffer, modulus.as_limbs())) {
            return Err(Error::BadInput);
        }

        Ok(Self {
            limbs: &mut buffer[..modulus.num_limbs()],
            modulus,
        })
    }

    /// The bound limbs, little-endian.
    pub fn as_limbs(&self) -> &[Limb] {
        self.limbs
    }

    /// The modulus this residue is bound to.
    pub fn modulus(&self) -> &'a Modulus<'p> {
        self.modulus
    }

    /// Assigns `source` to `self` when `choice` is set, in constant time:
    /// both paths touch the same memory in the same order.
    pub fn conditional_assign(&mut self, source: &Self, choice: Choice) {
        debug_assert_eq!(self.limbs.len(), source.limbs.len());
        raw::conditional_assign(self.limbs, source.limbs, choice);
    }

    /// Swaps `x` and `y` when `choice` is set, with the same side-channel
    /// contract as [`Residue::conditional_assign`].
    pub fn conditional_swap(x: &mut Self, y: &mut Self, choice: Choice) {
        debug_assert_eq!(x.limbs.len(), y.limbs.len());
        raw::conditional_swap(x.limbs, y.limbs, choice);
    }

    /// Imports `input` in the modulus's external byte order.
    ///
    /// Leading zeros are valid and consumed. Fails with
    /// [`Error::BufferTooSmall`] when the magnitude does not fit the
    /// modulus width and [`Error::BadInput`] when the value is not below
    /// `p`; on any failure the bound limbs are zeroized so the residue
    /// never holds an unreduced value.
    pub fn import(&mut self, input: &[u8]) -> Result<()> {
        let outcome = self.import_inner(input);
        if outcome.is_err() {
            self.limbs.zeroize();
        }
        outcome
    }

    fn import_inner(&mut self, input: &[u8]) -> Result<()> {
        match self.modulus.ext_rep() {
            ExtRep::LittleEndian => raw::read_le(self.limbs, input)?,
            ExtRep::BigEndian => raw::read_be(self.limbs, input)?,
        }

        if !bool::from(raw::ct_lt(self.limbs, self.modulus.as_limbs())) {
            return Err(Error::BadInput);
        }
        Ok(())
    }

    /// Exports the residue into `output` in the modulus's external byte
    /// order, padding the high side with zeros.
    ///
    /// `output` must hold at least `ceil(bits(p) / 8)` bytes
    /// ([`Error::BufferTooSmall`] otherwise); the written length never
    /// depends on the residue value.
    pub fn export(&self, output: &mut [u8]) -> Result<()> {
        if output.len() < self.modulus.byte_len() {
            return Err(Error::BufferTooSmall);
        }

        match self.modulus.ext_rep() {
            ExtRep::LittleEndian => raw::write_le(self.limbs, output),
            ExtRep::BigEndian => raw::write_be(self.limbs, output),
        }
        Ok(())
    }
}
