//! Runtime moduli and the precomputed constants they own.

use zeroize::Zeroizing;

use crate::{Error, Limb, Result};

use super::{montgomery, raw};

/// Hard cap on the number of limbs accepted for a modulus.
pub const MAX_LIMBS: usize = 10000;

/// Byte order used when residues cross the API boundary.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExtRep {
    /// Least significant byte first.
    LittleEndian,
    /// Most significant byte first.
    BigEndian,
}

/// Internal representation selected for residues of a modulus.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReprSelector {
    /// Montgomery form with precomputed `mm` and `R^2 mod p`.
    Montgomery,
    /// Opportunistic reduction.
    OptRed,
}

/// Representation-specific payload owned by the modulus.
#[derive(Debug)]
enum Representation {
    Montgomery {
        /// Low word of `-p^{-1} mod 2^W`.
        mm: Limb,
        /// `R^2 mod p`, `p.len()` limbs.
        rr: Zeroizing<Vec<Limb>>,
    },
    /// Opportunistic reduction carries no precomputation yet.
    OptRed,
}

/// A positive integer `p > 1` together with everything needed to work with
/// residues modulo `p`.
///
/// The modulus borrows the caller's limb slice and owns only its
/// representation payload; the owned `R^2` vector is zeroized on drop.
/// For the Montgomery representation `p` must be odd.
#[derive(Debug)]
pub struct Modulus<'p> {
    p: &'p [Limb],
    bits: usize,
    ext_rep: ExtRep,
    repr: Representation,
}

impl<'p> Modulus<'p> {
    /// Sets up a modulus over `p`, little-endian limb order.
    ///
    /// `p` must be canonical: non-empty, with a nonzero top limb
    /// ([`Error::BadInput`] otherwise). Selecting
    /// [`ReprSelector::Montgomery`] computes `mm` and `R^2 mod p`; the
    /// precomputation rejects limb counts outside
    /// `1..MAX_LIMBS / 2 - 2` with [`Error::CorruptionDetected`].
    pub fn new(p: &'p [Limb], ext_rep: ExtRep, int_rep: ReprSelector) -> Result<Self> {
        match p.last() {
            None => return Err(Error::BadInput),
            Some(high) if high.0 == 0 => return Err(Error::BadInput),
            Some(_) => (),
        }

        let repr = match int_rep {
            ReprSelector::Montgomery => Representation::Montgomery {
                mm: montgomery::neg_inv_mod_word(p[0]),
                rr: montgomery::r_squared(p)?,
            },
            ReprSelector::OptRed => Representation::OptRed,
        };

        Ok(Self {
            p,
            bits: raw::bit_length(p),
            ext_rep,
            repr,
        })
    }

    /// The modulus as little-endian limbs.
    pub fn as_limbs(&self) -> &'p [Limb] {
        self.p
    }

    /// Number of limbs in the modulus.
    pub fn num_limbs(&self) -> usize {
        self.p.len()
    }

    /// Position of the highest set bit of `p`.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Byte order used for import and export.
    pub fn ext_rep(&self) -> ExtRep {
        self.ext_rep
    }

    /// Minimum number of bytes an export must provide.
    pub fn byte_len(&self) -> usize {
        (self.bits + 7) / 8
    }

    /// The Montgomery constants `(mm, R^2 mod p)`, if this modulus uses
    /// the Montgomery representation.
    pub fn montgomery_params(&self) -> Option<(Limb, &[Limb])> {
        match &self.repr {
            Representation::Montgomery { mm, rr } => Some((*mm, rr.as_slice())),
            Representation::OptRed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_canonical_moduli() {
        assert_eq!(
            Modulus::new(&[], ExtRep::BigEndian, ReprSelector::OptRed).unwrap_err(),
            Error::BadInput
        );

        let padded = [Limb(7), Limb::ZERO];
        assert_eq!(
            Modulus::new(&padded, ExtRep::BigEndian, ReprSelector::OptRed).unwrap_err(),
            Error::BadInput
        );
    }

    #[test]
    fn opt_red_has_no_montgomery_params() {
        let p = [Limb(13)];
        let m = Modulus::new(&p, ExtRep::LittleEndian, ReprSelector::OptRed).unwrap();
        assert!(m.montgomery_params().is_none());
        assert_eq!(m.bits(), 4);
        assert_eq!(m.byte_len(), 1);
    }

    #[test]
    fn montgomery_setup_failure_reports_corruption() {
        let p = vec![Limb::MAX; MAX_LIMBS / 2];
        assert_eq!(
            Modulus::new(&p, ExtRep::BigEndian, ReprSelector::Montgomery).unwrap_err(),
            Error::CorruptionDetected
        );
    }
}
