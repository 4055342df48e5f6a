//! Machine-word digits of little-endian multi-precision integers.

use core::fmt;

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// The unsigned integer type a single limb is stored in.
#[cfg(target_pointer_width = "32")]
pub type Word = u32;
/// The unsigned integer type a single limb is stored in.
#[cfg(target_pointer_width = "64")]
pub type Word = u64;

#[cfg(target_pointer_width = "32")]
pub(crate) type WideWord = u64;
#[cfg(target_pointer_width = "64")]
pub(crate) type WideWord = u128;

/// A single digit of a multi-precision integer, least significant first.
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct Limb(pub Word);

impl Limb {
    /// The value `0`.
    pub const ZERO: Self = Self(0);

    /// The value `1`.
    pub const ONE: Self = Self(1);

    /// Maximum value this limb can express.
    pub const MAX: Self = Self(Word::MAX);

    /// Size of a limb in bits.
    pub const BITS: usize = Word::BITS as usize;

    /// Size of a limb in bytes.
    pub const BYTES: usize = (Word::BITS as usize) / 8;

    /// Computes `self + rhs + carry`, returning the result along with the
    /// new carry (0 or 1).
    #[inline(always)]
    pub const fn adc(self, rhs: Limb, carry: Limb) -> (Limb, Limb) {
        let t = (self.0 as WideWord) + (rhs.0 as WideWord) + (carry.0 as WideWord);
        (Limb(t as Word), Limb((t >> Self::BITS) as Word))
    }

    /// Computes `self - (rhs + borrow)`, returning the result along with
    /// the new borrow (0 or the all-ones mask).
    #[inline(always)]
    pub const fn sbb(self, rhs: Limb, borrow: Limb) -> (Limb, Limb) {
        let rhs = (rhs.0 as WideWord) + ((borrow.0 >> (Self::BITS - 1)) as WideWord);
        let t = (self.0 as WideWord).wrapping_sub(rhs);
        (Limb(t as Word), Limb((t >> Self::BITS) as Word))
    }

    /// Number of leading zero bits.
    #[inline(always)]
    pub const fn leading_zeros(self) -> usize {
        self.0.leading_zeros() as usize
    }
}

impl ConditionallySelectable for Limb {
    #[inline]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(Word::conditional_select(&a.0, &b.0, choice))
    }
}

impl ConstantTimeEq for Limb {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl zeroize::DefaultIsZeroes for Limb {}

impl fmt::Debug for Limb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Limb(0x{:0width$X})", self.0, width = Self::BYTES * 2)
    }
}

impl fmt::Display for Limb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for Limb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl From<u8> for Limb {
    fn from(n: u8) -> Limb {
        Limb(n.into())
    }
}

#[cfg(test)]
mod tests {
    use super::Limb;

    #[test]
    fn adc_carries_across_word_boundary() {
        let (res, carry) = Limb::MAX.adc(Limb::ONE, Limb::ZERO);
        assert_eq!(res, Limb::ZERO);
        assert_eq!(carry, Limb::ONE);

        let (res, carry) = Limb::MAX.adc(Limb::ZERO, Limb::ONE);
        assert_eq!(res, Limb::ZERO);
        assert_eq!(carry, Limb::ONE);
    }

    #[test]
    fn sbb_borrow_is_a_mask() {
        let (res, borrow) = Limb::ZERO.sbb(Limb::ONE, Limb::ZERO);
        assert_eq!(res, Limb::MAX);
        assert_eq!(borrow, Limb::MAX);

        let (res, borrow) = Limb::ONE.sbb(Limb::ONE, Limb::ZERO);
        assert_eq!(res, Limb::ZERO);
        assert_eq!(borrow, Limb::ZERO);

        // An incoming borrow consumes one unit.
        let (res, borrow) = Limb::ONE.sbb(Limb::ZERO, Limb::MAX);
        assert_eq!(res, Limb::ZERO);
        assert_eq!(borrow, Limb::ZERO);
    }
}
