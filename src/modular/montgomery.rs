//! Precomputation of the Montgomery constants owned by a modulus.

use zeroize::Zeroizing;

use crate::{Error, Limb, Result, Word};

use super::{raw, MAX_LIMBS};

/// Computes `-p^{-1} mod 2^W` from the low limb of an odd `p`.
///
/// Newton iteration doubles the number of correct low bits each step, so
/// `log2(W)` steps starting from a single correct bit suffice.
pub(crate) const fn neg_inv_mod_word(p0: Limb) -> Limb {
    let mut inv: Word = 1;
    let mut i = 0;
    while i < Word::BITS.trailing_zeros() {
        inv = inv.wrapping_mul((2 as Word).wrapping_sub(p0.0.wrapping_mul(inv)));
        i += 1;
    }
    Limb(inv.wrapping_neg())
}

/// Computes `R^2 mod p` where `R = 2^(W * p.len())` into a freshly
/// allocated, zeroized-on-drop limb vector.
///
/// Starting from 1, each of the `2 * W * p.len()` doublings shifts once
/// and subtracts `p` under a [`subtle::Choice`], so the run time depends
/// only on the limb count.
pub(crate) fn r_squared(p: &[Limb]) -> Result<Zeroizing<Vec<Limb>>> {
    let n = p.len();
    if n == 0 || n >= MAX_LIMBS / 2 - 2 {
        return Err(Error::CorruptionDetected);
    }

    let mut acc = Zeroizing::new(vec![Limb::ZERO; n]);
    let mut diff = Zeroizing::new(vec![Limb::ZERO; n]);
    acc[0] = Limb::ONE;

    for _ in 0..(2 * n * Limb::BITS) {
        let overflow = raw::shl1_assign(&mut acc);
        let underflow = raw::sub(&mut diff, &acc, p);
        // 2x < 2p, so a single subtraction reduces: take it when the
        // doubling overflowed the top limb or when 2x >= p.
        raw::conditional_assign(&mut acc, &diff, overflow | !underflow);
    }

    Ok(acc)
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use num_traits::One;

    use super::*;

    #[test]
    fn neg_inv_matches_definition() {
        for p0 in [1 as Word, 3, 23, 0x1001, Word::MAX, 0xFFFF_FFFB] {
            let mm = neg_inv_mod_word(Limb(p0));
            assert_eq!(mm.0.wrapping_mul(p0), Word::MAX, "p0 = {p0:#x}");
        }
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn r_squared_matches_bigint_oracle() {
        // 2^61 - 1 and an arbitrary two-limb odd value.
        let cases: [&[Word]; 2] = [&[0x1FFF_FFFF_FFFF_FFFF], &[0x0123_4567_89AB_CDEF, 0x11]];

        for words in cases {
            let p: Vec<Limb> = words.iter().copied().map(Limb).collect();
            let rr = r_squared(&p).unwrap();

            let p_big = BigUint::from_slice_words(words);
            let r = BigUint::one() << (Limb::BITS * words.len());
            let expect = (&r * &r) % &p_big;
            assert_eq!(BigUint::from_limbs(&rr), expect);
        }
    }

    #[test]
    fn r_squared_guards_limb_count() {
        assert_eq!(r_squared(&[]).unwrap_err(), Error::CorruptionDetected);

        let huge = vec![Limb::MAX; MAX_LIMBS / 2 - 2];
        assert_eq!(r_squared(&huge).unwrap_err(), Error::CorruptionDetected);
    }

    trait FromLimbs {
        fn from_slice_words(words: &[Word]) -> BigUint;
        fn from_limbs(limbs: &[Limb]) -> BigUint;
    }

    impl FromLimbs for BigUint {
        fn from_slice_words(words: &[Word]) -> BigUint {
            let mut bytes = Vec::new();
            for w in words {
                bytes.extend_from_slice(&w.to_le_bytes());
            }
            BigUint::from_bytes_le(&bytes)
        }

        fn from_limbs(limbs: &[Limb]) -> BigUint {
            let words: Vec<Word> = limbs.iter().map(|l| l.0).collect();
            Self::from_slice_words(&words)
        }
    }
}
