// -*- mode: rust; coding: utf-8; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-kcdsa, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! Field arithmetic for ℤ/(2²⁵⁵-19), using ten signed 64-bit limbs.
//!
//! An element is held in radix \\( 2\^{25.5} \\): limbs `0, 2, 4, 6, 8`
//! carry 26 bits and limbs `1, 3, 5, 7, 9` carry 25 bits, so that limb
//! `i` has weight \\( 2\^{\lceil 25.5 i \rceil} \\).  The representation is
//! redundant: limbs may be negative or slightly over-full, and two
//! representations of the same value need not be equal limb-wise.
//!
//! Every operation here either produces a *reduced* element or says that
//! it does not.  Multiplication, squaring, `mul_small`, `from_bytes` and
//! `from_small` all produce reduced elements.  Addition and subtraction
//! do not: their output may only be fed into a multiplication (which
//! accepts unreduced inputs) before it is added to or subtracted from
//! again.  Serialization via [`FieldElement::to_bytes`] requires a reduced
//! input; multiply by [`FieldElement::ONE`] first when in doubt.

use core::fmt::Debug;
use core::ops::{Add, Mul, Sub};

use subtle::Choice;
use subtle::ConstantTimeEq;

/// Mask for the 25-bit limbs.
const LOW_25_BITS: i64 = (1 << 25) - 1;
/// Mask for the 26-bit limbs.
const LOW_26_BITS: i64 = (1 << 26) - 1;

/// A `FieldElement` represents an element of the field
/// \\( \mathbb Z / (2\^{255} - 19)\\).
///
/// The limbs are signed; see the module documentation for the reduced
/// and unreduced states.
#[derive(Copy, Clone)]
pub struct FieldElement(pub(crate) [i64; 10]);

impl Debug for FieldElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement({:?})", &self.0[..])
    }
}

impl ConstantTimeEq for FieldElement {
    /// Test equality between two `FieldElement`s.  Since the internal
    /// representation is not canonical, the field elements are
    /// serialized before comparison.  Both sides must be reduced.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl<'a, 'b> Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    /// Limb-wise addition.  The output is *not* reduced.
    fn add(self, rhs: &'b FieldElement) -> FieldElement {
        let mut output = *self;
        for i in 0..10 {
            output.0[i] += rhs.0[i];
        }
        output
    }
}

impl<'a, 'b> Sub<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    /// Limb-wise subtraction.  The output is *not* reduced.
    fn sub(self, rhs: &'b FieldElement) -> FieldElement {
        let mut output = *self;
        for i in 0..10 {
            output.0[i] -= rhs.0[i];
        }
        output
    }
}

impl<'a, 'b> Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    /// Schoolbook multiplication.  The inputs need not be reduced; the
    /// output is.
    ///
    /// Cross terms whose limb index reaches 10 or more wrap around using
    /// \\( 2\^{255} \equiv 19 \\).  When both factors come from odd limbs
    /// the product carries an extra factor of two from the half-bit
    /// offset, which is where the 38 (and 2) coefficients come from.
    #[rustfmt::skip] // keep alignment of the accumulation terms
    fn mul(self, rhs: &'b FieldElement) -> FieldElement {
        let [x0, x1, x2, x3, x4, x5, x6, x7, x8, x9] = self.0;
        let [y0, y1, y2, y3, y4, y5, y6, y7, y8, y9] = rhs.0;
        let mut z = [0i64; 10];

        let mut t = x0 * y8 + x2 * y6 + x4 * y4 + x6 * y2 + x8 * y0
            + 2 * (x1 * y7 + x3 * y5 + x5 * y3 + x7 * y1)
            + 38 * (x9 * y9);
        z[8] = t & LOW_26_BITS;
        t = (t >> 26)
            + x0 * y9 + x1 * y8 + x2 * y7 + x3 * y6 + x4 * y5
            + x5 * y4 + x6 * y3 + x7 * y2 + x8 * y1 + x9 * y0;
        z[9] = t & LOW_25_BITS;
        t = x0 * y0
            + 19 * ((t >> 25) + x2 * y8 + x4 * y6 + x6 * y4 + x8 * y2)
            + 38 * (x1 * y9 + x3 * y7 + x5 * y5 + x7 * y3 + x9 * y1);
        z[0] = t & LOW_26_BITS;
        t = (t >> 26) + x0 * y1 + x1 * y0
            + 19 * (x2 * y9 + x3 * y8 + x4 * y7 + x5 * y6
                  + x6 * y5 + x7 * y4 + x8 * y3 + x9 * y2);
        z[1] = t & LOW_25_BITS;
        t = (t >> 25) + x0 * y2 + x2 * y0
            + 19 * (x4 * y8 + x6 * y6 + x8 * y4)
            + 2 * (x1 * y1)
            + 38 * (x3 * y9 + x5 * y7 + x7 * y5 + x9 * y3);
        z[2] = t & LOW_26_BITS;
        t = (t >> 26) + x0 * y3 + x1 * y2 + x2 * y1 + x3 * y0
            + 19 * (x4 * y9 + x5 * y8 + x6 * y7 + x7 * y6 + x8 * y5 + x9 * y4);
        z[3] = t & LOW_25_BITS;
        t = (t >> 25) + x0 * y4 + x2 * y2 + x4 * y0
            + 19 * (x6 * y8 + x8 * y6)
            + 2 * (x1 * y3 + x3 * y1)
            + 38 * (x5 * y9 + x7 * y7 + x9 * y5);
        z[4] = t & LOW_26_BITS;
        t = (t >> 26) + x0 * y5 + x1 * y4 + x2 * y3 + x3 * y2 + x4 * y1 + x5 * y0
            + 19 * (x6 * y9 + x7 * y8 + x8 * y7 + x9 * y6);
        z[5] = t & LOW_25_BITS;
        t = (t >> 25) + x0 * y6 + x2 * y4 + x4 * y2 + x6 * y0
            + 19 * (x8 * y8)
            + 2 * (x1 * y5 + x3 * y3 + x5 * y1)
            + 38 * (x7 * y9 + x9 * y7);
        z[6] = t & LOW_26_BITS;
        t = (t >> 26)
            + x0 * y7 + x1 * y6 + x2 * y5 + x3 * y4
            + x4 * y3 + x5 * y2 + x6 * y1 + x7 * y0
            + 19 * (x8 * y9 + x9 * y8);
        z[7] = t & LOW_25_BITS;
        t = (t >> 25) + z[8];
        z[8] = t & LOW_26_BITS;
        z[9] += t >> 26;

        FieldElement(z)
    }
}

impl FieldElement {
    /// The additive identity.
    pub const ZERO: FieldElement = FieldElement([0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// The multiplicative identity.
    pub const ONE: FieldElement = FieldElement([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// Construct a reduced element from a small integer in the range
    /// `-185861411 ..= 185861411`.
    pub const fn from_small(value: i32) -> FieldElement {
        debug_assert!(value >= -185861411 && value <= 185861411);
        FieldElement([value as i64, 0, 0, 0, 0, 0, 0, 0, 0, 0])
    }

    /// Load a `FieldElement` from 32 little-endian bytes.
    ///
    /// The top bit of byte 31 is *not* ignored: it lands in limb 9, which
    /// is still a valid reduced element.  Callers that must follow the
    /// X25519 convention mask it first.
    #[rustfmt::skip] // keep the bit layout readable
    pub fn from_bytes(bytes: &[u8; 32]) -> FieldElement {
        let m = |i: usize| bytes[i] as i64;

        FieldElement([
             m( 0)        | m( 1) <<  8 | m( 2) << 16 | (m( 3) &  3) << 24,
            (m( 3) & !3) >> 2 | m( 4) <<  6 | m( 5) << 14 | (m( 6) &  7) << 22,
            (m( 6) & !7) >> 3 | m( 7) <<  5 | m( 8) << 13 | (m( 9) & 31) << 21,
            (m( 9) & !31) >> 5 | m(10) <<  3 | m(11) << 11 | (m(12) & 63) << 19,
            (m(12) & !63) >> 6 | m(13) <<  2 | m(14) << 10 |  m(15)       << 18,
             m(16)        | m(17) <<  8 | m(18) << 16 | (m(19) &  1) << 24,
            (m(19) & !1) >> 1 | m(20) <<  7 | m(21) << 15 | (m(22) &  7) << 23,
            (m(22) & !7) >> 3 | m(23) <<  5 | m(24) << 13 | (m(25) & 15) << 21,
            (m(25) & !15) >> 4 | m(26) <<  4 | m(27) << 12 | (m(28) & 63) << 20,
            (m(28) & !63) >> 6 | m(29) <<  2 | m(30) << 10 |  m(31)       << 18,
        ])
    }

    /// Check whether a reduced element is at least \\( 2\^{255} - 19 \\).
    ///
    /// Rather than propagating carries, this looks for the two limb
    /// patterns that can reach the modulus: every limb saturated with the
    /// bottom limb within 19 of its maximum, or the top limb over-full.
    /// A negative top limb makes the whole value negative, even when its
    /// low bits look saturated.
    pub(crate) fn is_overflow(&self) -> bool {
        let x = &self.0;
        (x[9] >= 0
            && x[0] > LOW_26_BITS - 19
            && (x[1] & x[3] & x[5] & x[7] & x[9]) == LOW_25_BITS
            && (x[2] & x[4] & x[6] & x[8]) == LOW_26_BITS)
            || x[9] > LOW_25_BITS
    }

    /// Serialize this `FieldElement` to a 32-byte array.  The encoding is
    /// canonical.  The input must be reduced.
    pub fn to_bytes(&self) -> [u8; 32] {
        let x = &self.0;
        let mut s = [0u8; 32];

        // Fold in a single subtraction of p (or addition, for a negative
        // top limb) before carrying.
        let mut ld: i64 = (self.is_overflow() as i64) - ((x[9] < 0) as i64);
        let ud: i64 = ld * -(LOW_25_BITS + 1);
        ld *= 19;

        let mut t = ld + x[0] + (x[1] << 26);
        s[0..4].copy_from_slice(&(t as u32).to_le_bytes());
        t = (t >> 32) + (x[2] << 19);
        s[4..8].copy_from_slice(&(t as u32).to_le_bytes());
        t = (t >> 32) + (x[3] << 13);
        s[8..12].copy_from_slice(&(t as u32).to_le_bytes());
        t = (t >> 32) + (x[4] << 6);
        s[12..16].copy_from_slice(&(t as u32).to_le_bytes());
        t = (t >> 32) + x[5] + (x[6] << 25);
        s[16..20].copy_from_slice(&(t as u32).to_le_bytes());
        t = (t >> 32) + (x[7] << 19);
        s[20..24].copy_from_slice(&(t as u32).to_le_bytes());
        t = (t >> 32) + (x[8] << 12);
        s[24..28].copy_from_slice(&(t as u32).to_le_bytes());
        t = (t >> 32) + ((x[9] + ud) << 6);
        s[28..32].copy_from_slice(&(t as u32).to_le_bytes());

        s
    }

    /// Multiply by a small integer in the range `-185861411 ..= 185861411`.
    /// The input need not be reduced; the output is.
    pub fn mul_small(&self, y: i32) -> FieldElement {
        debug_assert!(y >= -185861411 && y <= 185861411);
        let x = &self.0;
        let y = y as i64;
        let mut z = [0i64; 10];

        let mut t = x[8] * y;
        z[8] = t & LOW_26_BITS;
        t = (t >> 26) + x[9] * y;
        z[9] = t & LOW_25_BITS;
        t = 19 * (t >> 25) + x[0] * y;
        z[0] = t & LOW_26_BITS;
        t = (t >> 26) + x[1] * y;
        z[1] = t & LOW_25_BITS;
        t = (t >> 25) + x[2] * y;
        z[2] = t & LOW_26_BITS;
        t = (t >> 26) + x[3] * y;
        z[3] = t & LOW_25_BITS;
        t = (t >> 25) + x[4] * y;
        z[4] = t & LOW_26_BITS;
        t = (t >> 26) + x[5] * y;
        z[5] = t & LOW_25_BITS;
        t = (t >> 25) + x[6] * y;
        z[6] = t & LOW_26_BITS;
        t = (t >> 26) + x[7] * y;
        z[7] = t & LOW_25_BITS;
        t = (t >> 25) + z[8];
        z[8] = t & LOW_26_BITS;
        z[9] += t >> 26;

        FieldElement(z)
    }

    /// Compute `self^2`.  The input need not be reduced; the output is.
    #[rustfmt::skip] // keep alignment of the accumulation terms
    pub fn square(&self) -> FieldElement {
        let [x0, x1, x2, x3, x4, x5, x6, x7, x8, x9] = self.0;
        let mut z = [0i64; 10];

        let mut t = x4 * x4
            + 2 * (x0 * x8 + x2 * x6)
            + 38 * (x9 * x9)
            + 4 * (x1 * x7 + x3 * x5);
        z[8] = t & LOW_26_BITS;
        t = (t >> 26) + 2 * (x0 * x9 + x1 * x8 + x2 * x7 + x3 * x6 + x4 * x5);
        z[9] = t & LOW_25_BITS;
        t = 19 * (t >> 25) + x0 * x0
            + 38 * (x2 * x8 + x4 * x6 + x5 * x5)
            + 76 * (x1 * x9 + x3 * x7);
        z[0] = t & LOW_26_BITS;
        t = (t >> 26) + 2 * (x0 * x1)
            + 38 * (x2 * x9 + x3 * x8 + x4 * x7 + x5 * x6);
        z[1] = t & LOW_25_BITS;
        t = (t >> 25) + 19 * (x6 * x6)
            + 2 * (x0 * x2 + x1 * x1)
            + 38 * (x4 * x8)
            + 76 * (x3 * x9 + x5 * x7);
        z[2] = t & LOW_26_BITS;
        t = (t >> 26) + 2 * (x0 * x3 + x1 * x2)
            + 38 * (x4 * x9 + x5 * x8 + x6 * x7);
        z[3] = t & LOW_25_BITS;
        t = (t >> 25) + x2 * x2
            + 2 * (x0 * x4)
            + 38 * (x6 * x8 + x7 * x7)
            + 4 * (x1 * x3)
            + 76 * (x5 * x9);
        z[4] = t & LOW_26_BITS;
        t = (t >> 26) + 2 * (x0 * x5 + x1 * x4 + x2 * x3)
            + 38 * (x6 * x9 + x7 * x8);
        z[5] = t & LOW_25_BITS;
        t = (t >> 25) + 19 * (x8 * x8)
            + 2 * (x0 * x6 + x2 * x4 + x3 * x3)
            + 4 * (x1 * x5)
            + 76 * (x7 * x9);
        z[6] = t & LOW_26_BITS;
        t = (t >> 26) + 2 * (x0 * x7 + x1 * x6 + x2 * x5 + x3 * x4)
            + 38 * (x8 * x9);
        z[7] = t & LOW_25_BITS;
        t = (t >> 25) + z[8];
        z[8] = t & LOW_26_BITS;
        z[9] += t >> 26;

        FieldElement(z)
    }

    /// Compute `self^(2^k)` by repeated squaring.
    fn pow2k(&self, k: u32) -> FieldElement {
        debug_assert!(k > 0);
        let mut z = self.square();
        for _ in 1..k {
            z = z.square();
        }
        z
    }

    /// Shared prefix of the inversion and square-root exponent chains.
    ///
    /// Returns `(self^11, self^(2^252 - 4))`.
    fn pow22524(&self) -> (FieldElement, FieldElement) {
        let t1 = self.square(); //                    2
        let t2 = t1.square(); //                      4
        let t0 = t2.square(); //                      8
        let t2 = &t0 * self; //                       9
        let t0 = &t2 * &t1; //                       11
        let t1 = t0.square(); //                     22
        let t3 = &t1 * &t2; //                       2^5   - 2^0
        let t1 = t3.pow2k(5); //                     2^10  - 2^5
        let t2 = &t1 * &t3; //                       2^10  - 2^0
        let t3 = t2.pow2k(10); //                    2^20  - 2^10
        let t1 = &t3 * &t2; //                       2^20  - 2^0
        let t4 = t1.pow2k(20); //                    2^40  - 2^20
        let t3 = &t4 * &t1; //                       2^40  - 2^0
        let t3 = t3.pow2k(10); //                    2^50  - 2^10
        let t1 = &t3 * &t2; //                       2^50  - 2^0
        let t3 = t1.pow2k(50); //                    2^100 - 2^50
        let t2 = &t3 * &t1; //                       2^100 - 2^0
        let t4 = t2.pow2k(100); //                   2^200 - 2^100
        let t3 = &t4 * &t2; //                       2^200 - 2^0
        let t3 = t3.pow2k(50); //                    2^250 - 2^50
        let t2 = &t3 * &t1; //                       2^250 - 2^0
        let t2 = t2.pow2k(2); //                     2^252 - 2^2

        (t0, t2)
    }

    /// Given a nonzero field element, compute its inverse as
    /// `self^(p-2)`.  The input need not be reduced; the output is.
    ///
    /// This function returns zero on input zero.
    pub fn invert(&self) -> FieldElement {
        let (t11, t2) = self.pow22524();
        let t = t2.pow2k(3); //                      2^255 - 2^5
        &t * &t11 //                                 2^255 - 21
    }

    /// Raise this field element to the power `(p-5)/8 = 2^252 - 3`, the
    /// first step of a square root.
    pub fn pow_p58(&self) -> FieldElement {
        let (_, t2) = self.pow22524();
        self * &t2
    }

    /// Determine if this `FieldElement` is negative, in the sense used by
    /// the signing scheme: the low bit of the bottom limb, flipped when the
    /// element is at or above the modulus or its top limb is negative.
    ///
    /// The input must be reduced.
    ///
    /// # Return
    ///
    /// If negative, return `Choice(1)`.  Otherwise, return `Choice(0)`.
    pub fn is_negative(&self) -> Choice {
        let overflow_or_negative = self.is_overflow() || self.0[9] < 0;
        Choice::from((overflow_or_negative as u8) ^ ((self.0[0] & 1) as u8))
    }

    /// Compute a square root of `self` using Atkin's method for
    /// \\( p \equiv 5 \pmod 8 \\):
    ///
    /// \\( v = (2u)\^{(p-5)/8} \\), then \\( x = u v (2 u v\^2 - 1) \\).
    ///
    /// The input need not be a square; if it is not, the output is some
    /// unrelated element.  The input must be reduced.
    pub fn sqrt(&self) -> FieldElement {
        let two_u = self + self;
        let v = two_u.pow_p58();
        let two_uv2 = &two_u * &v.square();
        let i = &two_uv2 - &FieldElement::ONE;
        self * &(&v * &i)
    }
}
