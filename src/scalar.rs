// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-kcdsa, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! Arithmetic on scalars (integers mod the group order).
//!
//! Scalars are plain 32-byte little-endian arrays.  Unlike field
//! elements they are never held in a redundant form: every function here
//! consumes and produces canonical byte strings, built on the radix
//! \\( 2\^8 \\) routines in `bigint`.

use zeroize::Zeroize;

use crate::bigint::{div_mod, extended_gcd, mul_add_small, num_size};
use crate::constants::BASEPOINT_ORDER;
use crate::errors::{InternalError, SignatureError};

/// _Clamps_ the given little-endian representation of a 32-byte integer.
/// Clamping the value puts it in the range:
///
/// **n ∈ 2^254 + 8\*{0, 1, 2, 3, . . ., 2^251 − 1}**
///
/// The Curve25519 clamping operation takes **an arbitrary 256-bit random value** and
/// clears the most-significant bit (making it a 255-bit number), sets the next bit, and then
/// clears the 3 least-significant bits. In other words, it directly creates a scalar value that is
/// in the right form and pre-multiplied by the cofactor.  The fixed high bit also keeps the
/// number of ladder steps independent of the key.
#[must_use]
pub const fn clamp_integer(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= 0b1111_1000;
    bytes[31] &= 0b0111_1111;
    bytes[31] |= 0b0100_0000;
    bytes
}

/// Reduce a 256-bit little-endian integer modulo the group order.
#[must_use]
pub fn reduce(bytes: &[u8; 32]) -> [u8; 32] {
    let mut remainder = *bytes;
    let mut quotient = [0u8; 1];
    div_mod(&mut quotient, &mut remainder, 32, &BASEPOINT_ORDER);
    remainder
}

/// Reduce a 512-bit little-endian integer modulo the group order.
pub(crate) fn reduce_wide(bytes: &[u8; 64]) -> [u8; 32] {
    let mut wide = *bytes;
    let mut quotient = [0u8; 33];
    div_mod(&mut quotient, &mut wide, 64, &BASEPOINT_ORDER);

    let mut remainder = [0u8; 32];
    remainder.copy_from_slice(&wide[..32]);
    wide.zeroize();
    remainder
}

/// Compute the inverse of `a` modulo the group order, in the range
/// `[0, ℓ)`.
///
/// # Errors
///
/// Returns an `InvalidKeyMaterial` error when `a` is a multiple of the
/// group order and so has no inverse.
pub fn invert(a: &[u8; 32]) -> Result<[u8; 32], SignatureError> {
    let mut a = reduce(a);
    if num_size(&a) == 0 {
        return Err(InternalError::InvalidKeyMaterial.into());
    }
    let mut b = BASEPOINT_ORDER;
    let result = extended_gcd(&mut a, &mut b);
    a.zeroize();
    b.zeroize();

    let mut inverse = result?;
    // The coefficient comes back signed.
    if inverse[31] & 0x80 != 0 {
        mul_add_small(&mut inverse, 0, &BASEPOINT_ORDER, 1);
    }
    Ok(inverse)
}
