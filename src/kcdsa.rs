// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-kcdsa, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! The EC-KCDSA signing equation and its verification counterpart.
//!
//! These are the raw primitives: they take the hash `h`, the nonce `x` and
//! the signing scalar `s` as bytes and know nothing about how those were
//! derived.  [`SigningKey`](crate::SigningKey) and
//! [`VerifyingKey`](crate::VerifyingKey) compose them with a digest.

use zeroize::Zeroize;

use crate::bigint::{mul_accumulate, mul_add_small, num_size};
use crate::constants::BASEPOINT_ORDER;
use crate::errors::{InternalError, SignatureError};
use crate::montgomery::MontgomeryPoint;
use crate::scalar;

/// Compute the signature scalar \\( v = (x - h) s \bmod \ell \\).
///
/// `h` is the hash half of the signature, `x` the (clamped) nonce whose
/// basepoint multiple was hashed into `h`, and `s` the signing scalar.
///
/// Both `x` and `h` are reduced modulo \\( \ell \\) first, which bounds the
/// difference to \\( (-\ell, \ell) \\) so that a single conditional addition
/// of \\( \ell \\) makes it nonnegative.
///
/// # Errors
///
/// Returns a `DegenerateSignature` error when `v` comes out as zero.  The
/// caller may retry with a different nonce or hash.
pub fn sign(h: &[u8; 32], x: &[u8; 32], s: &[u8; 32]) -> Result<[u8; 32], SignatureError> {
    let mut v = scalar::reduce(x);
    let h = scalar::reduce(h);
    mul_add_small(&mut v, 0, &h, -1);

    // Sign-extend the top byte: a negative difference has it at 0xf0..=0xff.
    let v31 = v[31] as i8 as i32;
    mul_add_small(&mut v, 0, &BASEPOINT_ORDER, (15 - v31) / 16);

    let mut product = [0u8; 64];
    mul_accumulate(&mut product, &v, s, 1);
    let result = scalar::reduce_wide(&product);

    v.zeroize();
    product.zeroize();

    if num_size(&result) == 0 {
        return Err(InternalError::DegenerateSignature.into());
    }
    Ok(result)
}

/// Recompute \\( Y = v |P| + h B \\) for a signature `(v, h)` under the
/// public key `P`.
///
/// For a valid signature, `Y` is the basepoint multiple of the signer's
/// nonce, so hashing it together with the message digest gives back `h`.
/// This function does no checking of its own.
pub fn verify(v: &[u8; 32], h: &[u8; 32], public: &MontgomeryPoint) -> MontgomeryPoint {
    public.double_scalar_mul_basepoint(v, h)
}
