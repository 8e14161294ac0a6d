// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-kcdsa, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! Arithmetic on little-endian byte strings in radix \\( 2\^8 \\).
//!
//! These routines are the building blocks for arithmetic modulo the group
//! order.  Each byte lane is processed with an `i32` carry, so multipliers
//! may be negative and the carries they return are sign-extended.

use crate::errors::InternalError;

/// Compute `p[m..m + x.len()] += z * x` in place and return the final
/// carry.
///
/// `z` may be negative, in which case the carry is a borrow and the
/// return value is negative.
pub(crate) fn mul_add_small(p: &mut [u8], m: usize, x: &[u8], z: i32) -> i32 {
    let mut v: i32 = 0;
    for (i, xi) in x.iter().enumerate() {
        v += p[i + m] as i32 + z * (*xi as i32);
        p[i + m] = v as u8;
        v >>= 8;
    }
    v
}

/// Compute `p += x * y * z`, where `z` is a small integer, `x` is 32 bytes
/// and `p` holds at least `32 + y.len()` bytes.  Returns the carry out of
/// the top byte.
pub(crate) fn mul_accumulate(p: &mut [u8], x: &[u8], y: &[u8], z: i32) -> i32 {
    const N: usize = 31;
    debug_assert_eq!(x.len(), 32);
    debug_assert!(p.len() > N + y.len());

    let mut w: i32 = 0;
    for (i, yi) in y.iter().enumerate() {
        let zy = z * (*yi as i32);
        w += mul_add_small(p, i, &x[..N], zy) + p[i + N] as i32 + zy * x[N] as i32;
        p[i + N] = w as u8;
        w >>= 8;
    }
    let top = y.len() + N;
    p[top] = (w + p[top] as i32) as u8;
    w >> 8
}

/// Divide the `n`-byte number in `r` by `d`, leaving the remainder in
/// `r[..d.len()]` and writing the `n - d.len() + 1` quotient bytes to `q`.
///
/// Each quotient byte is estimated from the top three bytes of the
/// running remainder and the top two bytes of `d`, subtracted, and
/// corrected by adding `d` back once when the estimate overshoots.
///
/// Requires `d` to be nonempty with a nonzero top byte.
pub(crate) fn div_mod(q: &mut [u8], r: &mut [u8], n: usize, d: &[u8]) {
    let t = d.len();
    debug_assert!(t > 0 && d[t - 1] != 0);

    let mut rn: i32 = 0;
    let mut dt: i32 = (d[t - 1] as i32) << 8;
    if t > 1 {
        dt |= d[t - 2] as i32;
    }

    let mut n = n;
    while n >= t {
        n -= 1;
        let mut z: i32 = (rn << 16) | ((r[n] as i32) << 8);
        if n > 0 {
            z |= r[n - 1] as i32;
        }
        z /= dt;
        // rn is now 0, or -1 on underflow
        rn += mul_add_small(r, n + 1 - t, d, -z);
        q[n + 1 - t] = (z + rn) as u8;
        mul_add_small(r, n + 1 - t, d, -rn);
        rn = r[n] as i32;
        r[n] = 0;
    }
    r[t - 1] = rn as u8;
}

/// The number of significant bytes in `x`.
pub(crate) fn num_size(x: &[u8]) -> usize {
    x.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1)
}

/// Run the extended Euclidean algorithm on `a` and `b`, destroying both.
///
/// Returns the 32-byte two's-complement coefficient `c` such that
/// `c * a ≡ gcd(a, b) (mod b)`.  When `b` is prime and `a` is not a
/// multiple of it, this is the inverse of `a` modulo `b`.
///
/// # Errors
///
/// Returns `InvalidKeyMaterial` when `a` is zero.
pub(crate) fn extended_gcd(a: &mut [u8; 32], b: &mut [u8; 32]) -> Result<[u8; 32], InternalError> {
    // The coefficients only need 32 bytes, but the products written by
    // `mul_accumulate` spill into the upper half.
    let mut x = [0u8; 64];
    let mut y = [0u8; 64];
    x[0] = 1;

    let mut an = num_size(&a[..]);
    if an == 0 {
        return Err(InternalError::InvalidKeyMaterial);
    }
    let mut bn = 32;
    let mut quotient = [0u8; 32];

    loop {
        let qn = bn + 1 - an;
        div_mod(&mut quotient, &mut b[..], bn, &a[..an]);
        bn = num_size(&b[..bn]);
        if bn == 0 {
            return Ok(low_half(&x));
        }
        mul_accumulate(&mut y, &x[..32], &quotient[..qn], -1);

        let qn = an + 1 - bn;
        div_mod(&mut quotient, &mut a[..], an, &b[..bn]);
        an = num_size(&a[..an]);
        if an == 0 {
            return Ok(low_half(&y));
        }
        mul_accumulate(&mut x, &y[..32], &quotient[..qn], -1);
    }
}

fn low_half(wide: &[u8; 64]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&wide[..32]);
    out
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::constants::BASEPOINT_ORDER;

    use num_bigint::{BigInt, BigUint, Sign};
    use num_traits::{One, Zero};
    use rand::{Rng, RngCore};

    fn as_bigint(bytes: &[u8]) -> BigInt {
        BigInt::from_biguint(Sign::Plus, BigUint::from_bytes_le(bytes))
    }

    #[test]
    fn mul_add_small_matches_bigint_reference() {
        let mut rng = rand::thread_rng();
        for _ in 0..512 {
            let n = rng.gen_range(1..=32);
            let m = rng.gen_range(0..=32);
            let z = rng.gen_range(-65536..=65536);
            let mut p = [0u8; 64];
            let mut x = [0u8; 32];
            rng.fill_bytes(&mut p[..m + n]);
            rng.fill_bytes(&mut x[..n]);

            let before = as_bigint(&p[m..m + n]);
            let carry = mul_add_small(&mut p, m, &x[..n], z);

            let total = before + as_bigint(&x[..n]) * BigInt::from(z);
            let modulus = BigInt::one() << (8 * n);
            let expected_low = ((&total % &modulus) + &modulus) % &modulus;
            let expected_carry = (&total - &expected_low) / &modulus;

            assert_eq!(as_bigint(&p[m..m + n]), expected_low);
            assert_eq!(BigInt::from(carry), expected_carry);
        }
    }

    #[test]
    fn mul_accumulate_builds_wide_product() {
        let mut rng = rand::thread_rng();
        for _ in 0..128 {
            let mut x = [0u8; 32];
            let mut y = [0u8; 32];
            rng.fill_bytes(&mut x);
            rng.fill_bytes(&mut y);

            let mut p = [0u8; 64];
            let carry = mul_accumulate(&mut p, &x, &y, 1);
            assert_eq!(carry, 0);
            assert_eq!(as_bigint(&p), as_bigint(&x) * as_bigint(&y));
        }
    }

    #[test]
    fn mul_accumulate_subtracts_with_negative_multiplier() {
        let mut rng = rand::thread_rng();
        for _ in 0..128 {
            let mut x = [0u8; 32];
            let mut y = [0u8; 8];
            let mut p = [0u8; 40];
            rng.fill_bytes(&mut x);
            rng.fill_bytes(&mut y);
            rng.fill_bytes(&mut p);

            let before = as_bigint(&p);
            mul_accumulate(&mut p, &x, &y, -1);

            let modulus = BigInt::one() << (8 * 40);
            let expected = ((before - as_bigint(&x) * as_bigint(&y)) % &modulus + &modulus) % &modulus;
            assert_eq!(as_bigint(&p), expected);
        }
    }

    #[test]
    fn div_mod_by_group_order() {
        let mut rng = rand::thread_rng();
        let l = as_bigint(&BASEPOINT_ORDER);
        for _ in 0..512 {
            let mut r = [0u8; 64];
            rng.fill_bytes(&mut r);
            let dividend = as_bigint(&r);

            let mut q = [0u8; 33];
            div_mod(&mut q, &mut r, 64, &BASEPOINT_ORDER);

            assert_eq!(as_bigint(&r[..32]), &dividend % &l);
            assert!(r[32..].iter().all(|&b| b == 0));
            assert_eq!(as_bigint(&q), &dividend / &l);
        }
    }

    #[test]
    fn div_mod_by_arbitrary_divisors() {
        let mut rng = rand::thread_rng();
        for _ in 0..1024 {
            let t = rng.gen_range(1..=32);
            let n = rng.gen_range(t..=32);
            let mut d = [0u8; 32];
            rng.fill_bytes(&mut d[..t]);
            if d[t - 1] == 0 {
                d[t - 1] = rng.gen_range(1..=255);
            }
            let mut r = [0u8; 32];
            rng.fill_bytes(&mut r[..n]);

            let dividend = as_bigint(&r[..n]);
            let divisor = as_bigint(&d[..t]);
            let mut q = [0u8; 32];
            div_mod(&mut q, &mut r, n, &d[..t]);

            assert_eq!(as_bigint(&r[..t]), &dividend % &divisor);
            assert_eq!(as_bigint(&q[..n - t + 1]), &dividend / &divisor);
        }
    }

    #[test]
    fn num_size_counts_significant_bytes() {
        assert_eq!(num_size(&[0u8; 32]), 0);
        assert_eq!(num_size(&[1, 0, 0, 0]), 1);
        assert_eq!(num_size(&[0, 0, 7, 0]), 3);
        assert_eq!(num_size(&BASEPOINT_ORDER), 32);
    }

    #[test]
    fn extended_gcd_inverts_modulo_group_order() {
        let mut rng = rand::thread_rng();
        let l = as_bigint(&BASEPOINT_ORDER);
        for _ in 0..128 {
            let mut a = [0u8; 32];
            rng.fill_bytes(&mut a);
            a[31] &= 0x7f;
            let value = as_bigint(&a);
            if (&value % &l).is_zero() {
                continue;
            }

            let mut b = BASEPOINT_ORDER;
            let c = extended_gcd(&mut a, &mut b).unwrap();
            let c = BigInt::from_signed_bytes_le(&c);

            let product = ((c * value) % &l + &l) % &l;
            assert!(product.is_one());
        }
    }

    #[test]
    fn extended_gcd_rejects_zero() {
        let mut a = [0u8; 32];
        let mut b = BASEPOINT_ORDER;
        assert_eq!(
            extended_gcd(&mut a, &mut b),
            Err(InternalError::InvalidKeyMaterial)
        );
    }
}
