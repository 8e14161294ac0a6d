// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-kcdsa, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! Scalar multiplication on the Montgomery form of Curve25519.
//!
//! To avoid notational confusion with the Edwards code, we use
//! variables \\( u, v \\) for the Montgomery curve, so that “Montgomery
//! \\(u\\)” here corresponds to “Montgomery \\(x\\)” elsewhere.
//!
//! Montgomery arithmetic works not on the curve itself, but on the
//! \\(u\\)-line, which discards sign information and unifies the curve
//! and its quadratic twist.  See [_Montgomery curves and their
//! arithmetic_][costello-smith] by Costello and Smith for more details.
//!
//! Besides the single-scalar ladder used for key agreement and key
//! generation, this module carries the two operations the signature
//! scheme needs that are unusual on the \\(u\\)-line: recovering the
//! sign of \\(v\\) for a freshly generated key, and a simultaneous
//! double-scalar ladder for verification.
//!
//! [costello-smith]: https://eprint.iacr.org/2017/212.pdf

// We allow non snake_case names because coordinates in projective space are
// traditionally denoted by the capitalisation of their respective
// counterparts in affine space.
#![allow(non_snake_case)]

use core::hash::{Hash, Hasher};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::bigint::mul_add_small;
use crate::constants::{
    AMINUS2_OVER_FOUR, BASEPOINT_2V, BASEPOINT_ORDER_TIMES_8, BASEPOINT_R2V, BASEPOINT_U,
    BASEPOINT_V_SQUARED, MONTGOMERY_A,
};
use crate::errors::SignatureError;
use crate::field::FieldElement;
use crate::scalar;
use crate::scalar::clamp_integer;

/// Holds the \\(u\\)-coordinate of a point on the Montgomery form of
/// Curve25519 or its twist.
#[derive(Copy, Clone, Debug, Default)]
pub struct MontgomeryPoint(pub [u8; 32]);

impl ConstantTimeEq for MontgomeryPoint {
    fn ct_eq(&self, other: &MontgomeryPoint) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for MontgomeryPoint {
    fn eq(&self, other: &MontgomeryPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for MontgomeryPoint {}

impl Hash for MontgomeryPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl Zeroize for MontgomeryPoint {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl MontgomeryPoint {
    /// View this `MontgomeryPoint` as an array of bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert this `MontgomeryPoint` to an array of bytes.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` if this is the encoding of \\( u = 0 \\), which the
    /// ladder produces for the identity and for small-order inputs.
    pub fn is_identity(&self) -> bool {
        self.ct_eq(&MontgomeryPoint::default()).into()
    }

    /// Multiply this point by `clamp_integer(bytes)`.
    ///
    /// This is the X25519 function of RFC 7748: the most significant bit
    /// of the input \\(u\\)-coordinate is masked before decoding.
    pub fn mul_clamped(self, bytes: [u8; 32]) -> MontgomeryPoint {
        let mut scalar = clamp_integer(bytes);
        let mut u = self.0;
        u[31] &= 0x7f;

        let [accumulator, _] = ladder(&scalar, &FieldElement::from_bytes(&u));
        scalar.zeroize();

        MontgomeryPoint(accumulator.as_affine().to_bytes())
    }

    /// Multiply the basepoint by `clamp_integer(bytes)`.
    pub fn mul_base_clamped(bytes: [u8; 32]) -> MontgomeryPoint {
        let mut scalar = clamp_integer(bytes);
        let [accumulator, _] = ladder(&scalar, &FieldElement::from_small(BASEPOINT_U));
        scalar.zeroize();

        MontgomeryPoint(accumulator.as_affine().to_bytes())
    }

    /// Compute \\( v |P| + h B \\), where `self` is \\( P \\) and \\( B \\)
    /// is the basepoint.
    ///
    /// Only the \\(u\\)-coordinate of `P` is known, so the \\(u\\)-coordinates
    /// of \\( P + B \\) and \\( P - B \\) are first recovered from a square
    /// root of \\( v_P\^2 \\).  A single 256-step ladder then walks three
    /// states at once, each combining an even or odd multiple of `P` with an
    /// even or odd multiple of `B`:
    ///
    /// * `y[0]` is (even)`P` + (even)`B`;
    /// * `y[1]` is (even)`P` + (odd)`B` when the current `d` bit is 0, and
    ///   (odd)`P` + (even)`B` when it is 1;
    /// * `y[2]` is (odd)`P` + (odd)`B`.
    ///
    /// The selection sequence `d` is precomputed from `v` and `h` so that
    /// every step is one doubling and two differential additions.
    pub fn double_scalar_mul_basepoint(&self, v: &[u8; 32], h: &[u8; 32]) -> MontgomeryPoint {
        let g = FieldElement::from_small(BASEPOINT_U);
        let p = [g, FieldElement::from_bytes(&self.0)];

        // u(P ± B) = (v_P^2 + v_B^2 ∓ 2 v_P v_B) / (u_P - u_B)^2 - u_P - u_B - A
        let v2 = u_to_v_squared(&p[1]);
        let v_p = v2.sqrt();
        let j = v_p.is_negative().unwrap_u8() as usize;
        let v2_plus_vg2 = &v2 + &FieldElement::from_small(BASEPOINT_V_SQUARED);
        let two_v_vg = &BASEPOINT_2V * &v_p;

        let mut numerators = [FieldElement::ZERO; 2];
        numerators[j] = &v2_plus_vg2 - &two_v_vg;
        numerators[1 - j] = &v2_plus_vg2 + &two_v_vg;

        let inv_du2 = (&p[1] - &g).square().invert();
        let u_g_plus_a = FieldElement::from_small(BASEPOINT_U + MONTGOMERY_A);
        let sum_and_difference = numerators.map(|n| {
            (&(&(&n * &inv_du2) - &p[1]) - &u_g_plus_a).mul_small(1)
        });

        let (d, d_top) = selection_chain(v, h);

        let mut y = [
            ProjectivePoint::identity(),
            ProjectivePoint {
                U: p[d_top as usize],
                W: FieldElement::ONE,
            },
            ProjectivePoint {
                U: sum_and_difference[0],
                W: FieldElement::ONE,
            },
        ];

        let mut vi: u32 = 0;
        let mut hi: u32 = 0;
        let mut di: u32 = d_top;

        for i in (0..32).rev() {
            vi = (vi << 8) | v[i] as u32;
            hi = (hi << 8) | h[i] as u32;
            di = (di << 8) | d[i] as u32;

            for j in (0..8).rev() {
                let t = [y[0].prepare(), y[1].prepare(), y[2].prepare()];

                let k = (((vi ^ (vi >> 1)) >> j) & 1) + (((hi ^ (hi >> 1)) >> j) & 1);
                let doubled = t[k as usize].double();

                let k = ((di >> j) & 2) ^ (((di >> j) & 1) << 1);
                let added = t[1].add(&t[k as usize], &p[((di >> j) & 1) as usize]);

                let k = (((vi ^ hi) >> j) & 2) >> 1;
                let both = t[2].add(&t[0], &sum_and_difference[k as usize]);

                y = [doubled, added, both];
            }
        }

        let k = ((vi & 1) + (hi & 1)) as usize;
        MontgomeryPoint(y[k].as_affine().to_bytes())
    }
}

/// Derive the selection sequence for the double-scalar ladder.
///
/// Returns the 32 bytes of `d` together with the bit that sits above its
/// top byte, which picks the starting state of `y[1]`.
fn selection_chain(v: &[u8; 32], h: &[u8; 32]) -> ([u8; 32], u32) {
    let mut d = [0u8; 32];
    let mut vi: u32 = 0;
    let mut hi: u32 = 0;
    let mut di: u32 = 0;
    let mut nvh: u32 = 0;

    for i in 0..32 {
        vi = (vi >> 8) ^ (v[i] as u32) ^ ((v[i] as u32) << 1);
        hi = (hi >> 8) ^ (h[i] as u32) ^ ((h[i] as u32) << 1);
        nvh = !(vi ^ hi);
        di = (nvh & ((di & 0x80) >> 7)) ^ vi;
        di ^= nvh & ((di & 0x01) << 1);
        di ^= nvh & ((di & 0x02) << 1);
        di ^= nvh & ((di & 0x04) << 1);
        di ^= nvh & ((di & 0x08) << 1);
        di ^= nvh & ((di & 0x10) << 1);
        di ^= nvh & ((di & 0x20) << 1);
        di ^= nvh & ((di & 0x40) << 1);
        d[i] = di as u8;
    }

    let top = ((nvh & ((di & 0x80) << 1)) ^ vi) >> 8;
    (d, top)
}

/// A Curve25519 keypair as produced by [`keygen`].
///
/// The secret halves are wiped when the keypair is dropped.
pub struct Keypair {
    /// `P`, the \\(u\\)-coordinate of \\( k B \\).
    pub public: MontgomeryPoint,
    /// `s`, the private key for signing, with \\( s |P| = B \\).
    pub signing_scalar: [u8; 32],
    /// `k` after clamping, the private key for key agreement.
    pub agreement_scalar: [u8; 32],
}

impl Drop for Keypair {
    fn drop(&mut self) {
        self.signing_scalar.zeroize();
        self.agreement_scalar.zeroize();
    }
}

impl ZeroizeOnDrop for Keypair {}

/// Generate a keypair from 32 random bytes.
///
/// The input is clamped, multiplied by the basepoint to give the public
/// key `P`, and the signing scalar `s` is derived so that `s` times the
/// “positive” one of \\( \pm P \\) is the basepoint.
///
/// # Errors
///
/// Returns an `InvalidKeyMaterial` error if the signing scalar cannot be
/// inverted modulo the group order.  This does not happen for clamped
/// inputs.
///
/// # Warning
///
/// Deriving the signing scalar has data-dependent timing.
pub fn keygen(bytes: &[u8; 32]) -> Result<Keypair, SignatureError> {
    let k = clamp_integer(*bytes);

    let [p, p_plus_g] = ladder(&k, &FieldElement::from_small(BASEPOINT_U));
    let u_p = p.as_affine();
    let public = MontgomeryPoint(u_p.to_bytes());

    let keypair = Keypair {
        public,
        signing_scalar: [0u8; 32],
        agreement_scalar: k,
    };
    let signing_scalar = signing_scalar(&keypair.agreement_scalar, &u_p, &p_plus_g.as_affine())?;

    Ok(Keypair {
        signing_scalar,
        ..keypair
    })
}

/// Compute `s = 1/±k mod ℓ`, choosing the sign from the sign of
/// \\( v_P \\).
///
/// Rather than running a second ladder, \\( v_P \\) is recovered from the
/// \\(u\\)-coordinate of \\( P + B \\), which the ladder already holds:
///
/// \\( (u_{P+B} + u_P + u_B + A)(u_P - u_B)\^2 - v_P\^2 - v_B\^2 = -2 v_P v_B \\).
fn signing_scalar(
    k: &[u8; 32],
    u_p: &FieldElement,
    u_p_plus_g: &FieldElement,
) -> Result<[u8; 32], SignatureError> {
    let g = FieldElement::from_small(BASEPOINT_U);
    let v2 = u_to_v_squared(u_p);

    let sum = &(u_p_plus_g + u_p) + &FieldElement::from_small(BASEPOINT_U + MONTGOMERY_A);
    let du2 = (u_p - &g).square();
    let minus_2v_vg =
        &(&(&sum * &du2) - &v2) - &FieldElement::from_small(BASEPOINT_V_SQUARED);
    let minus_v = &minus_2v_vg * &BASEPOINT_R2V;

    let mut negated = BASEPOINT_ORDER_TIMES_8;
    mul_add_small(&mut negated, 0, k, -1);

    let keep_sign = minus_v.is_negative();
    let mut s = [0u8; 32];
    for i in 0..32 {
        s[i] = u8::conditional_select(&negated[i], &k[i], keep_sign);
    }

    let inverse = scalar::invert(&s);
    s.zeroize();
    negated.zeroize();
    inverse
}

/// \\( v\^2 = u\^3 + A u\^2 + u \\).
fn u_to_v_squared(u: &FieldElement) -> FieldElement {
    &(&(&u.square() + &u.mul_small(MONTGOMERY_A)) + &FieldElement::ONE) * u
}

/// Run the Montgomery ladder over all 256 bits of `scalar`, from the top
/// bit down, starting from \\( (0 B, 1 B) \\).
///
/// Returns \\( (k B, (k+1) B) \\) in projective form.  Each step selects
/// which state is doubled and which is added to by indexing with the
/// current bit, so both states go through the same operations every step.
fn ladder(scalar: &[u8; 32], affine_u: &FieldElement) -> [ProjectivePoint; 2] {
    let mut x = [
        ProjectivePoint::identity(),
        ProjectivePoint {
            U: *affine_u,
            W: FieldElement::ONE,
        },
    ];

    for i in (0..32).rev() {
        for j in (0..8).rev() {
            let bit1 = ((scalar[i] >> j) & 1) as usize;
            let bit0 = ((!scalar[i] >> j) & 1) as usize;

            let a = x[bit0].prepare();
            let b = x[bit1].prepare();
            x[bit0] = a.add(&b, affine_u);
            x[bit1] = b.double();
        }
    }

    x
}

/// A `ProjectivePoint` holds a point on the projective line
/// \\( \mathbb P(\mathbb F\_p) \\), which we identify with the Kummer
/// line of the Montgomery curve.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ProjectivePoint {
    pub U: FieldElement,
    pub W: FieldElement,
}

/// The sum and difference of a `ProjectivePoint`'s coordinates, which is
/// the form both ladder formulas consume.
#[derive(Copy, Clone, Debug)]
pub(crate) struct PreparedPoint {
    U_plus_W: FieldElement,
    U_minus_W: FieldElement,
}

impl ProjectivePoint {
    /// The point at infinity, \\( (1 : 0) \\).
    pub(crate) const fn identity() -> ProjectivePoint {
        ProjectivePoint {
            U: FieldElement::ONE,
            W: FieldElement::ZERO,
        }
    }

    pub(crate) fn prepare(&self) -> PreparedPoint {
        PreparedPoint {
            U_plus_W: &self.U + &self.W,
            U_minus_W: &self.U - &self.W,
        }
    }

    /// Dehomogenize this point to affine coordinates.
    ///
    /// # Return
    ///
    /// * \\( u = U / W \\) if \\( W \neq 0 \\);
    /// * \\( 0 \\) if \\( W \eq 0 \\);
    pub(crate) fn as_affine(&self) -> FieldElement {
        &self.U * &self.W.invert()
    }
}

impl PreparedPoint {
    /// Differential addition: given `self` \\( = P \\), `Q`, and the affine
    /// \\(u\\)-coordinate of \\( P - Q \\), compute \\( P + Q \\).
    pub(crate) fn add(&self, Q: &PreparedPoint, affine_PmQ: &FieldElement) -> ProjectivePoint {
        let u = &self.U_minus_W * &Q.U_plus_W;
        let w = &self.U_plus_W * &Q.U_minus_W;

        ProjectivePoint {
            U: (&u + &w).square(),
            W: &(&u - &w).square() * affine_PmQ,
        }
    }

    /// Doubling, using \\( (A - 2)/4 = 121665 \\).
    pub(crate) fn double(&self) -> ProjectivePoint {
        let t1 = self.U_plus_W.square();
        let t2 = self.U_minus_W.square();
        let diff = &t1 - &t2;
        let scaled = diff.mul_small(AMINUS2_OVER_FOUR);

        ProjectivePoint {
            U: &t1 * &t2,
            W: &(&t1 + &scaled) * &diff,
        }
    }
}
