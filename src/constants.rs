// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-kcdsa, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! Various constants, such as the group order and the basepoint.
//!
//! All byte-array constants are little-endian.

use crate::field::FieldElement;
use crate::montgomery::MontgomeryPoint;

/// The length of a curve25519 public key, in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// The length of a clamped secret scalar, in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// The length of a `Signature`, in bytes: the scalar `v` followed by the
/// hash `h`.
pub const SIGNATURE_LENGTH: usize = 64;

/// The order of the prime subgroup, \\( \ell = 2\^{252} +
/// 27742317777372353535851937790883648493 \\).
pub const BASEPOINT_ORDER: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
];

/// \\( 8 \ell \\), the smallest multiple of the group order that is at
/// least \\( 2\^{255} \\).
pub(crate) const BASEPOINT_ORDER_TIMES_8: [u8; 32] = [
    0x68, 0x9f, 0xae, 0xe7, 0xd2, 0x18, 0x93, 0xc0, 0xb2, 0xe6, 0xbc, 0x17, 0xf5, 0xce, 0xf7, 0xa6,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80,
];

/// The u-coordinate of the curve25519 basepoint, as a small integer.
pub(crate) const BASEPOINT_U: i32 = 9;

/// The Montgomery form of the basepoint, `u = 9`.
pub const X25519_BASEPOINT: MontgomeryPoint = MontgomeryPoint(X25519_BASEPOINT_BYTES);

/// The bytes of [`X25519_BASEPOINT`], for use with [`crate::x25519::x25519`].
pub const X25519_BASEPOINT_BYTES: [u8; 32] = [
    9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// The Montgomery curve coefficient `A` in \\( v\^2 = u\^3 + A u\^2 + u \\).
pub(crate) const MONTGOMERY_A: i32 = 486662;

/// \\( (A - 2)/4 \\), used in the doubling formula.
pub(crate) const AMINUS2_OVER_FOUR: i32 = 121665;

/// \\( v\^2 \\) of the basepoint, which fits in a single limb.
pub(crate) const BASEPOINT_V_SQUARED: i32 = 39420360;

/// \\( 2 v \\) of the basepoint.
pub(crate) const BASEPOINT_2V: FieldElement = FieldElement([
    39999547, 18689728, 59995525, 1648697, 57546132, 24010086, 19059592, 5425144, 63499247,
    16420658,
]);

/// \\( 1/(2 v) \\) of the basepoint.
pub(crate) const BASEPOINT_R2V: FieldElement = FieldElement([
    5744, 8160848, 4790893, 13779497, 35730846, 12541209, 49101323, 30047407, 40071253, 6226132,
]);
