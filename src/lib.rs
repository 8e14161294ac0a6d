// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-kcdsa, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

#![no_std]
#![doc = include_str!("../README.md")]
#![warn(
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//------------------------------------------------------------------------
// External dependencies:
//------------------------------------------------------------------------

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

pub use digest;
pub use rand_core;
pub use ::signature as signature_traits;

//------------------------------------------------------------------------
// curve25519-kcdsa public modules
//------------------------------------------------------------------------

// Useful constants, like the group order and the X25519 basepoint
pub mod constants;

// Scalar arithmetic mod ℓ = 2^252 + ..., the order of the basepoint
pub mod scalar;

// Point operations on the Montgomery form of Curve25519
pub mod montgomery;

// X25519 key agreement
pub mod x25519;

// Raw signing and verification primitives
pub mod hazmat;

//------------------------------------------------------------------------
// curve25519-kcdsa internal modules
//------------------------------------------------------------------------

// Finite field arithmetic mod p = 2^255 - 19
pub(crate) mod field;

// Radix 2^8 multiply-accumulate, division and extended gcd
pub(crate) mod bigint;

// The signing equation and the double-scalar verification ladder
pub(crate) mod kcdsa;

mod errors;
mod signature;
mod signing;
mod verifying;

pub use crate::constants::{PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH};
pub use crate::errors::SignatureError;
pub use crate::montgomery::MontgomeryPoint;
pub use crate::signature::Signature;
pub use crate::signing::SigningKey;
pub use crate::verifying::VerifyingKey;
pub use ::signature::{DigestSigner, DigestVerifier, Signer, Verifier};
