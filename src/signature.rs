// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-kcdsa, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! An EC-KCDSA signature.

use core::convert::TryFrom;
use core::fmt::Debug;

use crate::constants::*;
use crate::errors::*;

/// An EC-KCDSA signature over Curve25519.
///
/// # Note
///
/// These signatures are "detached": they do **not** include a copy of the
/// message which has been signed.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Signature {
    /// `v` is the signature scalar, \\( (x - h) s \bmod \ell \\), where `x`
    /// is the nonce and `s` the signer's signing scalar.
    pub(crate) v: [u8; 32],

    /// `h` is the digest of:
    ///
    /// - the digest of the message, and
    /// - the \\(u\\)-coordinate of the nonce times the basepoint.
    pub(crate) h: [u8; 32],
}

impl Debug for Signature {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "Signature( v: {:?}, h: {:?} )", &self.v, &self.h)
    }
}

impl Signature {
    /// Assemble a `Signature` from its two halves.
    #[inline]
    pub const fn from_components(v: [u8; 32], h: [u8; 32]) -> Signature {
        Signature { v, h }
    }

    /// The signature scalar `v`.
    #[inline]
    pub const fn v_bytes(&self) -> &[u8; 32] {
        &self.v
    }

    /// The hash half `h`.
    #[inline]
    pub const fn h_bytes(&self) -> &[u8; 32] {
        &self.h
    }

    /// Convert this `Signature` to a byte array, `v` followed by `h`.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut signature_bytes: [u8; SIGNATURE_LENGTH] = [0u8; SIGNATURE_LENGTH];

        signature_bytes[..32].copy_from_slice(&self.v[..]);
        signature_bytes[32..].copy_from_slice(&self.h[..]);
        signature_bytes
    }

    /// Construct a `Signature` from a byte array.
    ///
    /// No check is made on either half: any 64 bytes parse, and a malformed
    /// signature simply fails verification.
    #[inline]
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Signature {
        let mut v: [u8; 32] = [0u8; 32];
        let mut h: [u8; 32] = [0u8; 32];

        v.copy_from_slice(&bytes[..32]);
        h.copy_from_slice(&bytes[32..]);

        Signature { v, h }
    }

    /// Construct a `Signature` from a slice of bytes.
    #[inline]
    pub fn from_slice(bytes: &[u8]) -> Result<Signature, SignatureError> {
        let bytes: &[u8; SIGNATURE_LENGTH] = bytes.try_into().map_err(|_| {
            SignatureError(InternalError::BytesLength {
                name: "Signature",
                length: SIGNATURE_LENGTH,
            })
        })?;
        Ok(Signature::from_bytes(bytes))
    }
}

impl From<[u8; SIGNATURE_LENGTH]> for Signature {
    fn from(bytes: [u8; SIGNATURE_LENGTH]) -> Signature {
        Signature::from_bytes(&bytes)
    }
}

impl From<&Signature> for [u8; SIGNATURE_LENGTH] {
    fn from(signature: &Signature) -> [u8; SIGNATURE_LENGTH] {
        signature.to_bytes()
    }
}

impl From<Signature> for [u8; SIGNATURE_LENGTH] {
    fn from(signature: Signature) -> [u8; SIGNATURE_LENGTH] {
        signature.to_bytes()
    }
}

impl ::signature::SignatureEncoding for Signature {
    type Repr = [u8; SIGNATURE_LENGTH];
}

impl TryFrom<&[u8]> for Signature {
    type Error = SignatureError;

    fn try_from(bytes: &[u8]) -> Result<Signature, SignatureError> {
        Signature::from_slice(bytes)
    }
}
