// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-kcdsa, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! Errors which may occur when deriving keys, signing, or parsing keys and
//! signatures from wire formats.

// rustc seems to think the typenames in match statements (e.g. in
// Display) should be snake cased, for some reason.
#![allow(non_snake_case)]

use core::fmt;
use core::fmt::Display;

/// Internal errors.  Most application-level developers will likely not
/// need to pay any attention to these.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) enum InternalError {
    /// An error in the length of bytes handed to a constructor.
    ///
    /// To use this, pass a string specifying the `name` of the type which is
    /// returning the error, and the `length` in bytes which its constructor
    /// expects.
    BytesLength { name: &'static str, length: usize },
    /// The signing equation produced `v = 0`.  A different nonce or hash
    /// must be used.
    DegenerateSignature,
    /// A scalar has no inverse modulo the group order.
    InvalidKeyMaterial,
    /// The recomputed hash did not match the hash carried in the signature.
    Verify,
}

impl Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            InternalError::BytesLength { name: n, length: l } => {
                write!(f, "{} must be {} bytes in length", n, l)
            }
            InternalError::DegenerateSignature => {
                write!(f, "Signature scalar is zero, retry with a different nonce")
            }
            InternalError::InvalidKeyMaterial => {
                write!(f, "Scalar is not invertible modulo the group order")
            }
            InternalError::Verify => write!(f, "Verification equation was not satisfied"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InternalError {}

/// Errors which may occur while processing signatures and keypairs.
///
/// This error may arise due to:
///
/// * Being given bytes with a length different to what was expected.
///
/// * A degenerate signing result, where the signature scalar `v` came out
///   as zero.  This is recoverable by signing with a different nonce.
///
/// * Secret key material whose signing scalar cannot be inverted modulo
///   the group order.  This is not recoverable.
///
/// * Failure of a signature to satisfy the verification equation.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct SignatureError(pub(crate) InternalError);

impl SignatureError {
    /// Returns `true` if signing produced a zero scalar and may be retried
    /// with a different nonce or hash.
    pub fn is_degenerate_signature(&self) -> bool {
        self.0 == InternalError::DegenerateSignature
    }

    /// Returns `true` if the secret key material itself is unusable.
    pub fn is_invalid_key_material(&self) -> bool {
        self.0 == InternalError::InvalidKeyMaterial
    }

    /// Returns `true` if this error came from a failed verification.
    pub fn is_verification_failure(&self) -> bool {
        self.0 == InternalError::Verify
    }
}

impl Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SignatureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<InternalError> for SignatureError {
    fn from(err: InternalError) -> SignatureError {
        SignatureError(err)
    }
}

impl From<SignatureError> for signature::Error {
    #[cfg(not(feature = "std"))]
    fn from(_err: SignatureError) -> signature::Error {
        signature::Error::new()
    }

    #[cfg(feature = "std")]
    fn from(err: SignatureError) -> signature::Error {
        signature::Error::from_source(err)
    }
}
