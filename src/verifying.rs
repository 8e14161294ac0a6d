// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-kcdsa, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! EC-KCDSA public keys.

use core::convert::TryFrom;
use core::fmt::Debug;

use digest::consts::U32;
use digest::Digest;

use sha2::Sha256;

use signature::{DigestVerifier, Verifier};

use subtle::ConstantTimeEq;

use crate::constants::*;
use crate::errors::*;
use crate::kcdsa;
use crate::montgomery::MontgomeryPoint;
use crate::signature::*;
use crate::signing::*;

/// An EC-KCDSA public key: the \\(u\\)-coordinate of the secret scalar
/// times the basepoint.
///
/// The same bytes serve as an X25519 public key for the matching
/// [`SigningKey::diffie_hellman`].
///
/// # Note
///
/// Any 32 bytes are accepted.  A key that is not the \\(u\\)-coordinate of a
/// point on the curve simply never verifies a signature.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct VerifyingKey(pub(crate) MontgomeryPoint);

impl Debug for VerifyingKey {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "VerifyingKey({:?})", self.0.as_bytes())
    }
}

impl AsRef<[u8]> for VerifyingKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<&SigningKey> for VerifyingKey {
    fn from(signing_key: &SigningKey) -> VerifyingKey {
        signing_key.verifying_key()
    }
}

impl From<[u8; PUBLIC_KEY_LENGTH]> for VerifyingKey {
    fn from(bytes: [u8; PUBLIC_KEY_LENGTH]) -> VerifyingKey {
        VerifyingKey::from_bytes(&bytes)
    }
}

impl From<MontgomeryPoint> for VerifyingKey {
    fn from(point: MontgomeryPoint) -> VerifyingKey {
        VerifyingKey(point)
    }
}

impl TryFrom<&[u8]> for VerifyingKey {
    type Error = SignatureError;

    fn try_from(bytes: &[u8]) -> Result<VerifyingKey, SignatureError> {
        let bytes: &[u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            SignatureError(InternalError::BytesLength {
                name: "VerifyingKey",
                length: PUBLIC_KEY_LENGTH,
            })
        })?;
        Ok(VerifyingKey::from_bytes(bytes))
    }
}

impl VerifyingKey {
    /// Convert this public key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0.to_bytes()
    }

    /// View this public key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.0.as_bytes()
    }

    /// Construct a `VerifyingKey` from its 32-byte little-endian encoding.
    #[inline]
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> VerifyingKey {
        VerifyingKey(MontgomeryPoint(*bytes))
    }

    /// The public key as a point on the Montgomery curve.
    #[inline]
    pub fn to_montgomery(&self) -> MontgomeryPoint {
        self.0
    }

    /// Verify a `signature` on a `prehashed_message` using the digest `D`.
    ///
    /// # Inputs
    ///
    /// * `prehashed_message` is an instantiated hash digest with 256-bits of
    ///   output which has had the message to be verified already fed into
    ///   its state.
    /// * `signature` is a purported signature on the message.
    ///
    /// The signer must have used the same digest `D` for both the message and
    /// the challenge.  The check recomputes
    /// \\( Y = v |P| + h B \\) and accepts exactly when
    /// \\( D(D(m) \Vert Y) = h \\).
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` if the signature is valid, and `Err` otherwise.
    pub fn verify_prehashed<D>(
        &self,
        prehashed_message: D,
        signature: &Signature,
    ) -> Result<(), SignatureError>
    where
        D: Digest<OutputSize = U32>,
    {
        let y = kcdsa::verify(&signature.v, &signature.h, &self.0);

        let expected = D::new()
            .chain_update(prehashed_message.finalize())
            .chain_update(y.as_bytes())
            .finalize();

        if expected.as_slice().ct_eq(&signature.h[..]).into() {
            Ok(())
        } else {
            log::debug!("signature does not verify under {:?}", self);
            Err(InternalError::Verify.into())
        }
    }
}

impl Verifier<Signature> for VerifyingKey {
    /// Verify a signature on a message with this keypair's public key,
    /// using SHA-256 as the digest.
    ///
    /// # Return
    ///
    /// Returns `Ok(())` if the signature is valid, and `Err` otherwise.
    fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), signature::Error> {
        self.verify_prehashed(Sha256::new().chain_update(message), signature)
            .map_err(Into::into)
    }
}

impl<D> DigestVerifier<D, Signature> for VerifyingKey
where
    D: Digest<OutputSize = U32>,
{
    fn verify_digest(&self, msg_digest: D, signature: &Signature) -> Result<(), signature::Error> {
        self.verify_prehashed(msg_digest, signature)
            .map_err(Into::into)
    }
}
