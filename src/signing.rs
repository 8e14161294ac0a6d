// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-kcdsa, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! EC-KCDSA signing keys.

use core::fmt::Debug;

use digest::consts::U32;
use digest::Digest;

use rand_core::CryptoRngCore;

use sha2::Sha256;

use signature::{DigestSigner, Signer};

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::*;
use crate::errors::*;
use crate::kcdsa;
use crate::montgomery::{keygen, MontgomeryPoint};
use crate::scalar::clamp_integer;
use crate::signature::*;
use crate::verifying::*;
use crate::x25519::{PublicKey, SharedSecret};

/// An EC-KCDSA signing key.
///
/// A signing key carries two secret scalars derived from the same secret:
/// the clamped scalar `k` whose basepoint multiple is the public key, used
/// for key agreement, and `s`, the inverse of \\( \pm k \\) modulo the group
/// order, used for signing.  Both are wiped on drop.
pub struct SigningKey {
    /// The clamped secret scalar `k`.
    pub(crate) agreement_scalar: [u8; 32],
    /// The signing scalar `s`.
    pub(crate) signing_scalar: [u8; 32],
    /// The public key \\( u(k B) \\).
    pub(crate) verifying_key: VerifyingKey,
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.agreement_scalar.zeroize();
        self.signing_scalar.zeroize();
    }
}

impl ZeroizeOnDrop for SigningKey {}

impl SigningKey {
    /// Construct a [`SigningKey`] from 32 secret bytes.
    ///
    /// The bytes are clamped, so any two inputs that agree after clamping
    /// give the same key.
    ///
    /// # Errors
    ///
    /// Fails only if the derived signing scalar cannot be inverted, which
    /// does not happen for clamped scalars.
    pub fn from_bytes(secret_key: &[u8; SECRET_KEY_LENGTH]) -> Result<SigningKey, SignatureError> {
        let keypair = keygen(secret_key)?;
        log::trace!("derived signing key for {:?}", keypair.public);

        Ok(SigningKey {
            agreement_scalar: keypair.agreement_scalar,
            signing_scalar: keypair.signing_scalar,
            verifying_key: VerifyingKey(keypair.public),
        })
    }

    /// Derive a [`SigningKey`] from a secret passphrase by hashing it with
    /// SHA-256.
    pub fn from_secret_phrase(phrase: &[u8]) -> Result<SigningKey, SignatureError> {
        SigningKey::from_prehashed_phrase(Sha256::new().chain_update(phrase))
    }

    /// Derive a [`SigningKey`] from a passphrase already fed into a digest
    /// with 256 bits of output.
    pub fn from_prehashed_phrase<D>(prehashed_phrase: D) -> Result<SigningKey, SignatureError>
    where
        D: Digest<OutputSize = U32>,
    {
        let mut secret: [u8; 32] = prehashed_phrase.finalize().into();
        let signing_key = SigningKey::from_bytes(&secret);
        secret.zeroize();
        signing_key
    }

    /// Generate an EC-KCDSA signing key from a cryptographically secure
    /// random number generator.
    pub fn generate<R: CryptoRngCore + ?Sized>(csprng: &mut R) -> Result<SigningKey, SignatureError> {
        let mut secret = [0u8; SECRET_KEY_LENGTH];
        csprng.fill_bytes(&mut secret);
        let signing_key = SigningKey::from_bytes(&secret);
        secret.zeroize();
        signing_key
    }

    /// The clamped secret scalar `k`.
    ///
    /// Passing these bytes back to [`SigningKey::from_bytes`] reproduces
    /// this key.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.agreement_scalar
    }

    /// The signing scalar `s`, with \\( s |P| = B \\).
    #[inline]
    pub fn signing_scalar(&self) -> &[u8; 32] {
        &self.signing_scalar
    }

    /// Get the [`VerifyingKey`] for this [`SigningKey`].
    #[inline]
    pub fn verifying_key(&self) -> VerifyingKey {
        self.verifying_key
    }

    /// Sign a `prehashed_message` with this key, using the same digest `D`
    /// for the nonce and the challenge.
    ///
    /// With `m` the digest of the message, the nonce is
    /// \\( x = D(m \Vert s) \\), so signing is deterministic.  The signature
    /// is `(v, h)` with \\( h = D(m \Vert u(x B)) \\) and
    /// \\( v = (x - h) s \bmod \ell \\).
    ///
    /// # Errors
    ///
    /// Returns a `DegenerateSignature` error if `v` is zero.  The nonce is a
    /// function of the message, so this message cannot be signed with this
    /// key and digest.
    pub fn sign_prehashed<D>(&self, prehashed_message: D) -> Result<Signature, SignatureError>
    where
        D: Digest<OutputSize = U32>,
    {
        let m = prehashed_message.finalize();

        let mut x: [u8; 32] = D::new()
            .chain_update(&m)
            .chain_update(self.signing_scalar)
            .finalize()
            .into();
        let y = MontgomeryPoint::mul_base_clamped(x);
        let h: [u8; 32] = D::new()
            .chain_update(&m)
            .chain_update(y.as_bytes())
            .finalize()
            .into();

        let mut nonce = clamp_integer(x);
        let v = kcdsa::sign(&h, &nonce, &self.signing_scalar);
        x.zeroize();
        nonce.zeroize();

        match v {
            Ok(v) => Ok(Signature { v, h }),
            Err(err) => {
                log::debug!("{} for {:?}", err, self.verifying_key);
                Err(err)
            }
        }
    }

    /// Perform X25519 key agreement with `their_public` using this key's
    /// agreement scalar.
    pub fn diffie_hellman(&self, their_public: &PublicKey) -> SharedSecret {
        SharedSecret(their_public.0.mul_clamped(self.agreement_scalar))
    }
}

impl Signer<Signature> for SigningKey {
    /// Sign a message with this signing key's secret key, using SHA-256 as
    /// the digest.
    fn try_sign(&self, message: &[u8]) -> Result<Signature, signature::Error> {
        self.sign_prehashed(Sha256::new().chain_update(message))
            .map_err(Into::into)
    }
}

impl<D> DigestSigner<D, Signature> for SigningKey
where
    D: Digest<OutputSize = U32>,
{
    fn try_sign_digest(&self, msg_digest: D) -> Result<Signature, signature::Error> {
        self.sign_prehashed(msg_digest).map_err(Into::into)
    }
}

impl From<&SigningKey> for PublicKey {
    fn from(signing_key: &SigningKey) -> PublicKey {
        PublicKey(signing_key.verifying_key.0)
    }
}
