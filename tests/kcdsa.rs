// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-kcdsa, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! Integration tests for EC-KCDSA signing and verification.

use curve25519_kcdsa::{
    DigestSigner, DigestVerifier, Signature, Signer, SigningKey, Verifier, VerifyingKey,
};

use hex_literal::hex;
use rand::rngs::OsRng;
use rand::Rng;
use sha2::{Digest, Sha256};

const PHRASE: &[u8] = b"This is my very secret phrase";
const MESSAGE: &[u8] = b"This is a secret message that needs to be signed";

#[cfg(test)]
mod vectors {
    use super::*;

    #[test]
    fn known_answer() {
        let signing_key = SigningKey::from_secret_phrase(PHRASE).unwrap();
        let verifying_key = signing_key.verifying_key();

        assert_eq!(
            verifying_key.to_bytes(),
            hex!("698168d8669c9310d68101dfcc974ed4ef454692da6f028f68114db5fdcc4f6a")
        );

        let signature = signing_key.sign(MESSAGE);
        assert_eq!(
            signature.to_bytes(),
            hex!(
                "94956bf3de7cfdedb2562a0eff698fed7f3e54bbf4476fbb23a192ddea04040f"
                "68efa5d03c3f9ebec4109401b50433f1df267299d8b1ad2c485046c45e6b38da"
            )
        );
        assert!(verifying_key.verify(MESSAGE, &signature).is_ok());
    }

    /// A message whose nonce is smaller than its hash modulo the group
    /// order, so `x - h` is negative before reduction.
    #[test]
    fn negative_difference_still_verifies() {
        let signing_key = SigningKey::from_secret_phrase(PHRASE).unwrap();
        let signature = signing_key.sign(b"message 1");

        assert_eq!(
            signature.to_bytes(),
            hex!(
                "5aa6f1dfeacaf3b2726dc94137c1a017b0ea66f5490f0ffd4ed76563de076b08"
                "669373329ed90152e1896cfce1530d7a913d35561fe5f1e08096ba53e04759fe"
            )
        );
        assert!(signing_key
            .verifying_key()
            .verify(b"message 1", &signature)
            .is_ok());
    }

    #[test]
    fn public_keys_from_phrases() {
        let expected: [(&[u8], [u8; 32]); 3] = [
            (
                b"alpha",
                hex!("8eb9c7f051fb8d9c4a12cdc81245ca1cbf6206453d74c174adcbe4c5e322ee4c"),
            ),
            (
                b"gamma",
                hex!("5b808a57901f8ce2795362670f5f2f8476044d581aed9d6e5945bfd4240f3f2d"),
            ),
            (
                b"zeta",
                hex!("2192bfea8d6dc76efc3d16896a49aded3548382f1462356459a83210978f0121"),
            ),
        ];

        for (phrase, public) in expected.iter() {
            let signing_key = SigningKey::from_secret_phrase(phrase).unwrap();
            assert_eq!(signing_key.verifying_key().to_bytes(), *public);
        }
    }

    #[test]
    fn signatures_by_phrase_and_message() {
        let cases: [(&[u8], &[u8], [u8; 64]); 6] = [
            (
                b"alpha",
                b"seahawks",
                hex!(
                    "fb6a7b365c2c671c04b915c7a86ea6cea8fef84e03add8614276debfb23c9103"
                    "7c16a0ce2a64b6b15d0485fdf9a8f04c7a496197d316bc07d5eb92570f344865"
                ),
            ),
            (
                b"alpha",
                b"colts",
                hex!(
                    "96d881a2ab9be3769d1fc986ceb0d7896ec7f32ed00b9450a671401dbdde3c07"
                    "b0a4a89b6051f8d8bd8d05d2dc35ec72da9efa6c550384d32be813783601735e"
                ),
            ),
            (
                b"gamma",
                b"saints",
                hex!(
                    "22044d451a48aa3958de69cad0abc52d63c0a8ac4f2c125a0df3f3acba6da008"
                    "e90e7533f479f9112f048df61cdbf77fafcaf891a4a2093c6c881bb610f4c816"
                ),
            ),
            (
                b"gamma",
                b"patriots",
                hex!(
                    "ca3a352733f640181d5265b3a32df09d2166cd320c607345470f4289d5b96d0a"
                    "8c850cd32757d3a0758a07c4e796ae8991138411906b455731267fc1db1233c2"
                ),
            ),
            (
                b"zeta",
                b"seahawks",
                hex!(
                    "8a1818454a5237423cace3e28ada24a1f4efaea7c93ecc48a99315b27e465008"
                    "f18a7ef3da3e2ada02923f1bc595223c000b8f3a2c2e2b9d03bd874e28da2b5c"
                ),
            ),
            (
                b"zeta",
                b"colts",
                hex!(
                    "3074066ad56be2fd38bc7a030eedeecd8d01128e55ed7779f3a5c63c6074b303"
                    "179b892189ae19141ebb4415a1b1944971e5f3930c0e41057cc5d153252eeb87"
                ),
            ),
        ];

        for (phrase, message, expected) in cases.iter() {
            let signing_key = SigningKey::from_secret_phrase(phrase).unwrap();
            let signature = signing_key.sign(message);
            assert_eq!(signature.to_bytes(), *expected);
            assert!(signing_key.verifying_key().verify(message, &signature).is_ok());
        }
    }
}

#[cfg(test)]
mod integrations {
    use super::*;

    #[test]
    fn sign_verify() {
        let good: &[u8] = b"test message";
        let bad: &[u8] = b"wrong message";

        let signing_key = SigningKey::generate(&mut OsRng).unwrap();
        let verifying_key = signing_key.verifying_key();
        let good_sig = signing_key.sign(good);
        let bad_sig = signing_key.sign(bad);

        assert!(
            verifying_key.verify(good, &good_sig).is_ok(),
            "Verification of a valid signature failed!"
        );
        assert!(
            verifying_key.verify(good, &bad_sig).is_err(),
            "Verification of a signature on a different message passed!"
        );
        assert!(
            verifying_key.verify(bad, &good_sig).is_err(),
            "Verification of a signature on a different message passed!"
        );
    }

    #[test]
    fn signing_is_deterministic() {
        let signing_key = SigningKey::from_secret_phrase(b"deterministic").unwrap();
        let first = signing_key.sign(MESSAGE);
        let second = signing_key.sign(MESSAGE);
        assert_eq!(first, second);

        let again = SigningKey::from_secret_phrase(b"deterministic").unwrap();
        assert_eq!(again.sign(MESSAGE), first);
    }

    #[test]
    fn keys_do_not_cross_verify() {
        let phrases: [&[u8]; 3] = [b"alpha", b"gamma", b"zeta"];
        let messages: [&[u8]; 4] = [b"seahawks", b"saints", b"patriots", b"colts"];

        let keys: Vec<SigningKey> = phrases
            .iter()
            .map(|phrase| SigningKey::from_secret_phrase(phrase).unwrap())
            .collect();

        for (i, signer) in keys.iter().enumerate() {
            for message in messages.iter() {
                let signature = signer.sign(message);
                for (j, verifier) in keys.iter().enumerate() {
                    let result = verifier.verifying_key().verify(message, &signature);
                    assert_eq!(result.is_ok(), i == j);
                }
            }
        }
    }

    #[test]
    fn random_round_trips() {
        let mut rng = rand::thread_rng();
        for _ in 0..32 {
            let signing_key = SigningKey::generate(&mut rng).unwrap();
            let len = rng.gen_range(0..256);
            let message: Vec<u8> = (0..len).map(|_| rng.gen()).collect();

            let signature = signing_key.sign(&message);
            assert!(signing_key
                .verifying_key()
                .verify(&message, &signature)
                .is_ok());
        }
    }

    #[test]
    fn bit_flips_are_rejected() {
        let signing_key = SigningKey::from_secret_phrase(PHRASE).unwrap();
        let verifying_key = signing_key.verifying_key();
        let bytes = signing_key.sign(MESSAGE).to_bytes();

        for bit in 0..(8 * bytes.len()) {
            let mut flipped = bytes;
            flipped[bit / 8] ^= 1 << (bit % 8);
            let signature = Signature::from_bytes(&flipped);
            assert!(
                verifying_key.verify(MESSAGE, &signature).is_err(),
                "Flipping bit {} produced a valid signature",
                bit
            );
        }
    }

    #[test]
    fn prehashed_matches_plain() {
        let signing_key = SigningKey::from_secret_phrase(PHRASE).unwrap();
        let verifying_key = signing_key.verifying_key();

        let plain = signing_key.sign(MESSAGE);
        let prehashed = signing_key
            .sign_prehashed(Sha256::new().chain_update(MESSAGE))
            .unwrap();
        let digest_signed: Signature = signing_key.sign_digest(Sha256::new().chain_update(MESSAGE));
        assert_eq!(plain, prehashed);
        assert_eq!(plain, digest_signed);

        assert!(verifying_key
            .verify_digest(Sha256::new().chain_update(MESSAGE), &plain)
            .is_ok());
    }

    #[test]
    fn phrase_and_prehashed_phrase_agree() {
        let from_phrase = SigningKey::from_secret_phrase(PHRASE).unwrap();
        let from_digest =
            SigningKey::from_prehashed_phrase(Sha256::new().chain_update(PHRASE)).unwrap();
        let from_bytes = SigningKey::from_bytes(&Sha256::digest(PHRASE).into()).unwrap();

        assert_eq!(from_phrase.verifying_key(), from_digest.verifying_key());
        assert_eq!(from_phrase.verifying_key(), from_bytes.verifying_key());
    }

    #[test]
    fn signature_parsing() {
        let signing_key = SigningKey::from_secret_phrase(PHRASE).unwrap();
        let signature = signing_key.sign(MESSAGE);
        let bytes = signature.to_bytes();

        assert_eq!(Signature::try_from(&bytes[..]).unwrap(), signature);
        assert!(Signature::try_from(&bytes[..63]).is_err());

        let verifying_key = VerifyingKey::try_from(signing_key.verifying_key().as_bytes() as &[u8])
            .unwrap();
        assert!(verifying_key.verify(MESSAGE, &signature).is_ok());
    }
}
