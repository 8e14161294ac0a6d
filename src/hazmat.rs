// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-kcdsa, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! Low-level interfaces to the signature scheme.
//!
//! # ⚠️ Warning: Hazmat
//!
//! These primitives take raw scalars and hashes and perform none of the
//! derivations that make signatures safe: nonces must be fresh per
//! message, and `h` must actually commit to the message and the nonce
//! point.  Use [`SigningKey`](crate::SigningKey) and
//! [`VerifyingKey`](crate::VerifyingKey) unless you are implementing a
//! compatible protocol on top of these.

pub use crate::field::FieldElement;
pub use crate::kcdsa::{sign, verify};
pub use crate::montgomery::{keygen, Keypair};

#[cfg(test)]
mod test {
    use super::*;

    use crate::montgomery::MontgomeryPoint;
    use crate::scalar::clamp_integer;

    use hex_literal::hex;

    /// Runs the full scheme by hand, with SHA-256 as the digest.
    #[test]
    fn compose_sign_and_verify() {
        use sha2::{Digest, Sha256};

        let keypair = keygen(&Sha256::digest(b"This is my very secret phrase").into()).unwrap();
        let m = Sha256::digest(b"This is a secret message that needs to be signed");

        let x: [u8; 32] = Sha256::new()
            .chain_update(m)
            .chain_update(keypair.signing_scalar)
            .finalize()
            .into();
        let x = clamp_integer(x);
        let y = MontgomeryPoint::mul_base_clamped(x);
        let h: [u8; 32] = Sha256::new()
            .chain_update(m)
            .chain_update(y.as_bytes())
            .finalize()
            .into();
        let v = sign(&h, &x, &keypair.signing_scalar).unwrap();

        assert_eq!(
            v,
            hex!("94956bf3de7cfdedb2562a0eff698fed7f3e54bbf4476fbb23a192ddea04040f")
        );
        assert_eq!(verify(&v, &h, &keypair.public), y);
    }

    #[test]
    fn field_element_is_usable_from_outside() {
        let nine = FieldElement::from_small(9);
        let inverse = nine.invert();
        assert_eq!(&nine * &inverse, FieldElement::ONE);
    }
}
