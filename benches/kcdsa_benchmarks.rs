// -*- mode: rust; -*-
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-kcdsa, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/.0/> for full details.

//! Benchmark key generation, signing, verification and key agreement.

use criterion::{criterion_group, criterion_main, Criterion};

use rand::rngs::OsRng;

use curve25519_kcdsa::hazmat::{keygen, FieldElement};
use curve25519_kcdsa::x25519::{EphemeralSecret, PublicKey};
use curve25519_kcdsa::{Signer, SigningKey, Verifier};

mod kcdsa_benches {
    use super::*;

    fn keypair_generation(c: &mut Criterion) {
        c.bench_function("KCDSA keypair generation", move |b| {
            b.iter(|| SigningKey::generate(&mut OsRng))
        });
    }

    fn sign(c: &mut Criterion) {
        let signing_key = SigningKey::from_secret_phrase(b"benchmark").unwrap();
        let msg: &[u8] = b"";

        c.bench_function("KCDSA signing", move |b| b.iter(|| signing_key.sign(msg)));
    }

    fn verify(c: &mut Criterion) {
        let signing_key = SigningKey::from_secret_phrase(b"benchmark").unwrap();
        let verifying_key = signing_key.verifying_key();
        let msg: &[u8] = b"";
        let sig = signing_key.sign(msg);

        c.bench_function("KCDSA signature verification", move |b| {
            b.iter(|| verifying_key.verify(msg, &sig))
        });
    }

    fn raw_keygen(c: &mut Criterion) {
        let bytes = [0x5au8; 32];

        c.bench_function("Raw keygen with signing scalar", move |b| {
            b.iter(|| keygen(&bytes))
        });
    }

    criterion_group! {
        name = kcdsa_benches;
        config = Criterion::default();
        targets =
            keypair_generation,
            sign,
            verify,
            raw_keygen,
    }
}

mod x25519_benches {
    use super::*;

    fn diffie_hellman(c: &mut Criterion) {
        let bob_secret = EphemeralSecret::random_from_rng(&mut OsRng);
        let bob_public = PublicKey::from(&bob_secret);

        c.bench_function("X25519 diffie_hellman", move |b| {
            b.iter_with_setup(
                || EphemeralSecret::random_from_rng(&mut OsRng),
                |alice_secret| alice_secret.diffie_hellman(&bob_public),
            )
        });
    }

    criterion_group! {
        name = x25519_benches;
        config = Criterion::default();
        targets = diffie_hellman,
    }
}

mod field_benches {
    use super::*;

    fn invert(c: &mut Criterion) {
        let x = FieldElement::from_small(486662);

        c.bench_function("Field element inversion", move |b| b.iter(|| x.invert()));
    }

    fn sqrt(c: &mut Criterion) {
        let x = FieldElement::from_small(39420360);

        c.bench_function("Field element square root", move |b| b.iter(|| x.sqrt()));
    }

    criterion_group! {
        name = field_benches;
        config = Criterion::default();
        targets = invert, sqrt,
    }
}

criterion_main!(
    kcdsa_benches::kcdsa_benches,
    x25519_benches::x25519_benches,
    field_benches::field_benches,
);
