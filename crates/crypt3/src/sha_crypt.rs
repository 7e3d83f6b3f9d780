//! The SHA-crypt digest-mixing algorithm for `$5$` and `$6$`.
//!
//! # Algorithm Source
//!
//! Ulrich Drepper's SHA-crypt specification, as implemented by glibc:
//! - Specification: https://www.akkadia.org/drepper/SHA-crypt.txt
//! - glibc: https://sourceware.org/git/?p=glibc.git;a=blob;f=crypt/sha512-crypt.c
//!
//! The two schemes run the identical algorithm parameterized by the digest
//! primitive and width (SHA-256 / 32 bytes vs SHA-512 / 64 bytes); only
//! the magic prefix and the final output permutation differ. As with
//! MD5-crypt, the per-round schedule keyed on parity and divisibility by
//! 3 and 7 is normative and covered by the specification's published test
//! vectors.

use crate::b64::encode_digest;
use crate::scheme::Scheme;
use sha2::{Digest, Sha256, Sha512};

/// Output permutation for SHA-256-crypt, `(low, mid, high)` triples over
/// the 32-byte digest plus a 2-byte tail, from glibc's `b64_from_24bit`
/// call sequence. 43 characters.
#[rustfmt::skip]
const SHA256_ORDER: [usize; 32] = [
    20, 10,  0,
    11,  1, 21,
     2, 22, 12,
    23, 13,  3,
    14,  4, 24,
     5, 25, 15,
    26, 16,  6,
    17,  7, 27,
     8, 28, 18,
    29, 19,  9,
    30, 31,
];

/// Output permutation for SHA-512-crypt: 21 triples striding the 64-byte
/// digest by 21, plus byte 63 alone. 86 characters.
#[rustfmt::skip]
const SHA512_ORDER: [usize; 64] = [
    42, 21,  0,
     1, 43, 22,
    23,  2, 44,
    45, 24,  3,
     4, 46, 25,
    26,  5, 47,
    48, 27,  6,
     7, 49, 28,
    29,  8, 50,
    51, 30,  9,
    10, 52, 31,
    32, 11, 53,
    54, 33, 12,
    13, 55, 34,
    35, 14, 56,
    57, 36, 15,
    16, 58, 37,
    38, 17, 59,
    60, 39, 18,
    19, 61, 40,
    41, 20, 62,
    63,
];

/// Compute the encoded digest for `password`. The salt must already be
/// truncated to the scheme's maximum and `rounds` clamped to range.
pub(crate) fn compute(scheme: Scheme, password: &[u8], salt: &[u8], rounds: u32) -> String {
    match scheme {
        Scheme::Sha256Crypt => {
            encode_digest(&raw_digest::<Sha256>(password, salt, rounds), &SHA256_ORDER)
        }
        Scheme::Sha512Crypt => {
            encode_digest(&raw_digest::<Sha512>(password, salt, rounds), &SHA512_ORDER)
        }
        // dispatched by the facade; the MD5 schemes never reach here
        Scheme::Md5Crypt | Scheme::Apr1Crypt => unreachable!("not a SHA-crypt scheme"),
    }
}

/// The raw final-round digest, before encoding. Steps follow the
/// numbering of the SHA-crypt specification.
fn raw_digest<D: Digest>(password: &[u8], salt: &[u8], rounds: u32) -> Vec<u8> {
    let digest_len = <D as Digest>::output_size();

    // steps 4-8: B = H(password + salt + password)
    let mut hasher = D::new();
    hasher.update(password);
    hasher.update(salt);
    hasher.update(password);
    let b = hasher.finalize();

    // steps 1-3, 9-12: A accumulates password, salt, then B repeated and
    // truncated to the password length, then per-length-bit either B
    // (set bit) or the password (clear bit)
    let mut hasher = D::new();
    hasher.update(password);
    hasher.update(salt);
    let mut remaining = password.len();
    while remaining > digest_len {
        hasher.update(&b);
        remaining -= digest_len;
    }
    hasher.update(&b[..remaining]);

    let mut bits = password.len();
    while bits > 0 {
        if bits & 1 == 1 {
            hasher.update(&b);
        } else {
            hasher.update(password);
        }
        bits >>= 1;
    }
    let a = hasher.finalize();

    // steps 13-16: P = H(password repeated len(password) times), then
    // repeated/truncated back to len(password) bytes
    let mut hasher = D::new();
    for _ in 0..password.len() {
        hasher.update(password);
    }
    let dp = hasher.finalize();
    let p = repeat_to(&dp, password.len());

    // steps 17-21: S = H(salt repeated 16 + A[0] times), truncated to
    // len(salt) bytes
    let mut hasher = D::new();
    for _ in 0..16 + usize::from(a[0]) {
        hasher.update(salt);
    }
    let ds = hasher.finalize();
    let s = repeat_to(&ds, salt.len());

    // step 21: the mixing schedule, starting from A
    let mut current = a[..].to_vec();
    for round in 0..rounds {
        let mut hasher = D::new();
        if round & 1 == 1 {
            hasher.update(&p);
        } else {
            hasher.update(&current);
        }
        if round % 3 != 0 {
            hasher.update(&s);
        }
        if round % 7 != 0 {
            hasher.update(&p);
        }
        if round & 1 == 1 {
            hasher.update(&current);
        } else {
            hasher.update(&p);
        }
        current = hasher.finalize()[..].to_vec();
    }

    current
}

/// Cycle `block` out to exactly `len` bytes.
fn repeat_to(block: &[u8], len: usize) -> Vec<u8> {
    block.iter().copied().cycle().take(len).collect()
}
