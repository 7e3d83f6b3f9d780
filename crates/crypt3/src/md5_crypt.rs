//! The MD5-crypt digest-mixing algorithm, shared by `$1$` and `$apr1$`.
//!
//! # Algorithm Source
//!
//! Originally Poul-Henning Kamp's crypt() for FreeBSD 2.0; Apache APR
//! carries the same algorithm under the `$apr1$` prefix. The two schemes
//! differ only in the magic prefix mixed into digest A.
//!
//! Key references:
//! - FreeBSD crypt.c: https://github.com/freebsd/freebsd-src/blob/main/lib/libcrypt/crypt-md5.c
//! - Apache APR: https://github.com/apache/apr/blob/trunk/crypto/apr_md5.c
//!
//! The fixed 1000-round schedule below (parity plus divisibility by 3 and
//! 7) is normative; real `/etc/shadow` and htpasswd entries depend on it.

use crate::b64::encode_digest;
use crate::scheme::Scheme;
use md5::{Digest, Md5};

/// Fixed iteration count; MD5-crypt has no variable-rounds concept.
const MD5_CRYPT_ROUNDS: u32 = 1000;

/// Output permutation over the 16-byte digest, as `(low, mid, high)`
/// triples of each 24-bit word, matching the reference:
///
/// ```c
/// l = (final[ 0]<<16) | (final[ 6]<<8) | final[12]; to64(p, l, 4);
/// l = (final[ 1]<<16) | (final[ 7]<<8) | final[13]; to64(p, l, 4);
/// l = (final[ 2]<<16) | (final[ 8]<<8) | final[14]; to64(p, l, 4);
/// l = (final[ 3]<<16) | (final[ 9]<<8) | final[15]; to64(p, l, 4);
/// l = (final[ 4]<<16) | (final[10]<<8) | final[ 5]; to64(p, l, 4);
/// l = final[11];                                    to64(p, l, 2);
/// ```
#[rustfmt::skip]
const DIGEST_ORDER: [usize; 16] = [
    12, 6, 0,
    13, 7, 1,
    14, 8, 2,
    15, 9, 3,
     5, 10, 4,
    11,
];

/// Compute the 22-character encoded digest for `password` under `scheme`'s
/// magic prefix. The salt must already be truncated to 8 characters.
pub(crate) fn compute(scheme: Scheme, password: &[u8], salt: &[u8]) -> String {
    let magic = scheme.magic_prefix().as_bytes();

    // B = MD5(password + salt + password)
    let mut hasher = Md5::new();
    hasher.update(password);
    hasher.update(salt);
    hasher.update(password);
    let b = hasher.finalize();

    // A accumulates password, magic, salt, then B repeated/truncated to
    // the password length
    let mut hasher = Md5::new();
    hasher.update(password);
    hasher.update(magic);
    hasher.update(salt);
    let mut remaining = password.len();
    while remaining > 0 {
        let take = remaining.min(b.len());
        hasher.update(&b[..take]);
        remaining -= take;
    }

    // one byte per bit of the password length: a zero byte for set bits,
    // the first password byte for clear bits
    let mut bits = password.len();
    while bits > 0 {
        if bits & 1 == 1 {
            hasher.update([0u8]);
        } else {
            hasher.update(&password[..1]);
        }
        bits >>= 1;
    }
    let mut current = hasher.finalize();

    // the fixed mixing schedule
    for round in 0..MD5_CRYPT_ROUNDS {
        let mut hasher = Md5::new();
        if round & 1 == 1 {
            hasher.update(password);
        } else {
            hasher.update(&current[..]);
        }
        if round % 3 != 0 {
            hasher.update(salt);
        }
        if round % 7 != 0 {
            hasher.update(password);
        }
        if round & 1 == 1 {
            hasher.update(&current[..]);
        } else {
            hasher.update(password);
        }
        current = hasher.finalize();
    }

    encode_digest(&current, &DIGEST_ORDER)
}
