//! Scheme dispatch and the public hashing surface.

use crate::error::{Result, UnsupportedSchemeSnafu};
use crate::salt::SaltSpec;
use crate::scheme::Scheme;
use crate::{md5_crypt, sha_crypt};
use snafu::OptionExt;

/// The outcome of a hash computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashResult {
    /// The canonical hash string, `$<id>$[rounds=N$]<salt>$<digest>`.
    pub hash: String,
    /// Whether the supplied salt exceeded the scheme's maximum length and
    /// was truncated. Advisory; presentation is up to the caller.
    pub salt_truncated: bool,
}

impl std::fmt::Display for HashResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hash)
    }
}

/// Hash `password` with a caller-supplied salt.
///
/// `scheme_id` is one of `sha512`, `sha256`, `md5`, `apr1` (or the wire
/// ids `6`, `5`, `1`). `salt_text` may be bare, prefixed or a full hash
/// string; an embedded `rounds=N$` clause takes precedence over the
/// `rounds` argument. Out-of-range rounds are clamped, oversized salts
/// truncated; the only error is an unknown scheme id.
pub fn generate(
    scheme_id: &str,
    password: &[u8],
    salt_text: &str,
    rounds: Option<u32>,
) -> Result<HashResult> {
    let scheme: Scheme = scheme_id.parse()?;
    let salt = SaltSpec::parse(scheme, salt_text).with_default_rounds(rounds);
    Ok(hash_with_salt(password, &salt))
}

/// Hash `password` with a salt of `salt_len` characters drawn from the OS
/// CSPRNG. Fails if the scheme id is unknown or the random source is
/// unavailable.
pub fn generate_with_random_salt(
    scheme_id: &str,
    password: &[u8],
    salt_len: usize,
    rounds: Option<u32>,
) -> Result<HashResult> {
    let scheme: Scheme = scheme_id.parse()?;
    let salt = SaltSpec::generate(scheme, salt_len, rounds)?;
    Ok(hash_with_salt(password, &salt))
}

/// Hash `password` under an already-constructed [`SaltSpec`].
///
/// Pure and deterministic: identical inputs always produce an identical
/// hash string.
pub fn hash_with_salt(password: &[u8], salt: &SaltSpec) -> HashResult {
    let scheme = salt.scheme();
    let encoded = match scheme {
        Scheme::Md5Crypt | Scheme::Apr1Crypt => {
            md5_crypt::compute(scheme, password, salt.salt().as_bytes())
        }
        Scheme::Sha256Crypt | Scheme::Sha512Crypt => sha_crypt::compute(
            scheme,
            password,
            salt.salt().as_bytes(),
            salt.rounds_or_default(),
        ),
    };
    HashResult {
        hash: format!("{}{}", salt.render(), encoded),
        salt_truncated: salt.was_truncated(),
    }
}

/// Verify `password` against an existing hash string.
///
/// The scheme is detected from the magic prefix; the salt and rounds are
/// taken from the hash itself. Only the digest segments are compared (in
/// constant time), so hashes spelling out the default `rounds=5000$`
/// clause verify fine. Fails only when no supported magic prefix matches.
pub fn verify_password(password: &[u8], hash: &str) -> Result<bool> {
    let scheme = Scheme::detect(hash).context(UnsupportedSchemeSnafu { scheme: hash })?;
    let salt = SaltSpec::parse(scheme, hash);
    let computed = hash_with_salt(password, &salt);

    let expected = digest_segment(hash);
    let computed = digest_segment(&computed.hash);

    // constant-time comparison over the fixed-length digest segment
    Ok(expected.len() == computed.len()
        && expected
            .bytes()
            .zip(computed.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0)
}

/// The encoded digest: everything after the last `$`.
fn digest_segment(hash: &str) -> &str {
    hash.rsplit('$').next().unwrap_or(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_known_vector() {
        let result = generate("sha256", b"Hello world!", "$5$saltstring", None).unwrap();
        assert_eq!(
            result.hash,
            "$5$saltstring$5B8vYYiY.CVt1RlTTf8KbXBH3hsxY/GNooZaBBGWEc5"
        );
        assert!(!result.salt_truncated);
    }

    #[test]
    fn test_generate_unknown_scheme() {
        assert!(matches!(
            generate("bcrypt", b"x", "salt", None),
            Err(crate::Error::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn test_generate_with_random_salt() {
        let result = generate_with_random_salt("sha512", b"password", 16, None).unwrap();
        assert!(result.hash.starts_with("$6$"));
        assert!(!result.salt_truncated);
        assert!(verify_password(b"password", &result.hash).unwrap());
    }

    #[test]
    fn test_rounds_argument_applies() {
        let result = generate("sha512", b"pw", "salt", Some(4242)).unwrap();
        assert!(result.hash.starts_with("$6$rounds=4242$salt$"));
    }

    #[test]
    fn test_embedded_clause_wins_over_argument() {
        let clause = generate("sha512", b"pw", "rounds=2000$salt", Some(9000)).unwrap();
        let direct = generate("sha512", b"pw", "salt", Some(2000)).unwrap();
        assert_eq!(clause.hash, direct.hash);
    }

    #[test]
    fn test_verify_all_schemes() {
        for scheme_id in ["md5", "apr1", "sha256", "sha512"] {
            let result = generate(scheme_id, b"s3cret", "saltsalt", None).unwrap();
            assert!(verify_password(b"s3cret", &result.hash).unwrap(), "{scheme_id}");
            assert!(!verify_password(b"wrong", &result.hash).unwrap(), "{scheme_id}");
        }
    }

    #[test]
    fn test_verify_explicit_default_rounds() {
        // other producers spell out rounds=5000; the digest is unaffected
        let spelled =
            "$5$rounds=5000$toolongsaltstrin$Un/5jzAHMgOGZ5.mWJpuVolil07guHPvOW8mGRcvxa5";
        assert!(verify_password(b"This is just a test", spelled).unwrap());
    }

    #[test]
    fn test_verify_unknown_prefix() {
        assert!(verify_password(b"x", "$2b$12$bcrypthash").is_err());
        assert!(verify_password(b"x", "plaintext").is_err());
    }
}
