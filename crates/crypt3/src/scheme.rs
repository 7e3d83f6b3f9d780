use crate::error::{Error, Result};
use std::str::FromStr;

/// Default iteration count for the SHA-crypt schemes.
pub const ROUNDS_DEFAULT: u32 = 5000;

/// Minimum iteration count for the SHA-crypt schemes; lower values are
/// clamped, never rejected.
pub const ROUNDS_MIN: u32 = 1000;

/// Maximum iteration count for the SHA-crypt schemes; higher values are
/// clamped, never rejected.
pub const ROUNDS_MAX: u32 = 999_999_999;

/// One of the four supported `crypt(3)` hashing schemes.
///
/// Every scheme-specific constant (magic prefix, salt limit, encoded digest
/// length) hangs off the variant, so a `Scheme` value is all a caller needs
/// to describe how a hash string is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// FreeBSD-style MD5-crypt, `$1$` prefix.
    Md5Crypt,
    /// Apache's MD5-crypt variant, `$apr1$` prefix. Same algorithm as
    /// [`Scheme::Md5Crypt`], differing only in the magic prefix.
    Apr1Crypt,
    /// SHA-256-crypt, `$5$` prefix.
    Sha256Crypt,
    /// SHA-512-crypt, `$6$` prefix.
    Sha512Crypt,
}

impl Scheme {
    /// All supported schemes.
    pub const ALL: [Scheme; 4] = [
        Scheme::Md5Crypt,
        Scheme::Apr1Crypt,
        Scheme::Sha256Crypt,
        Scheme::Sha512Crypt,
    ];

    /// The magic prefix identifying the scheme in a hash string.
    pub const fn magic_prefix(self) -> &'static str {
        match self {
            Scheme::Md5Crypt => "$1$",
            Scheme::Apr1Crypt => "$apr1$",
            Scheme::Sha256Crypt => "$5$",
            Scheme::Sha512Crypt => "$6$",
        }
    }

    /// Maximum salt length in characters; longer salts are truncated.
    pub const fn max_salt_len(self) -> usize {
        match self {
            Scheme::Md5Crypt | Scheme::Apr1Crypt => 8,
            Scheme::Sha256Crypt | Scheme::Sha512Crypt => 16,
        }
    }

    /// Length of the encoded digest segment of a hash string.
    pub const fn encoded_len(self) -> usize {
        match self {
            Scheme::Md5Crypt | Scheme::Apr1Crypt => 22,
            Scheme::Sha256Crypt => 43,
            Scheme::Sha512Crypt => 86,
        }
    }

    /// Whether the scheme supports a variable `rounds=N$` clause.
    ///
    /// MD5-crypt and APR1-crypt always run a fixed 1000 rounds and have no
    /// rounds concept in their wire format.
    pub const fn has_rounds(self) -> bool {
        matches!(self, Scheme::Sha256Crypt | Scheme::Sha512Crypt)
    }

    /// Detect the scheme of an existing hash string from its magic prefix.
    pub fn detect(hash: &str) -> Option<Scheme> {
        Scheme::ALL
            .into_iter()
            .find(|scheme| hash.starts_with(scheme.magic_prefix()))
    }
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "md5" | "1" => Ok(Scheme::Md5Crypt),
            "apr1" => Ok(Scheme::Apr1Crypt),
            "sha256" | "5" => Ok(Scheme::Sha256Crypt),
            "sha512" | "6" => Ok(Scheme::Sha512Crypt),
            _ => crate::error::UnsupportedSchemeSnafu { scheme: s }.fail(),
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scheme::Md5Crypt => write!(f, "md5"),
            Scheme::Apr1Crypt => write!(f, "apr1"),
            Scheme::Sha256Crypt => write!(f, "sha256"),
            Scheme::Sha512Crypt => write!(f, "sha512"),
        }
    }
}
