#![warn(missing_docs)]

//! Unix `crypt(3)`-style password hashing.
//!
//! This library builds the textual password hashes historically stored in
//! Unix password databases (`/etc/shadow`, Apache htpasswd files) for four
//! schemes: MD5-crypt (`$1$`), Apache's APR1-crypt (`$apr1$`), SHA-256-crypt
//! (`$5$`) and SHA-512-crypt (`$6$`). Output is byte-for-byte compatible
//! with the reference implementations (FreeBSD `crypt.c`, Apache APR,
//! glibc's SHA-crypt).
//!
//! # Example
//!
//! ```
//! use crypt3::generate;
//!
//! # fn main() -> Result<(), crypt3::Error> {
//! let result = generate("sha512", b"Hello world!", "saltstring", None)?;
//! assert_eq!(
//!     result.hash,
//!     "$6$saltstring$svn8UoSVapNtMuq1ukKS4tPQd8iKwSMHWjl/O817G3uBnIFNjnQJuesI68u4OTLiBFdcbYEdFCoEOfaS35inz1"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Security Warning
//!
//! These schemes exist for compatibility with existing system password
//! databases. Do not pick them for new secret-storage designs; use a modern
//! memory-hard KDF instead.

mod b64;
mod crypter;
mod error;
mod md5_crypt;
mod salt;
mod scheme;
mod sha_crypt;

pub use crypter::{
    HashResult, generate, generate_with_random_salt, hash_with_salt, verify_password,
};
pub use error::{Error, Result};
pub use salt::SaltSpec;
pub use scheme::{ROUNDS_DEFAULT, ROUNDS_MAX, ROUNDS_MIN, Scheme};
