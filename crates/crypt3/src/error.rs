use snafu::Snafu;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while generating or verifying a hash.
///
/// Note what is deliberately *not* here: oversized salts are truncated (the
/// [`HashResult`](crate::HashResult) carries an advisory flag), rounds
/// outside `[1000, 999999999]` are clamped, and there is no invalid-password
/// condition at all.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The scheme id does not name one of the four supported schemes.
    #[snafu(display(
        "Unsupported hash scheme '{scheme}' (valid: sha512, sha256, md5, apr1)"
    ))]
    UnsupportedScheme { scheme: String },

    /// The OS random source failed while generating a salt.
    ///
    /// Never falls back to a weaker source.
    #[snafu(display("Random source unavailable"))]
    RandomSourceUnavailable { source: getrandom::Error },
}
