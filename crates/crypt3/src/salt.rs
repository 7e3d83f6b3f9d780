//! Salt specifications: the `$<id>$[rounds=N$]<salt>$` part of a hash.

use crate::b64::ITOA64;
use crate::error::{RandomSourceUnavailableSnafu, Result};
use crate::scheme::{ROUNDS_DEFAULT, ROUNDS_MAX, ROUNDS_MIN, Scheme};
use snafu::ResultExt;
use std::fmt::Write;

/// A parsed or freshly generated salt specification.
///
/// Construction never fails on salt content: arbitrary text is passed
/// through (legacy schemes do no charset validation), anything past the
/// first `$` is cut off, and anything past the scheme's maximum length is
/// silently truncated with [`SaltSpec::was_truncated`] set so callers can
/// warn if they care. An out-of-range rounds value is clamped to
/// `[ROUNDS_MIN, ROUNDS_MAX]` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaltSpec {
    scheme: Scheme,
    salt: String,
    rounds: Option<u32>,
    truncated: bool,
}

impl SaltSpec {
    /// Parse a salt specification for `scheme` from caller-supplied text.
    ///
    /// Accepts bare salts (`saltstring`), prefixed ones (`$6$saltstring`)
    /// and full hash strings; an embedded `rounds=N$` clause is consumed
    /// for the SHA schemes. Following glibc, the clause is only recognized
    /// when its digits are terminated by `$` — otherwise the text is
    /// treated as salt characters.
    pub fn parse(scheme: Scheme, raw: &str) -> SaltSpec {
        let mut rest = raw.strip_prefix(scheme.magic_prefix()).unwrap_or(raw);

        let mut rounds = None;
        if scheme.has_rounds()
            && let Some(clause) = rest.strip_prefix("rounds=")
        {
            let digits_end = clause
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(clause.len());
            if digits_end > 0 && clause[digits_end..].starts_with('$') {
                // digits wider than u64 saturate, as strtoul does, and
                // then clamp to the maximum
                let value = clause[..digits_end].parse::<u64>().unwrap_or(u64::MAX);
                rounds = Some(clamp_rounds(value));
                rest = &clause[digits_end + 1..];
            }
        }

        let salt = rest.split('$').next().unwrap_or("");
        let (salt, truncated) = truncate_salt(salt, scheme.max_salt_len());

        SaltSpec {
            scheme,
            salt: salt.to_string(),
            rounds,
            truncated,
        }
    }

    /// Generate a random salt of `len` characters from the OS CSPRNG.
    ///
    /// `len` is capped at the scheme's maximum; each random byte maps to
    /// one character of the itoa64 alphabet. `rounds` is attached for the
    /// SHA schemes (clamped) and ignored otherwise.
    pub fn generate(scheme: Scheme, len: usize, rounds: Option<u32>) -> Result<SaltSpec> {
        let len = len.min(scheme.max_salt_len());
        let mut bytes = vec![0u8; len];
        getrandom::fill(&mut bytes).context(RandomSourceUnavailableSnafu)?;

        let salt: String = bytes
            .iter()
            .map(|&b| ITOA64[(b & 0x3f) as usize] as char)
            .collect();

        Ok(SaltSpec {
            scheme,
            salt,
            rounds: rounds.filter(|_| scheme.has_rounds()).map(|r| clamp_rounds(r.into())),
            truncated: false,
        })
    }

    /// The scheme this salt was built for.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// The (possibly truncated) salt characters. Never contains `$`.
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// The explicit rounds value, if any. `None` means "use the default
    /// and omit the clause from the output".
    pub fn rounds(&self) -> Option<u32> {
        self.rounds
    }

    /// The iteration count the SHA engines will actually run.
    pub fn rounds_or_default(&self) -> u32 {
        self.rounds.unwrap_or(ROUNDS_DEFAULT)
    }

    /// Whether the supplied salt exceeded the scheme's maximum length and
    /// was truncated. Advisory only; truncation is not an error.
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }

    /// Attach an explicit rounds value when none was parsed from the salt
    /// text. A clause embedded in the salt text wins over this.
    pub(crate) fn with_default_rounds(mut self, rounds: Option<u32>) -> SaltSpec {
        if self.rounds.is_none() && self.scheme.has_rounds() {
            self.rounds = rounds.map(|r| clamp_rounds(r.into()));
        }
        self
    }

    /// Render the fragment preceding the digest: magic prefix, then
    /// `rounds=N$` iff explicit and different from the default, then the
    /// salt, then `$`.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(
            self.scheme.magic_prefix().len() + self.salt.len() + 20,
        );
        out.push_str(self.scheme.magic_prefix());
        if let Some(rounds) = self.rounds
            && rounds != ROUNDS_DEFAULT
        {
            // infallible for String
            let _ = write!(out, "rounds={rounds}$");
        }
        out.push_str(&self.salt);
        out.push('$');
        out
    }
}

fn clamp_rounds(value: u64) -> u32 {
    value.clamp(u64::from(ROUNDS_MIN), u64::from(ROUNDS_MAX)) as u32
}

/// Cut `salt` down to at most `max` bytes, stepping back to a char
/// boundary so non-ASCII input cannot split a code point.
fn truncate_salt(salt: &str, max: usize) -> (&str, bool) {
    if salt.len() <= max {
        return (salt, false);
    }
    let mut end = max;
    while !salt.is_char_boundary(end) {
        end -= 1;
    }
    (&salt[..end], true)
}
