//! The base64 variant used by the `crypt(3)` family.
//!
//! This is *not* MIME base64: the alphabet starts with `./` and the bit
//! packing runs low-6-bits-first, the reverse of the standard convention.
//! It matches Apache APR's `to64()` (apr-util `crypto/apr_md5.c`) and the
//! `b64_from_24bit` macro in glibc's SHA-crypt.

/// The itoa64 alphabet shared by every crypt-family scheme.
pub(crate) const ITOA64: &[u8; 64] =
    b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Encode the low `n * 6` bits of `v`, low bits first (Apache's `to64`).
pub(crate) fn to64(mut v: u32, n: usize) -> String {
    let mut result = String::with_capacity(n);
    for _ in 0..n {
        result.push(ITOA64[(v & 0x3f) as usize] as char);
        v >>= 6;
    }
    result
}

/// Encode a digest following a scheme's normative byte permutation.
///
/// `order` lists digest byte indices in the sequence the scheme feeds them
/// to the codec, grouped in threes as `(low, mid, high)` of each 24-bit
/// word. A trailing partial group of 1 or 2 indices has its missing bytes
/// treated as zero and yields 2 or 3 characters instead of 4.
pub(crate) fn encode_digest(digest: &[u8], order: &[usize]) -> String {
    let mut result = String::with_capacity(order.len() / 3 * 4 + 3);
    for group in order.chunks(3) {
        let low = u32::from(digest[group[0]]);
        let mid = group.get(1).map_or(0, |&i| u32::from(digest[i]));
        let high = group.get(2).map_or(0, |&i| u32::from(digest[i]));
        result.push_str(&to64(high << 16 | mid << 8 | low, group.len() + 1));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to64_low_bits_first() {
        // 0 encodes to '.', 1 to '/', 63 to 'z'
        assert_eq!(to64(0, 1), ".");
        assert_eq!(to64(1, 1), "/");
        assert_eq!(to64(63, 1), "z");
        // low 6 bits come out first
        assert_eq!(to64(64, 2), "./");
    }

    #[test]
    fn test_encode_natural_order() {
        // 0x00 0x00 0x01 in (low, mid, high) order 2,1,0 packs to word
        // 0x000001: chars '/', '.', '.', '.'
        assert_eq!(encode_digest(&[0, 0, 1], &[2, 1, 0]), "/...");
    }

    #[test]
    fn test_encode_partial_groups() {
        // single residual byte yields 2 chars
        assert_eq!(encode_digest(&[63], &[0]), "z.");
        // two residual bytes yield 3 chars
        // word is 0x0100: chars '.', '2' (index 4), '.'
        assert_eq!(encode_digest(&[0, 1], &[0, 1]), ".2.");
    }
}
