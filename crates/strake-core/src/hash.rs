//! Deterministic type-identity hashing.
//!
//! identity = base62(xxhash64(type_name + ordered member keys))
//!
//! The identity keys a validated type in the singleton registry and gives
//! callers a stable handle for a declaration: re-declaring the same name
//! with a different member set yields a different identity.

use xxhash_rust::xxh64::xxh64;

const BASE62_CHARS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Encode a u64 value as a base62 string (11 chars, zero-padded).
fn base62_encode(mut value: u64) -> String {
    if value == 0 {
        return "0".repeat(11);
    }
    let mut result = Vec::with_capacity(11);
    while value > 0 {
        let idx = (value % 62) as usize;
        result.push(BASE62_CHARS[idx]);
        value /= 62;
    }
    // Pad to 11 chars
    while result.len() < 11 {
        result.push(b'0');
    }
    result.reverse();
    String::from_utf8(result).expect("base62 chars are valid UTF-8")
}

/// Compute the identity hash for a type declaration.
///
/// `member_keys` must be in declaration order; each key is a canonical
/// rendering of one member (name plus signature or expected type), so the
/// identity changes whenever the declared shape changes.
pub fn identity_hash(type_name: &str, member_keys: &[String]) -> String {
    let mut input = String::with_capacity(
        type_name.len() + member_keys.iter().map(|k| k.len() + 1).sum::<usize>(),
    );
    input.push_str(type_name);
    for key in member_keys {
        input.push('\0'); // separator
        input.push_str(key);
    }

    let hash_value = xxh64(input.as_bytes(), 0);
    base62_encode(hash_value)
}
