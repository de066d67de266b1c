use xxhash_rust::xxh64::xxh64;

const BASE62_CHARS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Encode a u64 value as a base62 string (11 chars, zero-padded).
fn base62_encode(mut value: u64) -> String {
    let mut digits = Vec::with_capacity(11);
    while value > 0 {
        digits.push(BASE62_CHARS[(value % 62) as usize] as char);
        value /= 62;
    }
    while digits.len() < 11 {
        digits.push('0');
    }
    digits.iter().rev().collect()
}

/// Compute the fingerprint of a variant-set fact.
///
/// fingerprint = base62(xxhash64(contract + discriminator + variants))
///
/// Parts are NUL-separated so that `["ab", "c"]` and `["a", "bc"]` differ.
/// Identical facts always yield identical fingerprints, across runs and hosts.
pub fn compute_fingerprint(contract: &str, discriminator: &str, variants: &[String]) -> String {
    let capacity = contract.len()
        + discriminator.len()
        + variants.iter().map(|v| v.len() + 1).sum::<usize>()
        + 2;
    let mut input = String::with_capacity(capacity);
    input.push_str(contract);
    input.push('\0');
    input.push_str(discriminator);
    for variant in variants {
        input.push('\0');
        input.push_str(variant);
    }

    base62_encode(xxh64(input.as_bytes(), 0))
}
