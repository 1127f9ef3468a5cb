//! Query-string and form-encoded pair decoding
//!
//! Handles `%XX` escapes and `+` as space. Used for both URL query strings
//! and `application/x-www-form-urlencoded` request bodies.

use std::collections::HashMap;

/// Parse `key=value&key=value` pairs into a map.
///
/// Pairs without a `=` are ignored; a later duplicate key overwrites an
/// earlier one.
pub fn parse_pairs(input: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for pair in input.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            map.insert(percent_decode(key), percent_decode(value));
        }
    }
    map
}

/// Decode a URL-encoded string, handling %XX sequences and '+' as space.
fn percent_decode(s: &str) -> String {
    let mut bytes = Vec::with_capacity(s.len());
    let mut iter = s.bytes();
    while let Some(b) = iter.next() {
        match b {
            b'+' => bytes.push(b' '),
            b'%' => {
                let hi = iter.next().unwrap_or(b'0');
                let lo = iter.next().unwrap_or(b'0');
                bytes.push(hex_val(hi) * 16 + hex_val(lo));
            }
            _ => bytes.push(b),
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

const fn hex_val(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}
