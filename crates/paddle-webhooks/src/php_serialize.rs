//! Canonical PHP `serialize()` encoding of webhook fields.
//!
//! Paddle signs the webhook fields after running them through PHP's `ksort()`
//! and `serialize()`. Reproducing that byte sequence exactly is the only way
//! to verify `p_signature`, so this module implements the subset of the
//! format Paddle produces: a flat array of string keys to string values.
//!
//! ```text
//! a:2:{s:10:"alert_name";s:20:"subscription_created";s:7:"user_id";s:2:"42";}
//! ```
//!
//! Lengths are byte lengths. String contents are written verbatim between the
//! quotes; PHP does not escape them.

use std::io::Write;

/// Serialize string fields into PHP array format in canonical key order.
///
/// Keys are sorted byte-wise ascending, so the output depends only on the
/// key/value contents and never on the iteration order of `fields`.
///
/// # Examples
///
/// ```rust
/// use paddle_webhooks::php_serialize::php_serialize;
///
/// let fields = [("user_id", "42"), ("alert_name", "subscription_created")];
/// let serialized = php_serialize(fields);
///
/// assert_eq!(
///     serialized,
///     br#"a:2:{s:10:"alert_name";s:20:"subscription_created";s:7:"user_id";s:2:"42";}"#
/// );
/// ```
pub fn php_serialize<I, K, V>(fields: I) -> Vec<u8>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut entries: Vec<(K, V)> = fields.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.as_ref().as_bytes().cmp(b.as_ref().as_bytes()));

    let mut out = Vec::with_capacity(16 + entries.len() * 32);
    // Writes into a Vec<u8> cannot fail.
    let _ = write!(out, "a:{}:{{", entries.len());
    for (key, value) in &entries {
        write_string(&mut out, key.as_ref());
        write_string(&mut out, value.as_ref());
    }
    out.push(b'}');
    out
}

fn write_string(out: &mut Vec<u8>, value: &str) {
    let _ = write!(out, "s:{}:\"", value.len());
    out.extend_from_slice(value.as_bytes());
    out.extend_from_slice(b"\";");
}

#[cfg(test)]
#[path = "php_serialize_tests.rs"]
mod tests;
