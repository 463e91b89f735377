//! Cache-busting fingerprints for combined artifacts.
//!
//! A fingerprint identifies the *state* of a list of source files, not
//! their bytes: each file's mtime (whole seconds) is rendered as a
//! decimal string, the strings are concatenated in list order with no
//! separator, and the result is digested.
//!
//! The list order must be the same order the combined content was built
//! in. Two different orders of the same files give two different
//! fingerprints.
//!
//! A file whose content changes without its mtime moving keeps the old
//! fingerprint.

use std::fmt::Write;
use std::path::Path;

use super::mtime::mtime_secs;
use crate::error::Result;

/// Hex digits in a fingerprint (128 bits).
pub const FINGERPRINT_LEN: usize = 32;

/// Compute the fingerprint of an ordered list of paths.
///
/// For a single path pass a one-element slice. Fails with
/// [`AssetError::MissingFile`](crate::error::AssetError::MissingFile)
/// as soon as one path cannot be stat'ed.
pub fn fingerprint<P: AsRef<Path>>(paths: &[P]) -> Result<String> {
    let mut stamps = String::with_capacity(paths.len() * 10);
    for path in paths {
        // Writing into a String cannot fail
        let _ = write!(stamps, "{}", mtime_secs(path.as_ref())?);
    }
    Ok(digest(&stamps))
}

/// Lowercase hex digest of `input`, truncated to [`FINGERPRINT_LEN`].
fn digest(input: &str) -> String {
    let hash = blake3::hash(input.as_bytes());
    hex::encode(&hash.as_bytes()[..FINGERPRINT_LEN / 2])
}
