//! Mtime helpers.
//!
//! Two flavors: the `Option` ones are for freshness checks where a missing
//! file just means "not fresh", and [`mtime_secs`] is for fingerprinting,
//! where a missing file is a hard failure.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AssetError, Result};

/// Get the modification time of a file
///
/// Returns `None` if the file doesn't exist or mtime cannot be read
pub fn get_mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Check if file A is newer than file B
///
/// Returns `true` if A exists and is newer than B
/// Returns `false` if either file doesn't exist or times can't be compared
pub fn is_newer_than(a: &Path, b: &Path) -> bool {
    let (Some(a_time), Some(b_time)) = (get_mtime(a), get_mtime(b)) else {
        return false;
    };
    a_time > b_time
}

/// Modification time of `path` in whole seconds since the Unix epoch.
///
/// Sub-second precision is floored away. Pre-epoch timestamps come back negative.
pub fn mtime_secs(path: &Path) -> Result<i64> {
    let modified = path
        .metadata()
        .and_then(|m| m.modified())
        .map_err(|e| AssetError::missing(path, e))?;

    #[allow(clippy::cast_possible_wrap)]
    let secs = match modified.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        // Floor, so half a second before the epoch is -1
        Err(e) => {
            let d = e.duration();
            -(d.as_secs() as i64) - i64::from(d.subsec_nanos() > 0)
        }
    };
    Ok(secs)
}
