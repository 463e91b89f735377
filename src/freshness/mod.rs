//! Freshness detection: mtime checks for copied outputs, mtime
//! fingerprints for combined artifacts.

mod fingerprint;
pub mod mtime;

pub use fingerprint::{FINGERPRINT_LEN, fingerprint};
pub use mtime::{get_mtime, is_newer_than, mtime_secs};
