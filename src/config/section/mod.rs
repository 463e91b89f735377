//! Configuration section definitions.
//!
//! Each module corresponds to a section in `quire.toml`:
//!
//! | Module     | TOML Section              | Purpose                        |
//! |------------|---------------------------|--------------------------------|
//! | `sass`     | `[sass]`                  | Compiler options, extra files  |
//! | `combine`  | `[octopress]`             | Combine vs. copy switches      |
//! | `plugins`  | `[theme]`, `[[plugins]]`  | Plugin declarations            |

mod combine;
mod plugins;
mod sass;

pub use combine::CombineConfig;
pub use plugins::{PluginEntry, ThemeEntry, validate_plugins};
pub use sass::{OutputStyle, SassConfig};
