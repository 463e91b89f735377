//! `[octopress]` section: combine switches.
//!
//! ```toml
//! [octopress]
//! combine_stylesheets = true   # One fingerprinted stylesheet per media group
//! combine_javascripts = false  # Copy each plugin's scripts individually
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombineConfig {
    pub combine_stylesheets: bool,
    pub combine_javascripts: bool,
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            combine_stylesheets: true,
            combine_javascripts: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults_combine() {
        let config = test_parse_config("");
        assert!(config.octopress.combine_stylesheets);
        assert!(config.octopress.combine_javascripts);
    }

    #[test]
    fn test_explicit_false() {
        let config = test_parse_config("[octopress]\ncombine_javascripts = false");
        assert!(config.octopress.combine_stylesheets);
        assert!(!config.octopress.combine_javascripts);
    }
}
