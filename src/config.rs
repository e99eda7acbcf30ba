//! Mirror configuration.

use std::time::Duration;

/// Configuration for the remote mirror fetcher.
///
/// Defaults point at Sukka's Surge ruleset collection; tests override the
/// URLs to run against local fixtures instead of live endpoints.
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// Document to scan for rule-set links
    pub document_url: String,
    /// Host whose links identify mirrorable rule-sets
    pub source_host: String,
    /// Base URL of the sing-box renditions, without trailing slash
    pub mirror_base_url: String,
    /// Prefix for output file names
    pub output_prefix: String,
    /// Fixed pause between requests
    pub request_delay: Duration,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            document_url: "https://raw.githubusercontent.com/SukkaW/Surge/master/README.md"
                .to_string(),
            source_host: "ruleset.skk.moe".to_string(),
            mirror_base_url: "https://ruleset.skk.moe/sing-box".to_string(),
            output_prefix: "sukka".to_string(),
            request_delay: Duration::from_millis(100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MirrorConfig::default();
        assert_eq!(config.source_host, "ruleset.skk.moe");
        assert_eq!(config.mirror_base_url, "https://ruleset.skk.moe/sing-box");
        assert_eq!(config.output_prefix, "sukka");
        assert_eq!(config.request_delay, Duration::from_millis(100));
        assert!(config.document_url.ends_with("README.md"));
    }
}
