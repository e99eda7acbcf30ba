//! Remote mirror fetcher for published sing-box rule-sets.
//!
//! Discovers rule-set links from a published document, remaps them to the
//! sing-box URL scheme, and downloads each into the output directory:
//! - links are deduplicated into (category, name) targets before fetching
//! - response bytes are validated as JSON, then written verbatim
//! - a missing rule-set (404) is an expected absence, not a failure
//! - one target's failure never aborts the remaining targets

use std::collections::BTreeSet;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::config::MirrorConfig;
use crate::extract::{LinkExtractor, MirrorTarget, RegexLinkExtractor};
use crate::Result;

/// Summary of one mirror run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorReport {
    /// Unique targets discovered in the document
    pub discovered: usize,
    /// Targets downloaded, validated, and written
    pub mirrored: usize,
    /// Targets absent in the mirror scheme (404)
    pub missing: usize,
    /// Targets that failed to download or validate
    pub failed: usize,
}

/// Remote mirror fetcher.
///
/// # Example
///
/// ```ignore
/// use sbrule::{Mirror, MirrorConfig};
/// use std::path::Path;
///
/// let mirror = Mirror::new(MirrorConfig::default())?;
/// let report = mirror.run(Path::new("output"))?;
/// println!("mirrored {} rule-sets", report.mirrored);
/// ```
pub struct Mirror {
    config: MirrorConfig,
    extractor: Box<dyn LinkExtractor>,
    agent: ureq::Agent,
}

impl Mirror {
    /// Create a mirror with the default regex extractor for the configured
    /// source host.
    pub fn new(config: MirrorConfig) -> Result<Self> {
        let extractor = RegexLinkExtractor::for_host(&config.source_host)?;
        Ok(Self::with_extractor(config, Box::new(extractor)))
    }

    /// Create a mirror with a custom extraction step.
    pub fn with_extractor(config: MirrorConfig, extractor: Box<dyn LinkExtractor>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(60))
            .build();
        Self {
            config,
            extractor,
            agent,
        }
    }

    /// Fetch the document and extract the deduplicated target set.
    ///
    /// The document is a hard dependency: any fetch or decode failure here
    /// aborts the whole mirror phase.
    pub fn discover(&self) -> Result<BTreeSet<MirrorTarget>> {
        log::info!("fetching document {}", self.config.document_url);
        let text = self
            .agent
            .get(&self.config.document_url)
            .call()?
            .into_string()?;
        Ok(self.extractor.extract(&text))
    }

    /// URL of a target's sing-box rendition.
    pub fn target_url(&self, target: &MirrorTarget) -> String {
        format!(
            "{}/{}/{}.json",
            self.config.mirror_base_url, target.category, target.name
        )
    }

    /// Output file name for a target.
    pub fn output_name(&self, target: &MirrorTarget) -> String {
        format!(
            "{}_{}_{}.json",
            self.config.output_prefix, target.name, target.category
        )
    }

    /// Download a target and validate the body as JSON.
    ///
    /// Returns the received bytes untouched; the parsed value is discarded.
    /// Writing the original bytes preserves upstream formatting exactly.
    fn fetch_target(&self, target: &MirrorTarget) -> Result<Vec<u8>> {
        let url = self.target_url(target);
        let response = self.agent.get(&url).call()?;

        let mut bytes = Vec::new();
        response.into_reader().read_to_end(&mut bytes)?;

        serde_json::from_slice::<serde_json::Value>(&bytes)?;
        Ok(bytes)
    }

    /// Mirror every discovered target into `output_dir`.
    ///
    /// Targets are processed in sorted order (category, then name). Each
    /// target is independent: 404s and failures are logged and counted,
    /// and the loop continues. A fixed delay follows every request.
    pub fn run(&self, output_dir: &Path) -> Result<MirrorReport> {
        let targets = self.discover()?;
        log::info!("found {} unique rule-sets to mirror", targets.len());

        let mut report = MirrorReport {
            discovered: targets.len(),
            ..Default::default()
        };

        for target in &targets {
            let name = self.output_name(target);
            log::info!("downloading {} from {}", name, self.target_url(target));

            let result = self.fetch_target(target).and_then(|bytes| {
                let path = output_dir.join(&name);
                fs::write(&path, &bytes)?;
                Ok(path)
            });

            match result {
                Ok(path) => {
                    report.mirrored += 1;
                    log::info!("saved {}", path.display());
                }
                Err(e) if e.is_not_found() => {
                    report.missing += 1;
                    log::info!("skipping {} (no sing-box rendition)", name);
                }
                Err(e) => {
                    report.failed += 1;
                    log::warn!("failed {}: {}", name, e);
                }
            }

            if !self.config.request_delay.is_zero() {
                thread::sleep(self.config.request_delay);
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    fn mirror() -> Mirror {
        Mirror::new(MirrorConfig::default()).unwrap()
    }

    #[test]
    fn test_target_url() {
        let target = MirrorTarget::new(Category::Domainset, "reject");
        assert_eq!(
            mirror().target_url(&target),
            "https://ruleset.skk.moe/sing-box/domainset/reject.json"
        );

        let target = MirrorTarget::new(Category::NonIp, "stream");
        assert_eq!(
            mirror().target_url(&target),
            "https://ruleset.skk.moe/sing-box/non_ip/stream.json"
        );
    }

    #[test]
    fn test_output_name() {
        let target = MirrorTarget::new(Category::Domainset, "reject");
        assert_eq!(mirror().output_name(&target), "sukka_reject_domainset.json");

        let target = MirrorTarget::new(Category::Ip, "china");
        assert_eq!(mirror().output_name(&target), "sukka_china_ip.json");
    }

    #[test]
    fn test_custom_prefix() {
        let config = MirrorConfig {
            output_prefix: "upstream".to_string(),
            ..Default::default()
        };
        let mirror = Mirror::new(config).unwrap();
        let target = MirrorTarget::new(Category::NonIp, "cdn");
        assert_eq!(mirror.output_name(&target), "upstream_cdn_non_ip.json");
    }
}
