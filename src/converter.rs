//! Plain-text rule list to rule-set converter.

use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::ruleset::{Criteria, RuleSet};
use crate::Result;

/// Plain-text rule list parser.
///
/// Input is one rule per line: either an IPv4 CIDR range or a hostname.
/// Lines starting with `#` are comments.
pub struct RuleFileParser;

impl RuleFileParser {
    /// Parse a rule list from a reader.
    ///
    /// Returns `None` when no line classified into any criteria bucket
    /// (empty file, comments only); callers must not write a rule-set in
    /// that case.
    pub fn parse<R: Read>(reader: R) -> Result<Option<RuleSet>> {
        let mut criteria = Criteria::default();
        let buf_reader = BufReader::new(reader);

        for line in buf_reader.lines() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if is_ip_cidr_shape(line) {
                criteria.ip_cidr.push(line.to_string());
            } else {
                // Plain hostnames become suffix rules; nothing here emits
                // the exact-domain list.
                criteria.domain_suffix.push(line.to_string());
            }
        }

        if criteria.is_empty() {
            return Ok(None);
        }

        Ok(Some(RuleSet::single(criteria)))
    }
}

/// Cheap IPv4-CIDR shape test.
///
/// A line qualifies when it contains a `/` and consists of nothing but
/// digits, dots, and slashes (with at least one digit). Accepts some
/// invalid CIDRs and rejects every IPv6 CIDR; kept deliberately loose
/// since the routing engine validates ranges on load.
fn is_ip_cidr_shape(line: &str) -> bool {
    line.contains('/')
        && line.chars().any(|c| c.is_ascii_digit())
        && line
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '/')
}

/// Convert a single rule file into a rule-set document.
pub fn convert_file(path: &Path) -> Result<Option<RuleSet>> {
    let file = fs::File::open(path)?;
    RuleFileParser::parse(file)
}

/// Convert every `*.txt` file in `rules_dir`, writing `<stem>.json` into
/// `output_dir` for each file that produced a rule-set.
///
/// Files are processed in name order. A file that fails to read or decode
/// is logged and skipped; the remaining files are still processed. Returns
/// the number of rule-sets written.
pub fn convert_dir(rules_dir: &Path, output_dir: &Path) -> Result<usize> {
    let mut paths: Vec<PathBuf> = fs::read_dir(rules_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    let mut written = 0;
    for path in &paths {
        log::info!("processing {}", path.display());
        match convert_one(path, output_dir) {
            Ok(Some(output_path)) => {
                written += 1;
                log::info!("generated {}", output_path.display());
            }
            Ok(None) => {
                log::info!("{}: no rules, skipping", path.display());
            }
            Err(e) => {
                log::error!("failed to convert {}: {}", path.display(), e);
            }
        }
    }

    Ok(written)
}

/// Convert one file and write its rule-set, returning the output path.
fn convert_one(path: &Path, output_dir: &Path) -> Result<Option<PathBuf>> {
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return Ok(None);
    };

    let Some(rule_set) = convert_file(path)? else {
        return Ok(None);
    };

    let output_path = output_dir.join(format!("{stem}.json"));
    fs::write(&output_path, serde_json::to_string_pretty(&rule_set)?)?;
    Ok(Some(output_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cidr_shape() {
        assert!(is_ip_cidr_shape("10.0.0.0/24"));
        assert!(is_ip_cidr_shape("192.168.0.0/16"));
        // Loose by design: not a valid range, still CIDR-shaped.
        assert!(is_ip_cidr_shape("999.999.999.999/99"));

        assert!(!is_ip_cidr_shape("example.com"));
        assert!(!is_ip_cidr_shape("10.0.0.1"));
        assert!(!is_ip_cidr_shape("2001:db8::/32"));
        assert!(!is_ip_cidr_shape("example.com/path"));
        assert!(!is_ip_cidr_shape("/"));
        assert!(!is_ip_cidr_shape("./."));
    }

    #[test]
    fn test_parse_mixed_rules() {
        let text = "example.com\n10.0.0.0/24\n# comment\n";
        let rule_set = RuleFileParser::parse(text.as_bytes()).unwrap().unwrap();

        assert_eq!(rule_set.version, 1);
        assert_eq!(rule_set.rules.len(), 1);

        let criteria = &rule_set.rules[0];
        assert!(criteria.domain.is_empty());
        assert_eq!(criteria.domain_suffix, vec!["example.com"]);
        assert_eq!(criteria.ip_cidr, vec!["10.0.0.0/24"]);
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let text = "\n# header\n  \n  example.org  \n\n# trailing\n";
        let rule_set = RuleFileParser::parse(text.as_bytes()).unwrap().unwrap();
        assert_eq!(rule_set.rules[0].domain_suffix, vec!["example.org"]);
    }

    #[test]
    fn test_parse_comments_only_is_absent() {
        let text = "# nothing here\n\n# still nothing\n";
        assert!(RuleFileParser::parse(text.as_bytes()).unwrap().is_none());
    }

    #[test]
    fn test_parse_empty_input_is_absent() {
        assert!(RuleFileParser::parse("".as_bytes()).unwrap().is_none());
    }

    #[test]
    fn test_convert_dir() {
        let rules_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();

        fs::write(
            rules_dir.path().join("ads.txt"),
            "ads.example\ntracker.example\n",
        )
        .unwrap();
        fs::write(rules_dir.path().join("empty.txt"), "# comments only\n").unwrap();
        fs::write(rules_dir.path().join("notes.md"), "not a rule file\n").unwrap();

        let written = convert_dir(rules_dir.path(), output_dir.path()).unwrap();
        assert_eq!(written, 1);

        assert!(output_dir.path().join("ads.json").exists());
        assert!(!output_dir.path().join("empty.json").exists());
        assert!(!output_dir.path().join("notes.json").exists());

        let content = fs::read_to_string(output_dir.path().join("ads.json")).unwrap();
        let rule_set: RuleSet = serde_json::from_str(&content).unwrap();
        assert_eq!(
            rule_set.rules[0].domain_suffix,
            vec!["ads.example", "tracker.example"]
        );
        // Pretty-printed with two-space indent.
        assert!(content.contains("\n  \"version\": 1"));
    }
}
