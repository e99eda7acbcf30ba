//! sing-box rule-set document types.

use serde::{Deserialize, Serialize};

/// Rule-set source format version emitted by this crate.
pub const RULE_SET_VERSION: u32 = 1;

/// A versioned sing-box rule-set document.
///
/// The on-disk shape is `{"version": 1, "rules": [{...criteria...}]}`;
/// converters here always emit a single-element `rules` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Source format version
    pub version: u32,
    /// Rule entries, each a bag of match criteria
    pub rules: Vec<Criteria>,
}

impl RuleSet {
    /// Wrap one criteria block into a rule-set document.
    pub fn single(criteria: Criteria) -> Self {
        Self {
            version: RULE_SET_VERSION,
            rules: vec![criteria],
        }
    }
}

/// Match criteria for one rule entry.
///
/// Field order is the JSON key order. Empty lists are omitted from the
/// serialized document entirely rather than written as `[]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    /// Exact hostname matches
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain: Vec<String>,
    /// Hostname suffix matches
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain_suffix: Vec<String>,
    /// IP CIDR ranges
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_cidr: Vec<String>,
}

impl Criteria {
    /// True when no criteria list has any entry.
    ///
    /// An empty criteria block must never be written out as a rule-set.
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty() && self.domain_suffix.is_empty() && self.ip_cidr.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_lists_omitted() {
        let criteria = Criteria {
            domain_suffix: vec!["example.com".to_string()],
            ip_cidr: vec!["10.0.0.0/24".to_string()],
            ..Default::default()
        };
        let json = serde_json::to_string(&RuleSet::single(criteria)).unwrap();
        assert_eq!(
            json,
            r#"{"version":1,"rules":[{"domain_suffix":["example.com"],"ip_cidr":["10.0.0.0/24"]}]}"#
        );
    }

    #[test]
    fn test_key_order() {
        let criteria = Criteria {
            domain: vec!["a.example".to_string()],
            domain_suffix: vec!["b.example".to_string()],
            ip_cidr: vec!["192.168.0.0/16".to_string()],
        };
        let json = serde_json::to_string(&criteria).unwrap();
        let domain_pos = json.find("\"domain\"").unwrap();
        let suffix_pos = json.find("\"domain_suffix\"").unwrap();
        let cidr_pos = json.find("\"ip_cidr\"").unwrap();
        assert!(domain_pos < suffix_pos);
        assert!(suffix_pos < cidr_pos);
    }

    #[test]
    fn test_criteria_is_empty() {
        assert!(Criteria::default().is_empty());

        let criteria = Criteria {
            domain: vec!["example.com".to_string()],
            ..Default::default()
        };
        assert!(!criteria.is_empty());
    }

    #[test]
    fn test_deserialize_upstream_document() {
        // Mirrored documents may carry lists this converter never emits.
        let json = r#"{"version":1,"rules":[{"domain":["x.example"],"ip_cidr":["10.0.0.0/8"]}]}"#;
        let rule_set: RuleSet = serde_json::from_str(json).unwrap();
        assert_eq!(rule_set.version, RULE_SET_VERSION);
        assert_eq!(rule_set.rules.len(), 1);
        assert_eq!(rule_set.rules[0].domain, vec!["x.example"]);
        assert!(rule_set.rules[0].domain_suffix.is_empty());
    }
}
