//! sbrule - sing-box rule-set generation and mirroring.
//!
//! This crate converts plain-text domain/IP rule lists into the versioned
//! sing-box rule-set JSON format, and mirrors the sing-box renditions of
//! rule-sets published by Sukka's Surge ruleset collection.
//!
//! # Features
//!
//! - **Rule list conversion**: one rule per line, classified into domain
//!   suffix and IP CIDR criteria
//! - **Link discovery**: rule-set URLs extracted from a published README
//!   and deduplicated into (category, name) targets
//! - **Mirroring**: targets downloaded from the sing-box URL scheme,
//!   validated as JSON, and written byte-for-byte
//! - **Pluggable extraction**: the document-matching rule sits behind the
//!   [`LinkExtractor`] trait
//!
//! # Quick Start
//!
//! ```ignore
//! use sbrule::{convert_dir, Mirror, MirrorConfig};
//! use std::path::Path;
//!
//! // Convert local rule lists
//! let written = convert_dir(Path::new("rules"), Path::new("output"))?;
//! println!("converted {} rule lists", written);
//!
//! // Mirror published rule-sets
//! let mirror = Mirror::new(MirrorConfig::default())?;
//! let report = mirror.run(Path::new("output"))?;
//! println!("mirrored {} rule-sets", report.mirrored);
//! ```

mod category;
mod error;

pub mod config;
pub mod converter;
pub mod extract;
pub mod mirror;
pub mod ruleset;

// Re-export core types
pub use category::Category;
pub use error::{Error, Result};

// Re-export converter entry points
pub use converter::{convert_dir, convert_file, RuleFileParser};

// Re-export mirror types
pub use config::MirrorConfig;
pub use extract::{LinkExtractor, MirrorTarget, RegexLinkExtractor};
pub use mirror::{Mirror, MirrorReport};

// Re-export rule-set document types
pub use ruleset::{Criteria, RuleSet, RULE_SET_VERSION};
