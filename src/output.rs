//! Output formatters (human and JSONL)

pub mod jsonl;
pub mod rule_listing;

pub use jsonl::JsonlFormatter;
pub use rule_listing::{RuleListing, RuleListingHumanFormatter, RuleListingJsonlFormatter};
