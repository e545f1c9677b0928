//! Checklist of named pass/fail rules
//!
//! A checklist is built fresh for every proposal and threaded through
//! validation, moderation and status resolution. Rules that do not apply to a
//! proposal (an optional field left out) have no entry at all, which is
//! different from an entry that failed.

mod rules;

pub use rules::{
    ACCEPTED_ANSWERS, PHASE_MIN_WORDS, REQUIRED_PHASES, SECTION_MIN_WORDS, TAGLINE_MAX_CHARS,
    TITLE_MAX_WORDS, evaluate_checklist,
};

use crate::types::ModeratedField;
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a checklist rule
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleId {
    /// Title present
    TitleRequired,
    /// Title within the word limit
    TitleWordLimit,
    /// Title not used by another proposal
    TitleUnique,
    /// Tagline within the character limit
    TaglineLength,
    /// Funding amount is a number
    FundingAmountNumeric,
    /// Sponsor question answered Yes or No
    SponsorAnswer,
    /// Existing project question answered Yes or No
    ExistingProjectAnswer,
    /// Author present
    AuthorRequired,
    /// Author is a registered user
    AuthorExists,
    /// Description present
    DescriptionRequired,
    /// Description long enough
    DescriptionLength,
    /// Details present
    DetailsRequired,
    /// Details long enough
    DetailsLength,
    /// Phase 1 or Phase 2 present
    StagesRequired,
    /// A phase long enough, keyed by its label
    PhaseLength(String),
    /// Moderation accepted a field
    Moderation(ModeratedField),
}

impl RuleId {
    /// Whether the rule reports a moderation outcome
    pub const fn is_moderation(&self) -> bool {
        matches!(self, Self::Moderation(_))
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TitleRequired => write!(f, "Title is required."),
            Self::TitleWordLimit => {
                write!(f, "Title must be at most {} words.", rules::TITLE_MAX_WORDS)
            }
            Self::TitleUnique => write!(f, "Title must be unique."),
            Self::TaglineLength => write!(
                f,
                "Tagline must be at most {} characters.",
                rules::TAGLINE_MAX_CHARS
            ),
            Self::FundingAmountNumeric => write!(f, "Requested funding amount must be a number."),
            Self::SponsorAnswer => write!(
                f,
                "Organization willing to sponsor is required. Kindly provide a response in Yes or No."
            ),
            Self::ExistingProjectAnswer => write!(
                f,
                "Is it an existing OSS project is required. Kindly provide a response in Yes or No."
            ),
            Self::AuthorRequired => write!(f, "Author is required."),
            Self::AuthorExists => write!(f, "Author must be a registered user."),
            Self::DescriptionRequired => write!(f, "Project description is required."),
            Self::DescriptionLength => write!(
                f,
                "Project description must be at least {} words.",
                rules::SECTION_MIN_WORDS
            ),
            Self::DetailsRequired => write!(f, "Project details & specification are required."),
            Self::DetailsLength => write!(
                f,
                "Project details & specification must be at least {} words.",
                rules::SECTION_MIN_WORDS
            ),
            Self::StagesRequired => write!(
                f,
                "Project stages are required. Phase 1 or Phase 2 must be present."
            ),
            Self::PhaseLength(label) => write!(
                f,
                "{label} must be at least {} words.",
                rules::PHASE_MIN_WORDS
            ),
            Self::Moderation(field) => write!(f, "{field} moderation passed."),
        }
    }
}

/// Outcome of one rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistEntry {
    /// Whether the rule passed
    pub passed: bool,
    /// Whether the rule reports a moderation outcome
    pub moderation: bool,
}

/// Rule outcomes for one proposal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checklist {
    entries: BTreeMap<RuleId, ChecklistEntry>,
}

impl Checklist {
    /// Empty checklist
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Record the outcome of `rule`, replacing any earlier outcome
    pub fn set(&mut self, rule: RuleId, passed: bool) {
        let moderation = rule.is_moderation();
        self.entries
            .insert(rule, ChecklistEntry { passed, moderation });
    }

    /// Drop `rule` from the checklist (not applicable)
    pub fn remove(&mut self, rule: &RuleId) -> Option<ChecklistEntry> {
        self.entries.remove(rule)
    }

    /// Outcome of `rule`, `None` when it has no entry
    pub fn get(&self, rule: &RuleId) -> Option<bool> {
        self.entries.get(rule).map(|e| e.passed)
    }

    /// Whether `rule` has an entry
    pub fn contains(&self, rule: &RuleId) -> bool {
        self.entries.contains_key(rule)
    }

    /// Overlay `other`: its entries replace entries for the same rule
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Entries in rule order
    pub fn iter(&self) -> impl Iterator<Item = (&RuleId, &ChecklistEntry)> {
        self.entries.iter()
    }

    /// Rules that failed
    pub fn failures(&self) -> impl Iterator<Item = &RuleId> {
        self.entries
            .iter()
            .filter(|(_, e)| !e.passed)
            .map(|(rule, _)| rule)
    }

    /// Whether every entry passed
    pub fn all_passed(&self) -> bool {
        self.entries.values().all(|e| e.passed)
    }

    /// Whether at least one moderation entry failed
    pub fn has_failed_moderation(&self) -> bool {
        self.entries.values().any(|e| e.moderation && !e.passed)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
