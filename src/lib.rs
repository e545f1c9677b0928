//! proposal-intake - validate, moderate and publish proposal documents
//!
//! Proposals are Markdown documents with a YAML front-matter block, kept in a
//! repository. Each run evaluates every proposal against a checklist of rules
//! and a content moderation service, resolves a publish status and submits the
//! result to the proposal registry.
//!
//! # Architecture
//!
//! - [`document`] - front matter and section parsing
//! - [`checklist`] - rule identifiers and validation rules
//! - [`moderation`] - diff-aware moderation of free-text fields
//! - [`status`] - publish status and retry escalation
//! - [`payload`] - submission payload assembly
//! - [`registry`] - registry service abstraction (HTTP)
//! - [`host`] - repository host abstraction (GitHub)
//! - [`intake`] - three-phase intake engine

pub mod checklist;
pub mod config;
pub mod document;
pub mod error;
pub mod host;
pub mod intake;
pub mod moderation;
pub mod payload;
pub mod registry;
pub mod status;
pub mod types;

pub use error::{Error, Result};
