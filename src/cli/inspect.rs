//! Inspect command - show how a proposal document is parsed

use crate::cli::style::Stylize;
use anstream::println;
use proposal_intake::document::{ProposalDocument, SECTION_HEADERS, word_count};
use proposal_intake::error::Result;
use std::path::Path;

fn print_section(header: &str, body: &str) {
    println!(
        "  {header} {}",
        format!("({} words)", word_count(body)).muted()
    );
}

/// Parse `path` and print its metadata, sections and stages
///
/// Works offline; nothing is sent to the registry.
pub fn run_inspect(path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)?;
    let document = ProposalDocument::parse(text);
    let [description, details, stages, supporting_info] = SECTION_HEADERS;

    println!("{}", path.display().emphasis());
    println!();
    println!("{}", "Metadata".emphasis());
    if document.metadata.is_empty() {
        println!("  {}", "(none)".muted());
    }
    for (key, value) in document.metadata.iter() {
        println!("  {} {value}", format!("{key}:").muted());
    }

    let sections = &document.sections;
    println!();
    println!("{}", "Sections".emphasis());
    print_section(description, &sections.description);
    print_section(details, &sections.details);
    println!(
        "  {stages} {}",
        format!("({} phases)", sections.stages.len()).muted()
    );
    for (label, phase) in sections.stages.iter() {
        println!(
            "    {label} {}",
            format!("({} words)", word_count(phase)).muted()
        );
    }
    print_section(supporting_info, &sections.supporting_info);
    Ok(())
}
