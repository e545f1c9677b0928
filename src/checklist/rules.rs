//! Structural and content rules

use super::{Checklist, RuleId};
use crate::document::{ProposalFields, word_count};
use crate::error::Result;
use crate::registry::RegistryService;
use crate::types::{ModeratedField, PriorProposalSnapshot};
use tracing::debug;

/// Maximum words in a title
pub const TITLE_MAX_WORDS: usize = 20;

/// Maximum characters in a tagline
pub const TAGLINE_MAX_CHARS: usize = 160;

/// Minimum words in the description and details sections
pub const SECTION_MIN_WORDS: usize = 50;

/// Minimum words in a phase
pub const PHASE_MIN_WORDS: usize = 20;

/// Accepted answers to the Yes/No questions
pub const ACCEPTED_ANSWERS: [&str; 2] = ["Yes", "No"];

/// Phases of which at least one must be present
pub const REQUIRED_PHASES: [&str; 2] = ["Phase 1", "Phase 2"];

/// Evaluate every structural rule for a proposal
///
/// Returns a complete checklist. Moderation entries only appear here when a
/// required field is missing (forced to `false`); the moderation pass adds the
/// rest. Title uniqueness and author lookups go to the registry and their
/// errors are returned as-is.
pub async fn evaluate_checklist(
    fields: &ProposalFields,
    prior: Option<&PriorProposalSnapshot>,
    registry: &dyn RegistryService,
) -> Result<Checklist> {
    let mut checklist = Checklist::new();

    check_title(&mut checklist, fields, prior, registry).await?;
    check_tagline(&mut checklist, fields);
    check_funding_amount(&mut checklist, fields);
    check_answers(&mut checklist, fields);
    check_author(&mut checklist, fields, registry).await?;
    check_section(
        &mut checklist,
        &fields.description,
        RuleId::DescriptionRequired,
        RuleId::DescriptionLength,
        ModeratedField::Description,
    );
    check_section(
        &mut checklist,
        &fields.details,
        RuleId::DetailsRequired,
        RuleId::DetailsLength,
        ModeratedField::Details,
    );
    check_stages(&mut checklist, fields);
    check_supporting_info(&mut checklist, fields);

    Ok(checklist)
}

async fn check_title(
    checklist: &mut Checklist,
    fields: &ProposalFields,
    prior: Option<&PriorProposalSnapshot>,
    registry: &dyn RegistryService,
) -> Result<()> {
    let Some(title) = fields.title.as_deref() else {
        checklist.set(RuleId::TitleRequired, false);
        checklist.set(RuleId::TitleWordLimit, false);
        checklist.set(RuleId::TitleUnique, false);
        checklist.set(RuleId::Moderation(ModeratedField::Title), false);
        return Ok(());
    };

    checklist.set(RuleId::TitleRequired, true);
    checklist.set(RuleId::TitleWordLimit, word_count(title) <= TITLE_MAX_WORDS);

    let unique = if prior.is_some_and(|p| p.title.as_deref() == Some(title)) {
        debug!(title, "title unchanged since last accepted version");
        true
    } else {
        debug!(title, "checking title uniqueness");
        registry.lookup_title_unique(title).await?
    };
    checklist.set(RuleId::TitleUnique, unique);
    Ok(())
}

fn check_tagline(checklist: &mut Checklist, fields: &ProposalFields) {
    match fields.tagline.as_deref() {
        Some(tagline) => checklist.set(
            RuleId::TaglineLength,
            tagline.chars().count() <= TAGLINE_MAX_CHARS,
        ),
        None => {
            checklist.remove(&RuleId::TaglineLength);
            checklist.remove(&RuleId::Moderation(ModeratedField::Tagline));
        }
    }
}

fn is_number(amount: &str) -> bool {
    amount.trim().parse::<f64>().is_ok_and(f64::is_finite)
}

fn check_funding_amount(checklist: &mut Checklist, fields: &ProposalFields) {
    checklist.set(
        RuleId::FundingAmountNumeric,
        fields.funding_amount.as_deref().is_none_or(is_number),
    );
}

fn is_accepted_answer(answer: Option<&str>) -> bool {
    answer.is_some_and(|a| ACCEPTED_ANSWERS.contains(&a))
}

fn check_answers(checklist: &mut Checklist, fields: &ProposalFields) {
    checklist.set(
        RuleId::SponsorAnswer,
        is_accepted_answer(fields.sponsor_answer.as_deref()),
    );
    checklist.set(
        RuleId::ExistingProjectAnswer,
        is_accepted_answer(fields.existing_project_answer.as_deref()),
    );
}

async fn check_author(
    checklist: &mut Checklist,
    fields: &ProposalFields,
    registry: &dyn RegistryService,
) -> Result<()> {
    let Some(handle) = fields.author_handle() else {
        checklist.set(RuleId::AuthorRequired, false);
        checklist.set(RuleId::AuthorExists, false);
        return Ok(());
    };

    checklist.set(RuleId::AuthorRequired, true);
    debug!(handle = %handle, "checking author account");
    let exists = registry.lookup_author_exists(&handle).await?;
    checklist.set(RuleId::AuthorExists, exists);
    Ok(())
}

fn check_section(
    checklist: &mut Checklist,
    text: &str,
    required: RuleId,
    length: RuleId,
    field: ModeratedField,
) {
    let words = word_count(text);
    if words == 0 {
        checklist.set(required, false);
        checklist.set(length, false);
        checklist.set(RuleId::Moderation(field), false);
        return;
    }

    checklist.set(required, true);
    checklist.set(length, words >= SECTION_MIN_WORDS);
}

fn check_stages(checklist: &mut Checklist, fields: &ProposalFields) {
    let stages = &fields.stages;
    let has_required = REQUIRED_PHASES.iter().any(|label| stages.contains(label));
    checklist.set(RuleId::StagesRequired, has_required);

    if !has_required {
        for label in REQUIRED_PHASES {
            checklist.set(RuleId::PhaseLength(label.to_string()), false);
            checklist.set(RuleId::Moderation(ModeratedField::phase(label)), false);
        }
    }

    for (label, text) in stages.iter() {
        checklist.set(
            RuleId::PhaseLength(label.to_string()),
            word_count(text) >= PHASE_MIN_WORDS,
        );
    }
}

fn check_supporting_info(checklist: &mut Checklist, fields: &ProposalFields) {
    if fields.supporting_info.trim().is_empty() {
        checklist.remove(&RuleId::Moderation(ModeratedField::SupportingInfo));
    }
}
