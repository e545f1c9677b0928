//! Publish status resolution
//!
//! ```text
//!               all entries pass
//!   any run ───────────────────────────────▶ Published   (retry = 0)
//!      │
//!      │ moderation failed, retry ≥ 2
//!      ├───────────────────────────────────▶ UnderReview (retry kept)
//!      │
//!      │ otherwise
//!      └───────────────────────────────────▶ Draft       (retry + 1 if moderation failed)
//! ```

use crate::checklist::Checklist;
use crate::types::{ResolvedStatus, RetryCounter};

/// Status for this run and the retry counter to store with it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved publish status
    pub status: ResolvedStatus,
    /// Retry counter after this run
    pub retry: RetryCounter,
}

/// Resolve the publish status from a checklist and the carried-over retry count
pub fn resolve_status(checklist: &Checklist, retry: RetryCounter) -> Resolution {
    if checklist.all_passed() {
        return Resolution {
            status: ResolvedStatus::Published,
            retry: RetryCounter::reset(),
        };
    }

    let moderation_failed = checklist.has_failed_moderation();
    if moderation_failed && retry.is_escalated() {
        return Resolution {
            status: ResolvedStatus::UnderReview,
            retry,
        };
    }

    Resolution {
        status: ResolvedStatus::Draft,
        retry: if moderation_failed {
            retry.incremented()
        } else {
            retry
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::RuleId;
    use crate::types::ModeratedField;

    fn checklist(structural: bool, moderation: bool) -> Checklist {
        let mut checklist = Checklist::new();
        checklist.set(RuleId::TitleRequired, structural);
        checklist.set(RuleId::Moderation(ModeratedField::Title), moderation);
        checklist
    }

    #[test]
    fn test_all_passed_publishes_and_resets() {
        let resolution = resolve_status(&checklist(true, true), RetryCounter::new(2));
        assert_eq!(resolution.status, ResolvedStatus::Published);
        assert_eq!(resolution.retry, RetryCounter::new(0));
    }

    #[test]
    fn test_structural_failure_is_draft_without_increment() {
        let resolution = resolve_status(&checklist(false, true), RetryCounter::new(1));
        assert_eq!(resolution.status, ResolvedStatus::Draft);
        assert_eq!(resolution.retry, RetryCounter::new(1));
    }

    #[test]
    fn test_moderation_failure_escalates_on_third_cycle() {
        let failing = checklist(true, false);

        let first = resolve_status(&failing, RetryCounter::default());
        assert_eq!(first.status, ResolvedStatus::Draft);
        assert_eq!(first.retry, RetryCounter::new(1));

        let second = resolve_status(&failing, first.retry);
        assert_eq!(second.status, ResolvedStatus::Draft);
        assert_eq!(second.retry, RetryCounter::new(2));

        let third = resolve_status(&failing, second.retry);
        assert_eq!(third.status, ResolvedStatus::UnderReview);
        assert_eq!(third.retry, RetryCounter::new(2));

        let fourth = resolve_status(&failing, third.retry);
        assert_eq!(fourth.status, ResolvedStatus::UnderReview);
    }

    #[test]
    fn test_escalated_counter_with_only_structural_failure_is_draft() {
        let resolution = resolve_status(&checklist(false, true), RetryCounter::new(2));
        assert_eq!(resolution.status, ResolvedStatus::Draft);
        assert_eq!(resolution.retry, RetryCounter::new(2));
    }

    #[test]
    fn test_empty_checklist_publishes() {
        let resolution = resolve_status(&Checklist::new(), RetryCounter::new(1));
        assert_eq!(resolution.status, ResolvedStatus::Published);
    }
}
