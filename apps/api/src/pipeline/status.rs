//! Pure transition logic for the two pipeline state machines.
//!
//! The UI hides action buttons on terminal rows, but that is cosmetic — the
//! rules here are the actual enforcement and hold for every caller.

use std::fmt;

// ────────────────────────────────────────────────────────────────────────────
// Candidate machine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateStatus {
    Submitted,
    UnderReview,
    PhoneScreenScheduled,
    Shortlisted,
    Rejected,
    OnsiteScheduled,
    Hired,
}

impl CandidateStatus {
    pub fn parse(s: &str) -> Option<CandidateStatus> {
        match s {
            "Submitted" => Some(CandidateStatus::Submitted),
            "Under Review" => Some(CandidateStatus::UnderReview),
            "Phone Screen Scheduled" => Some(CandidateStatus::PhoneScreenScheduled),
            "Shortlisted" => Some(CandidateStatus::Shortlisted),
            "Rejected" => Some(CandidateStatus::Rejected),
            "Onsite Scheduled" => Some(CandidateStatus::OnsiteScheduled),
            "Hired" => Some(CandidateStatus::Hired),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::Submitted => "Submitted",
            CandidateStatus::UnderReview => "Under Review",
            CandidateStatus::PhoneScreenScheduled => "Phone Screen Scheduled",
            CandidateStatus::Shortlisted => "Shortlisted",
            CandidateStatus::Rejected => "Rejected",
            CandidateStatus::OnsiteScheduled => "Onsite Scheduled",
            CandidateStatus::Hired => "Hired",
        }
    }

    /// Terminal statuses accept no further pipeline action.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CandidateStatus::Hired | CandidateStatus::Rejected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineAction {
    Review,
    Shortlist,
    Reject,
    Schedule,
    Hire,
}

impl PipelineAction {
    pub fn parse(s: &str) -> Option<PipelineAction> {
        match s {
            "review" => Some(PipelineAction::Review),
            "shortlist" => Some(PipelineAction::Shortlist),
            "reject" => Some(PipelineAction::Reject),
            "schedule" => Some(PipelineAction::Schedule),
            "hire" => Some(PipelineAction::Hire),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineAction::Review => "review",
            PipelineAction::Shortlist => "shortlist",
            PipelineAction::Reject => "reject",
            PipelineAction::Schedule => "schedule",
            PipelineAction::Hire => "hire",
        }
    }
}

/// Returned when an action is applied to a terminal row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionDenied {
    pub action: &'static str,
    pub entity: &'static str,
    pub status: &'static str,
}

impl fmt::Display for TransitionDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.status.to_lowercase();
        let article = match status.chars().next() {
            Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
            _ => "a",
        };
        write!(f, "cannot {} {article} {status} {}", self.action, self.entity)
    }
}

/// Computes the status a candidate moves to under `action`.
///
/// `schedule` branches on whether a concrete time was supplied: with one the
/// candidate goes onsite, without one a phone screen is being arranged.
pub fn next_candidate_status(
    current: CandidateStatus,
    action: PipelineAction,
    has_schedule_at: bool,
) -> Result<CandidateStatus, TransitionDenied> {
    if current.is_terminal() {
        return Err(TransitionDenied {
            action: action.as_str(),
            entity: "candidate",
            status: current.as_str(),
        });
    }

    Ok(match action {
        PipelineAction::Review => CandidateStatus::UnderReview,
        PipelineAction::Shortlist => CandidateStatus::Shortlisted,
        PipelineAction::Reject => CandidateStatus::Rejected,
        PipelineAction::Schedule if has_schedule_at => CandidateStatus::OnsiteScheduled,
        PipelineAction::Schedule => CandidateStatus::PhoneScreenScheduled,
        PipelineAction::Hire => CandidateStatus::Hired,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Application machine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Applied,
    Screening,
    Interview,
    Offer,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    pub fn parse(s: &str) -> Option<ApplicationStatus> {
        match s {
            "Applied" => Some(ApplicationStatus::Applied),
            "Screening" => Some(ApplicationStatus::Screening),
            "Interview" => Some(ApplicationStatus::Interview),
            "Offer" => Some(ApplicationStatus::Offer),
            "Hired" => Some(ApplicationStatus::Hired),
            "Rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Screening => "Screening",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Offer => "Offer",
            ApplicationStatus::Hired => "Hired",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Hired | ApplicationStatus::Rejected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationAction {
    Review,
    Schedule,
    Offer,
    Hire,
    Reject,
}

impl ApplicationAction {
    pub fn parse(s: &str) -> Option<ApplicationAction> {
        match s {
            "review" => Some(ApplicationAction::Review),
            "schedule" => Some(ApplicationAction::Schedule),
            "offer" => Some(ApplicationAction::Offer),
            "hire" => Some(ApplicationAction::Hire),
            "reject" => Some(ApplicationAction::Reject),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationAction::Review => "review",
            ApplicationAction::Schedule => "schedule",
            ApplicationAction::Offer => "offer",
            ApplicationAction::Hire => "hire",
            ApplicationAction::Reject => "reject",
        }
    }
}

pub fn next_application_status(
    current: ApplicationStatus,
    action: ApplicationAction,
) -> Result<ApplicationStatus, TransitionDenied> {
    if current.is_terminal() {
        return Err(TransitionDenied {
            action: action.as_str(),
            entity: "application",
            status: current.as_str(),
        });
    }

    Ok(match action {
        ApplicationAction::Review => ApplicationStatus::Screening,
        ApplicationAction::Schedule => ApplicationStatus::Interview,
        ApplicationAction::Offer => ApplicationStatus::Offer,
        ApplicationAction::Hire => ApplicationStatus::Hired,
        ApplicationAction::Reject => ApplicationStatus::Rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_moves_to_under_review() {
        assert_eq!(
            next_candidate_status(CandidateStatus::Submitted, PipelineAction::Review, false),
            Ok(CandidateStatus::UnderReview)
        );
    }

    #[test]
    fn test_shortlist_from_submitted() {
        assert_eq!(
            next_candidate_status(CandidateStatus::Submitted, PipelineAction::Shortlist, false),
            Ok(CandidateStatus::Shortlisted)
        );
    }

    #[test]
    fn test_schedule_with_time_goes_onsite() {
        assert_eq!(
            next_candidate_status(CandidateStatus::Shortlisted, PipelineAction::Schedule, true),
            Ok(CandidateStatus::OnsiteScheduled)
        );
    }

    #[test]
    fn test_schedule_without_time_is_phone_screen() {
        assert_eq!(
            next_candidate_status(CandidateStatus::UnderReview, PipelineAction::Schedule, false),
            Ok(CandidateStatus::PhoneScreenScheduled)
        );
    }

    #[test]
    fn test_hire_from_shortlisted() {
        assert_eq!(
            next_candidate_status(CandidateStatus::Shortlisted, PipelineAction::Hire, false),
            Ok(CandidateStatus::Hired)
        );
    }

    #[test]
    fn test_hired_rejects_every_action() {
        for action in [
            PipelineAction::Review,
            PipelineAction::Shortlist,
            PipelineAction::Reject,
            PipelineAction::Schedule,
            PipelineAction::Hire,
        ] {
            assert!(
                next_candidate_status(CandidateStatus::Hired, action, true).is_err(),
                "{} should be denied on a hired candidate",
                action.as_str()
            );
        }
    }

    #[test]
    fn test_rejected_rejects_every_action() {
        for action in [
            PipelineAction::Review,
            PipelineAction::Shortlist,
            PipelineAction::Reject,
            PipelineAction::Schedule,
            PipelineAction::Hire,
        ] {
            assert!(next_candidate_status(CandidateStatus::Rejected, action, false).is_err());
        }
    }

    #[test]
    fn test_hire_after_reject_denied() {
        let err =
            next_candidate_status(CandidateStatus::Rejected, PipelineAction::Hire, false)
                .unwrap_err();
        assert_eq!(err.to_string(), "cannot hire a rejected candidate");
    }

    #[test]
    fn test_reject_after_hire_message() {
        let err =
            next_candidate_status(CandidateStatus::Hired, PipelineAction::Reject, false)
                .unwrap_err();
        assert_eq!(err.to_string(), "cannot reject a hired candidate");
    }

    #[test]
    fn test_candidate_status_round_trip() {
        for s in [
            CandidateStatus::Submitted,
            CandidateStatus::UnderReview,
            CandidateStatus::PhoneScreenScheduled,
            CandidateStatus::Shortlisted,
            CandidateStatus::Rejected,
            CandidateStatus::OnsiteScheduled,
            CandidateStatus::Hired,
        ] {
            assert_eq!(CandidateStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(CandidateStatus::parse("On Hold"), None);
    }

    #[test]
    fn test_application_actions_map() {
        use ApplicationAction as A;
        use ApplicationStatus as S;
        assert_eq!(next_application_status(S::Applied, A::Review), Ok(S::Screening));
        assert_eq!(next_application_status(S::Screening, A::Schedule), Ok(S::Interview));
        assert_eq!(next_application_status(S::Interview, A::Offer), Ok(S::Offer));
        assert_eq!(next_application_status(S::Offer, A::Hire), Ok(S::Hired));
        assert_eq!(next_application_status(S::Applied, A::Reject), Ok(S::Rejected));
    }

    #[test]
    fn test_application_terminal_is_strict() {
        use ApplicationAction as A;
        use ApplicationStatus as S;
        for action in [A::Review, A::Schedule, A::Offer, A::Hire, A::Reject] {
            assert!(next_application_status(S::Hired, action).is_err());
            assert!(next_application_status(S::Rejected, action).is_err());
        }
        let err = next_application_status(S::Hired, A::Reject).unwrap_err();
        assert_eq!(err.to_string(), "cannot reject a hired application");
    }

    #[test]
    fn test_pipeline_action_parse() {
        assert_eq!(PipelineAction::parse("hire"), Some(PipelineAction::Hire));
        assert_eq!(PipelineAction::parse("offer"), None);
        assert_eq!(ApplicationAction::parse("offer"), Some(ApplicationAction::Offer));
        assert_eq!(ApplicationAction::parse("shortlist"), None);
    }
}
