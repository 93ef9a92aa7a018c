//! Request principal and role-based authorization.
//!
//! Authentication itself lives in the API gateway; every request reaches the
//! core with trusted identity headers (`x-user-id`, `x-user-role`,
//! `x-user-email`). Handlers never compare role strings — authorization goes
//! through the capability set attached to each role.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Closed set of actor roles known to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Candidate,
    Employer,
    HiringManager,
    Recruiter,
}

impl Role {
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "candidate" => Some(Role::Candidate),
            "employer" => Some(Role::Employer),
            "hiring_manager" => Some(Role::HiringManager),
            "recruiter" => Some(Role::Recruiter),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidate => "candidate",
            Role::Employer => "employer",
            Role::HiringManager => "hiring_manager",
            Role::Recruiter => "recruiter",
        }
    }

    /// The fixed capability set granted to this role.
    pub fn capabilities(&self) -> &'static [Capability] {
        use Capability::*;
        match self {
            Role::Candidate => &[SubmitCandidates, ManageResumes],
            Role::Employer => &[
                AdvancePipeline,
                ManagePositions,
                ScheduleInterviews,
                TrackOnboarding,
                ApprovePurchaseOrders,
            ],
            Role::HiringManager => &[
                AdvancePipeline,
                ManagePositions,
                ScheduleInterviews,
                TrackOnboarding,
            ],
            Role::Recruiter => &[SubmitCandidates, AdvancePipeline, ScheduleInterviews, ManageResumes],
        }
    }
}

/// A single permitted action class. Handlers check these, never role strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    SubmitCandidates,
    AdvancePipeline,
    ManagePositions,
    ScheduleInterviews,
    TrackOnboarding,
    ApprovePurchaseOrders,
    ManageResumes,
}

/// The authenticated actor behind a request, as asserted by the gateway.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: Uuid,
    pub role: Role,
    pub email: String,
}

impl Principal {
    pub fn can(&self, capability: Capability) -> bool {
        self.role.capabilities().contains(&capability)
    }

    pub fn require(&self, capability: Capability) -> Result<(), AppError> {
        if self.can(capability) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = header_value(parts, "x-user-id")
            .and_then(|v| Uuid::parse_str(v).ok())
            .ok_or(AppError::Unauthorized)?;
        let role = header_value(parts, "x-user-role")
            .and_then(Role::parse)
            .ok_or(AppError::Unauthorized)?;
        let email = header_value(parts, "x-user-email")
            .filter(|v| !v.is_empty())
            .ok_or(AppError::Unauthorized)?
            .to_string();

        Ok(Principal { id, role, email })
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Role) -> Principal {
        Principal {
            id: Uuid::new_v4(),
            role,
            email: "someone@example.com".to_string(),
        }
    }

    #[test]
    fn test_role_parse_round_trip() {
        for role in [
            Role::Candidate,
            Role::Employer,
            Role::HiringManager,
            Role::Recruiter,
        ] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_role_parse_unknown() {
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("Recruiter"), None); // case-sensitive
    }

    #[test]
    fn test_candidate_cannot_advance_pipeline() {
        let p = principal(Role::Candidate);
        assert!(!p.can(Capability::AdvancePipeline));
        assert!(p.require(Capability::AdvancePipeline).is_err());
    }

    #[test]
    fn test_candidate_manages_own_resumes() {
        assert!(principal(Role::Candidate).can(Capability::ManageResumes));
    }

    #[test]
    fn test_only_employer_approves_purchase_orders() {
        assert!(principal(Role::Employer).can(Capability::ApprovePurchaseOrders));
        assert!(!principal(Role::HiringManager).can(Capability::ApprovePurchaseOrders));
        assert!(!principal(Role::Recruiter).can(Capability::ApprovePurchaseOrders));
        assert!(!principal(Role::Candidate).can(Capability::ApprovePurchaseOrders));
    }

    #[test]
    fn test_recruiter_submits_and_advances() {
        let p = principal(Role::Recruiter);
        assert!(p.can(Capability::SubmitCandidates));
        assert!(p.can(Capability::AdvancePipeline));
        assert!(!p.can(Capability::TrackOnboarding));
    }

    #[test]
    fn test_hiring_manager_tracks_onboarding() {
        assert!(principal(Role::HiringManager).can(Capability::TrackOnboarding));
    }
}
