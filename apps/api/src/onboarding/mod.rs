// Onboarding tracker. Activated when a hire lands; progresses through a
// free status set with no ordering constraint, scoped to the manager who
// created the underlying application.

pub mod handlers;
pub mod tracker;
