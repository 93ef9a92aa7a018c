pub mod candidate;
pub mod interview;
pub mod notification;
pub mod onboarding;
pub mod position;
pub mod purchase_order;
pub mod resume;
pub mod user;
