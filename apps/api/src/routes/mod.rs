pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::state::AppState;
use crate::{interviews, notify, onboarding, pipeline, positions, purchase_orders, resumes, users};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Identity mirror
        .route("/api/v1/users/sync", post(users::handle_sync_user))
        // Position registry
        .route(
            "/api/v1/positions",
            post(positions::handlers::handle_create_position)
                .get(positions::handlers::handle_list_positions),
        )
        // Candidate pipeline
        .route(
            "/api/v1/candidates",
            post(pipeline::handlers::handle_create_candidate)
                .get(pipeline::handlers::handle_list_candidates),
        )
        .route(
            "/api/v1/candidates/:id",
            get(pipeline::handlers::handle_get_candidate),
        )
        .route(
            "/api/v1/candidates/:id/:action",
            put(pipeline::handlers::handle_candidate_transition),
        )
        // Applications
        .route(
            "/api/v1/applications",
            post(pipeline::handlers::handle_create_application)
                .get(pipeline::handlers::handle_list_applications),
        )
        .route(
            "/api/v1/applications/:id",
            get(pipeline::handlers::handle_get_application),
        )
        .route(
            "/api/v1/applications/:id/:action",
            put(pipeline::handlers::handle_application_transition),
        )
        // Resume store
        .route(
            "/api/v1/resumes",
            post(resumes::handlers::handle_upload_resume)
                .get(resumes::handlers::handle_list_resumes),
        )
        .route(
            "/api/v1/resumes/active",
            get(resumes::handlers::handle_get_active_resume),
        )
        .route(
            "/api/v1/resumes/active/:id",
            put(resumes::handlers::handle_activate_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            delete(resumes::handlers::handle_delete_resume),
        )
        // Interview scheduler
        .route(
            "/api/v1/interviews",
            post(interviews::handlers::handle_create_interview)
                .get(interviews::handlers::handle_list_interviews),
        )
        .route(
            "/api/v1/interviews/:id",
            put(interviews::handlers::handle_update_interview),
        )
        // Inbox
        .route(
            "/api/v1/notifications",
            get(notify::handlers::handle_list_notifications),
        )
        .route(
            "/api/v1/notifications/:id/read",
            put(notify::handlers::handle_mark_notification_read),
        )
        // Onboarding tracker
        .route(
            "/api/v1/onboarding",
            get(onboarding::handlers::handle_list_onboarding),
        )
        .route(
            "/api/v1/onboarding/:id/status",
            put(onboarding::handlers::handle_set_onboarding_status),
        )
        // Purchase order gate
        .route(
            "/api/v1/purchase-orders",
            post(purchase_orders::handlers::handle_create_purchase_order)
                .get(purchase_orders::handlers::handle_list_purchase_orders),
        )
        .route(
            "/api/v1/purchase-orders/:id",
            put(purchase_orders::handlers::handle_set_purchase_order_status),
        )
        .with_state(state)
}
