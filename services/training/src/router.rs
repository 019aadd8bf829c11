use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use dti_core::health::{database_ready, healthz};
use dti_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    assignment::{
        create_assignment, delete_assignment, get_assignment, list_assignments,
        list_my_assignments, update_assignment,
    },
    auth::{login, logout, me, refresh},
    competency::{
        create_competency, delete_competency, get_competency, list_competencies,
        update_competency,
    },
    enrollment::{
        create_enrollment, delete_enrollment, get_enrollment, list_enrollments,
        list_my_enrollments, update_enrollment,
    },
    lap::{create_lap, delete_lap, get_lap, get_lap_progress, list_laps, list_my_laps, update_lap},
    progress::{
        create_progress, delete_progress, get_progress, list_my_progress, list_progress,
        update_progress,
    },
    supervision::{
        create_supervision, delete_supervision, get_supervision, list_supervisions,
        update_supervision,
    },
    training::{
        create_training, delete_training, get_assigned_users, get_enrolled_users, get_training,
        list_trainings, update_training,
    },
    user::{
        create_user, delete_user, get_me, get_user, list_employees, list_users, register,
        update_user,
    },
};
use crate::state::AppState;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    database_ready(&state.db).await
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .route("/auth/register", post(register))
        // Users
        .route("/users", get(list_users).post(create_user))
        .route("/users/me", get(get_me))
        .route("/employees", get(list_employees))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        // Trainings
        .route("/trainings", get(list_trainings).post(create_training))
        .route(
            "/trainings/{id}",
            get(get_training).put(update_training).delete(delete_training),
        )
        .route("/trainings/{id}/assigned-users", get(get_assigned_users))
        .route("/trainings/{id}/enrolled-users", get(get_enrolled_users))
        // Assignments
        .route("/assignments", get(list_assignments).post(create_assignment))
        .route("/assignments/me", get(list_my_assignments))
        .route(
            "/assignments/{id}",
            get(get_assignment)
                .put(update_assignment)
                .delete(delete_assignment),
        )
        // Enrollments
        .route("/enrollments", get(list_enrollments).post(create_enrollment))
        .route("/enrollments/me", get(list_my_enrollments))
        .route(
            "/enrollments/{id}",
            get(get_enrollment)
                .put(update_enrollment)
                .delete(delete_enrollment),
        )
        // Supervisions
        .route("/supervisions", get(list_supervisions).post(create_supervision))
        .route(
            "/supervisions/{id}",
            get(get_supervision)
                .put(update_supervision)
                .delete(delete_supervision),
        )
        // Competencies
        .route("/competencies", get(list_competencies).post(create_competency))
        .route(
            "/competencies/{id}",
            get(get_competency)
                .put(update_competency)
                .delete(delete_competency),
        )
        // Learning action plans
        .route("/laps", get(list_laps).post(create_lap))
        .route("/laps/me", get(list_my_laps))
        .route("/laps/{id}", get(get_lap).put(update_lap).delete(delete_lap))
        .route("/laps/{id}/progress", get(get_lap_progress))
        // Progress
        .route("/progress", get(list_progress).post(create_progress))
        .route("/progress/me", get(list_my_progress))
        .route(
            "/progress/{id}",
            get(get_progress).put(update_progress).delete(delete_progress),
        )
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
