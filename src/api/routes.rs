//! API Routes
//!
//! HTTP endpoint definitions. Each route maps 1:1 onto a review handler.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::aggregate::HelperValidation;
use crate::error::AppError;
use crate::handlers::{
    DecisionResult, InvalidateValidationCommand, InvalidateValidationResult,
    RejectHelperCommand, ReviewHandlers, StartReviewCommand, UpdateProfileCommand,
    UpdateProfileResult, ValidateHelperCommand,
};
use crate::outbound::SideEffect;

/// Shared state for all review routes
#[derive(Clone)]
pub struct AppState {
    pub handlers: Arc<ReviewHandlers>,
}

impl AppState {
    pub fn new(handlers: ReviewHandlers) -> Self {
        Self {
            handlers: Arc::new(handlers),
        }
    }
}

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HelperStatusResponse {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub status: String,
    pub email_confirmed: bool,
    pub credentials_submitted: bool,
    pub background_check_submitted: bool,
    pub is_pending_review: bool,
    pub can_apply_to_events: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub version: i64,
}

impl From<&HelperValidation> for HelperStatusResponse {
    fn from(helper: &HelperValidation) -> Self {
        Self {
            email: helper.email().to_string(),
            firstname: helper.firstname().to_string(),
            lastname: helper.lastname().to_string(),
            status: helper.status().label().to_string(),
            email_confirmed: helper.email_confirmed(),
            credentials_submitted: helper.credentials_submitted(),
            background_check_submitted: helper.background_check_submitted(),
            is_pending_review: helper.is_pending_review(),
            can_apply_to_events: helper.can_apply_to_events(),
            rejection_reason: helper.rejection_reason().map(str::to_string),
            version: helper.version(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    pub helper: HelperStatusResponse,
    pub notification: SideEffect,
}

impl From<DecisionResult> for DecisionResponse {
    fn from(result: DecisionResult) -> Self {
        Self {
            helper: HelperStatusResponse::from(&result.helper),
            notification: result.notification,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileUpdateResponse {
    pub helper: HelperStatusResponse,
    pub invalidated: bool,
    pub event: SideEffect,
}

impl From<UpdateProfileResult> for ProfileUpdateResponse {
    fn from(result: UpdateProfileResult) -> Self {
        Self {
            helper: HelperStatusResponse::from(&result.helper),
            invalidated: result.invalidated,
            event: result.event,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub helper: HelperStatusResponse,
    pub invalidated: bool,
}

impl From<InvalidateValidationResult> for InvalidateResponse {
    fn from(result: InvalidateValidationResult) -> Self {
        Self {
            helper: HelperStatusResponse::from(&result.helper),
            invalidated: result.invalidated,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PendingReviewResponse {
    pub helpers: Vec<HelperStatusResponse>,
    pub total: usize,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/review-queue", get(list_pending_review))
        .route("/helpers/:email", get(get_helper))
        .route("/helpers/:email/review", post(start_review))
        .route("/helpers/:email/validate", post(validate_helper))
        .route("/helpers/:email/reject", post(reject_helper))
        .route("/helpers/:email/invalidate", post(invalidate_validation))
        .route("/helpers/:email/credentials", post(resubmit_credentials))
        .route("/helpers/:email/background-check", post(resubmit_background_check))
}

// =========================================================================
// Queries
// =========================================================================

/// List helpers awaiting review, sorted by email
async fn list_pending_review(
    State(state): State<AppState>,
) -> Result<Json<PendingReviewResponse>, AppError> {
    let mut pending = state.handlers.pending_review.execute().await?;
    pending.sort_by(|a, b| a.email().cmp(b.email()));

    let helpers: Vec<HelperStatusResponse> =
        pending.iter().map(HelperStatusResponse::from).collect();
    let total = helpers.len();

    Ok(Json(PendingReviewResponse { helpers, total }))
}

async fn get_helper(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<HelperStatusResponse>, AppError> {
    let helper = state.handlers.status.execute(&email).await?;
    Ok(Json(HelperStatusResponse::from(&helper)))
}

// =========================================================================
// Admin decisions
// =========================================================================

async fn start_review(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<HelperStatusResponse>, AppError> {
    let result = state
        .handlers
        .start_review
        .execute(StartReviewCommand::new(email))
        .await?;

    Ok(Json(HelperStatusResponse::from(&result.helper)))
}

async fn validate_helper(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<DecisionResponse>, AppError> {
    let result = state
        .handlers
        .validate
        .execute(ValidateHelperCommand::new(email))
        .await?;

    Ok(Json(result.into()))
}

/// Reject a helper; the body and its reason are both optional
async fn reject_helper(
    State(state): State<AppState>,
    Path(email): Path<String>,
    body: Bytes,
) -> Result<Json<DecisionResponse>, AppError> {
    let request: RejectRequest = if body.iter().all(u8::is_ascii_whitespace) {
        RejectRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::InvalidRequest(e.to_string()))?
    };

    let mut command = RejectHelperCommand::new(email);
    command.reason = request.reason;

    let result = state.handlers.reject.execute(command).await?;

    Ok(Json(result.into()))
}

async fn invalidate_validation(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<InvalidateResponse>, AppError> {
    let result = state
        .handlers
        .invalidate
        .execute(InvalidateValidationCommand::new(email))
        .await?;

    Ok(Json(result.into()))
}

// =========================================================================
// Helper resubmission
// =========================================================================

async fn resubmit_credentials(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ProfileUpdateResponse>, AppError> {
    let result = state
        .handlers
        .update_profile
        .execute(UpdateProfileCommand::resubmit_credentials(email))
        .await?;

    Ok(Json(result.into()))
}

async fn resubmit_background_check(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ProfileUpdateResponse>, AppError> {
    let result = state
        .handlers
        .update_profile
        .execute(UpdateProfileCommand::resubmit_background_check(email))
        .await?;

    Ok(Json(result.into()))
}
