use super::types::{
    ErrorResponse, FormSubmission, HealthResponse, PageQuery, PredictResponse, SubmitRequest,
};
use crate::{
    Error,
    prediction::{self, PredictionClient},
    render,
    session::{Session, SessionStore},
};
use axum::{
    extract::{Form, Query, State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, Json},
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub client: Arc<dyn PredictionClient>,
}

impl AppState {
    pub fn new(client: Arc<dyn PredictionClient>) -> Self {
        Self::with_sessions(client, SessionStore::new())
    }

    pub fn with_sessions(client: Arc<dyn PredictionClient>, sessions: SessionStore) -> Self {
        Self { sessions, client }
    }
}

type HtmlError = (StatusCode, Html<String>);
type JsonError = (StatusCode, Json<ErrorResponse>);

fn internal_html(e: Error) -> HtmlError {
    error!("Failed to render page: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(format!("<h1>Internal error</h1><p>{}</p>", render::escape_html(&e.to_string()))),
    )
}

/// The page again, with the form and an inline message.
fn rejected_page(session: &Session, message: &str) -> HtmlError {
    warn!("Rejected form input for session {}: {}", session.id, message);
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(render::render_page(session, Some(message))),
    )
}

fn json_error(status: StatusCode, e: Error) -> JsonError {
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// `GET /`: renders the page without submitting anything.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, HtmlError> {
    let session = state
        .sessions
        .load(query.session_id.as_deref())
        .map_err(internal_html)?;

    Ok(Html(render::render_page(&session, None)))
}

/// `POST /`: the predict button. Any bad input re-renders the page with 422.
pub async fn submit_form(
    State(state): State<AppState>,
    submission: Result<Form<FormSubmission>, FormRejection>,
) -> Result<Html<String>, HtmlError> {
    let submission = match submission {
        Ok(Form(submission)) => submission,
        Err(rejection) => {
            let session = state.sessions.load(None).map_err(internal_html)?;
            return Err(rejected_page(&session, &rejection.body_text()));
        }
    };

    let mut session = state
        .sessions
        .load(submission.session_id.as_deref())
        .map_err(internal_html)?;

    let form = submission
        .parse()
        .map_err(|e| rejected_page(&session, &e.to_string()))?;

    let prediction_request = match form.validate() {
        Ok(request) => request,
        Err(e) => {
            // Keep the user's values on screen, leave the result slot alone.
            session.form = form;
            return Err(rejected_page(&session, &e.to_string()));
        }
    };

    info!("Received prediction request for session: {}", session.id);

    let outcome = prediction::submit(state.client.as_ref(), &prediction_request).await;
    let session = state
        .sessions
        .record(&session.id, form, outcome)
        .map_err(internal_html)?;

    Ok(Html(render::render_page(&session, None)))
}

/// `POST /api/predict`: same submission, JSON in and out.
pub async fn predict_api(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<PredictResponse>, JsonError> {
    let (session_id, form) = request.into_parts();

    let prediction_request = form
        .validate()
        .map_err(|e| json_error(StatusCode::UNPROCESSABLE_ENTITY, e))?;

    let session = state
        .sessions
        .load(session_id.as_deref())
        .map_err(|e| json_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    info!("Received API prediction request for session: {}", session.id);

    let outcome = prediction::submit(state.client.as_ref(), &prediction_request).await;
    let response = PredictResponse::new(session.id.clone(), &outcome);

    state
        .sessions
        .record(&session.id, form, outcome)
        .map_err(|e| json_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    Ok(Json(response))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
