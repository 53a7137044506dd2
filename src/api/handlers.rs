//! HTTP request handlers

use super::assets::{serve_index, serve_static};
use super::types::{AskRequest, AskResponse, ErrorResponse};
use super::AppState;
use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

const QUESTION_REQUIRED: &str = "A pergunta é obrigatória";
const ANSWER_UNAVAILABLE: &str =
    "Não foi possível processar sua pergunta. Tente novamente mais tarde.";
const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/static/*path", get(serve_static))
        .route("/health", get(health))
        .route("/api/ask", post(ask))
        .layer(middleware::from_fn(add_hsts_header))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

/// Answer one question through the conversation graph
async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, AppError> {
    let Json(req) = payload.map_err(|e| {
        tracing::warn!(error = %e, "Rejected malformed ask request");
        AppError::BadRequest(QUESTION_REQUIRED.to_string())
    })?;

    let question = req.question.trim();
    if question.is_empty() {
        return Err(AppError::BadRequest(QUESTION_REQUIRED.to_string()));
    }

    match state.conversation.converse(question).await {
        Ok(answer) => Ok(Json(AskResponse { answer })),
        Err(e) => {
            tracing::error!(error = %e, "Conversation failed");
            Err(AppError::Unavailable(ANSWER_UNAVAILABLE.to_string()))
        }
    }
}

/// HSTS for requests that reached the proxy over HTTPS
async fn add_hsts_header(req: Request, next: Next) -> Response {
    let secure = req
        .headers()
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|proto| proto.eq_ignore_ascii_case("https"));

    let mut response = next.run(req).await;
    if secure {
        response.headers_mut().insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static(HSTS_VALUE),
        );
    }
    response
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Unavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
