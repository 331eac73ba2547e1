//! HTTP surface of the offer service.
//!
//! `POST /api/offers` prices an application; `GET /` is a liveness banner.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::errors::OfferError;
use crate::offers::OfferService;
use crate::types::{LoanOffer, OfferRequest};

pub const BANNER: &str = "Loan offer service is running";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Http { status: StatusCode, message: String },
    #[error(transparent)]
    Offer(#[from] OfferError),
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self::Http {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Http { status, message } => (status, message),
            ApiError::Offer(err) => {
                let status = match err {
                    OfferError::InvalidConfiguration { .. }
                    | OfferError::Transport { .. }
                    | OfferError::UnexpectedStatus { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, err.to_string())
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub fn build_router(service: OfferService) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/api/offers", post(create_offers))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(service)
}

/// bind and serve until the listener fails
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let service = OfferService::new(config.offers)?;
    let app = build_router(service);

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    info!("loan offer service listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn banner() -> &'static str {
    BANNER
}

async fn create_offers(
    State(service): State<OfferService>,
    payload: Result<Json<OfferRequest>, JsonRejection>,
) -> Result<Json<Vec<LoanOffer>>, ApiError> {
    let Json(request) = payload.inspect_err(|rejection| {
        warn!(error = %rejection.body_text(), "rejected malformed offer request");
    })?;

    let offers = service.quote(&request).inspect_err(|err| {
        warn!(error = %err, "offer request refused");
    })?;

    Ok(Json(offers))
}
