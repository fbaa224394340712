//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{InputField, ResolveError};
use crate::resolver::LookupResult;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/resolve", get(resolve_address))
        .route("/facility", get(resolve_facility))
        .route("/api/facilities", get(list_facilities))
        .route("/api/towns", get(list_towns))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with search forms.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let data = state.resolver.data();
    let template = IndexTemplate {
        municipality: data.municipality().to_string(),
        towns: data.towns().iter().map(|t| t.town().to_string()).collect(),
        facilities: data
            .facilities()
            .iter()
            .map(FacilityOption::from_record)
            .collect(),
    };
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Resolve a town name and lot number.
///
/// Both inputs are required here; a missing one is a 400 with an
/// error-marked result. Resolution failures are still 200.
async fn resolve_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<ResolveRequest>,
) -> Result<Response, AppError> {
    let missing = if req.town.trim().is_empty() {
        Some(InputField::Town)
    } else if req.number.trim().is_empty() {
        Some(InputField::HouseNumber)
    } else {
        None
    };

    if let Some(field) = missing {
        let result = LookupResult::failed(&ResolveError::EmptyInput(field));
        return render_lookup(&headers, StatusCode::BAD_REQUEST, &result);
    }

    let result = state.resolver.resolve_travel_point(&req.town, &req.number);
    render_lookup(&headers, StatusCode::OK, &result)
}

/// Resolve a facility by name.
async fn resolve_facility(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<FacilityRequest>,
) -> Result<Response, AppError> {
    if req.name.trim().is_empty() {
        let result = LookupResult::failed(&ResolveError::EmptyInput(InputField::Facility));
        return render_lookup(&headers, StatusCode::BAD_REQUEST, &result);
    }

    let result = state.resolver.resolve_facility(&req.name);
    render_lookup(&headers, StatusCode::OK, &result)
}

/// List facilities in table order.
async fn list_facilities(State(state): State<AppState>) -> Json<FacilityListResponse> {
    let facilities = state
        .resolver
        .data()
        .facilities()
        .iter()
        .map(FacilitySummary::from)
        .collect();
    Json(FacilityListResponse { facilities })
}

/// List town keys in table order.
async fn list_towns(State(state): State<AppState>) -> Json<TownListResponse> {
    let data = state.resolver.data();
    Json(TownListResponse {
        municipality: data.municipality().to_string(),
        towns: data.towns().iter().map(|t| t.town().to_string()).collect(),
    })
}

/// Return a lookup result as an HTML fragment or JSON, based on the Accept header.
fn render_lookup(
    headers: &HeaderMap,
    status: StatusCode,
    result: &LookupResult,
) -> Result<Response, AppError> {
    if result.is_error() {
        warn!(point = %result.point, "lookup failed");
    }

    if accepts_html(headers) {
        let template = LookupResultTemplate {
            result: LookupView::from_result(result),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;
        Ok((status, Html(html)).into_response())
    } else {
        Ok((status, Json(LookupResponse::from(result))).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
