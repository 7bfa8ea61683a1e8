use axum::{
	Json, Router,
	extract::{Path, Query, State, rejection::QueryRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use estate_domain::ListingView;
use estate_service::{Error as ServiceError, SearchRequest, SearchResponse, SeedResponse};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	let mut router = Router::new()
		.route("/health", get(health))
		.route("/api/properties", get(search))
		.route("/api/properties/{id}", get(get_by_id));

	if state.service.seed_source.is_some() {
		router = router.route("/api/dev/seed", post(seed));
	}

	router.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	query: Result<Query<SearchRequest>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
	let Query(payload) = query.map_err(|err| {
		json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", err.body_text(), None)
	})?;
	let cancel = state.shutdown.child_token();
	let _guard = cancel.clone().drop_guard();
	let response = state.service.search(payload, &cancel).await?;
	Ok(Json(response))
}

async fn get_by_id(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<ListingView>, ApiError> {
	let cancel = state.shutdown.child_token();
	let _guard = cancel.clone().drop_guard();
	let response = state.service.get(&id, &cancel).await?;
	Ok(Json(response))
}

async fn seed(State(state): State<AppState>) -> Result<Json<SeedResponse>, ApiError> {
	let cancel = state.shutdown.child_token();
	let _guard = cancel.clone().drop_guard();
	let response = state.service.seed(&cancel).await?;
	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::Validation { message, fields } => json_error(
				StatusCode::BAD_REQUEST,
				"INVALID_REQUEST",
				message,
				(!fields.is_empty()).then_some(fields),
			),
			ServiceError::NotFound { message } =>
				json_error(StatusCode::NOT_FOUND, "NOT_FOUND", message, None),
			ServiceError::StoreUnavailable { message } =>
				json_error(StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE", message, None),
			ServiceError::Cancelled => json_error(
				StatusCode::SERVICE_UNAVAILABLE,
				"CANCELLED",
				"Request was cancelled before it completed.",
				None,
			),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };
		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<Vec<String>>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}
