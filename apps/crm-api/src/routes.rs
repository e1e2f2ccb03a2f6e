use axum::{
	Json, Router,
	extract::{Query, State, rejection::QueryRejection},
	http::{HeaderMap, StatusCode},
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;
use uuid::Uuid;

use crate::state::AppState;
use crm_service::{Error, ErrorKind, GlobalSearchRequest, GlobalSearchResponse, Identity};

pub const HEADER_TENANT_ID: &str = "X-CRM-Tenant-Id";
pub const HEADER_ROLES: &str = "X-CRM-Roles";

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/search", get(global_search))
		.with_state(state)
}

/// Caller identity taken from trusted headers set by the gateway in front of this service.
#[derive(Debug)]
struct HeaderIdentity {
	tenant_id: Uuid,
	roles: Vec<String>,
}
impl HeaderIdentity {
	fn from_headers(headers: &HeaderMap) -> Result<Self, ApiError> {
		let tenant_id = headers
			.get(HEADER_TENANT_ID)
			.and_then(|value| value.to_str().ok())
			.map(str::trim)
			.filter(|value| !value.is_empty())
			.ok_or_else(|| {
				ApiError::unauthorized(format!("{HEADER_TENANT_ID} header is required."))
			})?;
		let tenant_id = Uuid::parse_str(tenant_id).map_err(|_| {
			ApiError::unauthorized(format!("{HEADER_TENANT_ID} must be a UUID."))
		})?;
		let roles = headers
			.get(HEADER_ROLES)
			.and_then(|value| value.to_str().ok())
			.map(|raw| {
				raw.split(',')
					.map(str::trim)
					.filter(|role| !role.is_empty())
					.map(str::to_string)
					.collect()
			})
			.unwrap_or_default();

		Ok(Self { tenant_id, roles })
	}
}
impl Identity for HeaderIdentity {
	fn tenant_id(&self) -> Uuid {
		self.tenant_id
	}

	fn has_role(&self, role: &str) -> bool {
		self.roles.iter().any(|candidate| candidate == role)
	}
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn global_search(
	State(state): State<AppState>,
	headers: HeaderMap,
	query: Result<Query<GlobalSearchRequest>, QueryRejection>,
) -> Result<Json<GlobalSearchResponse>, ApiError> {
	let identity = HeaderIdentity::from_headers(&headers)?;
	let Query(req) = query.map_err(|err| {
		ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", err.body_text())
	})?;
	let response = state.service.global_search_as(&identity, req).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}

	fn unauthorized(message: impl Into<String>) -> Self {
		Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err.kind() {
			ErrorKind::Validation =>
				ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", err.to_string()),
			ErrorKind::Internal => {
				tracing::error!(error = %err, "Global search failed.");

				ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", err.to_string())
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
