use std::sync::Arc;

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::Value;
use time::OffsetDateTime;
use tower::util::ServiceExt;
use uuid::Uuid;

use crm_api::{routes, state::AppState};
use crm_config::{Config, Postgres, Search, Service, Storage};
use crm_service::{BoxFuture, CrmService, SearchStore};
use crm_storage::{
	Result,
	models::{
		Appointment, CatalogProduct, Lead, LeadNote, LeadService, Partner, PartnerLead, Quote,
		ServiceType,
	},
};

/// One tenant with lead "Jan Bakker" and the admin-only service type "Bakkerij".
struct FixtureStore {
	tenant_id: Uuid,
	lead: Lead,
	service_type: ServiceType,
	broken: bool,
}
impl FixtureStore {
	fn new(tenant_id: Uuid) -> Self {
		Self {
			tenant_id,
			lead: Lead {
				id: Uuid::new_v4(),
				consumer_first_name: "Jan".to_string(),
				consumer_last_name: "Bakker".to_string(),
				consumer_email: Some("jan@bakker.nl".to_string()),
				consumer_phone: None,
				address_city: Some("Utrecht".to_string()),
				created_at: OffsetDateTime::UNIX_EPOCH,
			},
			service_type: ServiceType {
				id: Uuid::new_v4(),
				name: "Bakkerij".to_string(),
				slug: "bakkerij".to_string(),
				description: None,
				is_active: true,
				created_at: OffsetDateTime::UNIX_EPOCH,
			},
			broken: false,
		}
	}

	fn owned<T>(&self, tenant_id: Uuid, rows: Vec<T>) -> Result<Vec<T>> {
		if self.broken {
			return Err(crm_storage::Error::Timeout { elapsed_ms: 0 });
		}

		Ok(if tenant_id == self.tenant_id { rows } else { Vec::new() })
	}
}
impl SearchStore for FixtureStore {
	fn tenant_lead_ids<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<Uuid>>> {
		let result = self.owned(tenant_id, vec![self.lead.id]);

		Box::pin(async move { result })
	}

	fn leads<'a>(&'a self, lead_ids: &'a [Uuid]) -> BoxFuture<'a, Result<Vec<Lead>>> {
		let rows =
			if lead_ids.contains(&self.lead.id) { vec![self.lead.clone()] } else { Vec::new() };

		Box::pin(async move { Ok(rows) })
	}

	fn lead_notes<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<LeadNote>>> {
		let result = self.owned(tenant_id, Vec::new());

		Box::pin(async move { result })
	}

	fn lead_services<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<LeadService>>> {
		let result = self.owned(tenant_id, Vec::new());

		Box::pin(async move { result })
	}

	fn quotes<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<Quote>>> {
		let result = self.owned(tenant_id, Vec::new());

		Box::pin(async move { result })
	}

	fn partners<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<Partner>>> {
		let result = self.owned(tenant_id, Vec::new());

		Box::pin(async move { result })
	}

	fn partner_leads<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<PartnerLead>>> {
		let result = self.owned(tenant_id, Vec::new());

		Box::pin(async move { result })
	}

	fn appointments<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<Appointment>>> {
		let result = self.owned(tenant_id, Vec::new());

		Box::pin(async move { result })
	}

	fn catalog_products<'a>(
		&'a self,
		tenant_id: Uuid,
	) -> BoxFuture<'a, Result<Vec<CatalogProduct>>> {
		let result = self.owned(tenant_id, Vec::new());

		Box::pin(async move { result })
	}

	fn service_types<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<ServiceType>>> {
		let result = self.owned(tenant_id, vec![self.service_type.clone()]);

		Box::pin(async move { result })
	}
}

fn test_config() -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		storage: Storage {
			postgres: Postgres { dsn: "postgres://unused".to_string(), pool_max_conns: 1 },
		},
		search: Search::default(),
	}
}

fn app(store: FixtureStore) -> Router {
	let service =
		CrmService::with_store(test_config(), Arc::new(store)).expect("Failed to build service.");

	routes::router(AppState::with_service(service))
}

async fn get(app: Router, uri: &str, headers: &[(&str, &str)]) -> (StatusCode, Value) {
	let mut builder = Request::builder().uri(uri);

	for (name, value) in headers {
		builder = builder.header(*name, *value);
	}

	let response = app
		.oneshot(builder.body(Body::empty()).expect("Failed to build request."))
		.await
		.expect("Failed to call router.");
	let status = response.status();
	let body = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json = if body.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&body).expect("Failed to parse response.")
	};

	(status, json)
}

#[tokio::test]
async fn health_ok() {
	let (status, _) = get(app(FixtureStore::new(Uuid::new_v4())), "/health", &[]).await;

	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn search_returns_camel_case_items() {
	let tenant_id = Uuid::new_v4();
	let store = FixtureStore::new(tenant_id);
	let lead_id = store.lead.id;
	let tenant = tenant_id.to_string();
	let (status, json) = get(app(store), "/v1/search?query=bakker", &[(
		routes::HEADER_TENANT_ID,
		tenant.as_str(),
	)])
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["total"], 1);
	assert_eq!(json["items"][0]["id"], lead_id.to_string());
	assert_eq!(json["items"][0]["type"], "lead");
	assert_eq!(json["items"][0]["matchedField"], "name");
	assert_eq!(json["items"][0]["link"], format!("/leads/{lead_id}"));
	assert_eq!(json["items"][0]["createdAt"], "1970-01-01T00:00:00Z");
}

#[tokio::test]
async fn admin_role_header_unlocks_service_types() {
	let tenant_id = Uuid::new_v4();
	let tenant = tenant_id.to_string();
	let uri = "/v1/search?query=bakkerij&types=service_type";
	let headers = [(routes::HEADER_TENANT_ID, tenant.as_str())];
	let (_, plain) = get(app(FixtureStore::new(tenant_id)), uri, &headers).await;

	assert_eq!(plain["total"], 0);

	let (status, admin) = get(app(FixtureStore::new(tenant_id)), uri, &[
		(routes::HEADER_TENANT_ID, tenant.as_str()),
		(routes::HEADER_ROLES, "sales, admin"),
	])
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(admin["total"], 1);
	assert_eq!(admin["items"][0]["type"], "service_type");
	assert_eq!(admin["items"][0]["status"], "active");
}

#[tokio::test]
async fn missing_or_malformed_tenant_is_unauthorized() {
	let uri = "/v1/search?query=bakker";
	let (status, json) = get(app(FixtureStore::new(Uuid::new_v4())), uri, &[]).await;

	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(json["error_code"], "UNAUTHORIZED");

	let (status, _) = get(app(FixtureStore::new(Uuid::new_v4())), uri, &[(
		routes::HEADER_TENANT_ID,
		"not-a-uuid",
	)])
	.await;

	assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_type_is_a_bad_request() {
	let tenant = Uuid::new_v4().to_string();
	let (status, json) = get(
		app(FixtureStore::new(Uuid::new_v4())),
		"/v1/search?query=bakker&types=lead,bogus_type",
		&[(routes::HEADER_TENANT_ID, tenant.as_str())],
	)
	.await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error_code"], "VALIDATION_FAILED");
	assert!(json["message"].as_str().is_some_and(|message| message.contains("bogus_type")));
}

#[tokio::test]
async fn missing_query_parameter_is_a_bad_request() {
	let tenant = Uuid::new_v4().to_string();
	let (status, json) = get(app(FixtureStore::new(Uuid::new_v4())), "/v1/search?limit=5", &[(
		routes::HEADER_TENANT_ID,
		tenant.as_str(),
	)])
	.await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error_code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn storage_failure_is_an_internal_error() {
	let tenant_id = Uuid::new_v4();
	let tenant = tenant_id.to_string();
	let mut store = FixtureStore::new(tenant_id);

	store.broken = true;

	let headers = [(routes::HEADER_TENANT_ID, tenant.as_str())];
	let (status, json) = get(app(store), "/v1/search?query=bakker", &headers).await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(json["error_code"], "INTERNAL");
	assert!(json.get("items").is_none());
}
