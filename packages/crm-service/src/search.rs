pub mod query;
pub mod scope;

mod matcher;
mod ranking;
mod relations;
mod unify;

use std::{future::Future, time::Duration};

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, macros::format_description};
use uuid::Uuid;

use crate::{
	ADMIN_ROLE, CrmService, Error, Identity, Result,
	search::{
		matcher::{Candidate, MatchContext, Row},
		ranking::Ranker,
		relations::{Corpus, LeadGraph},
	},
};
use crm_domain::{entity::EntityType, headline::HeadlineOptions};
use crm_storage::models::Lead;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalSearchRequest {
	pub query: String,
	/// Comma-separated entity types; omitted or blank means every visible type.
	#[serde(default)]
	pub types: Option<String>,
	#[serde(default)]
	pub limit: Option<i64>,
	#[serde(default)]
	pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
	pub id: Uuid,
	#[serde(rename = "type")]
	pub entity_type: EntityType,
	pub title: String,
	pub subtitle: Option<String>,
	pub preview: Option<String>,
	pub status: Option<String>,
	pub link: String,
	pub score: f32,
	pub matched_field: String,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalSearchResponse {
	pub items: Vec<SearchItem>,
	pub total: i64,
}

impl CrmService {
	/// Searches every entity type visible to the caller and returns one merged, ranked page.
	///
	/// Queries shorter than `search.min_query_chars` return an empty page without touching
	/// storage. Any storage failure fails the whole call.
	pub async fn global_search(
		&self,
		tenant_id: Uuid,
		req: GlobalSearchRequest,
		is_admin: bool,
	) -> Result<GlobalSearchResponse> {
		let cfg = &self.cfg.search;
		let raw = req.query.trim();
		let chars = raw.chars().count();

		if chars < cfg.min_query_chars as usize {
			return Ok(GlobalSearchResponse::default());
		}
		if chars > cfg.max_query_chars as usize {
			return Err(Error::Validation {
				message: format!("query must be at most {} characters.", cfg.max_query_chars),
			});
		}

		let types = scope::resolve(req.types.as_deref(), is_admin)?;

		if types.is_empty() {
			return Ok(GlobalSearchResponse::default());
		}

		let normalized = query::normalize(raw, &self.tokenizers, cfg.prefix_min_chars as usize);
		let timeout_ms = cfg.query_timeout_ms;
		let corpus = match tokio::time::timeout(
			Duration::from_millis(timeout_ms),
			self.load_corpus(tenant_id, &types),
		)
		.await
		{
			Ok(corpus) => corpus?,
			Err(_) => {
				tracing::warn!(tenant_id = %tenant_id, timeout_ms, "Global search timed out.");

				return Err(Error::Internal {
					operation: "global_search".to_string(),
					source: crm_storage::Error::Timeout { elapsed_ms: timeout_ms },
				});
			},
		};
		let ranker = Ranker::new(&normalized, &self.tokenizers, &cfg.weights);
		let graph = LeadGraph::resolve(&ranker, &corpus, &cfg.damping);
		let ctx =
			MatchContext { ranker: &ranker, corpus: &corpus, graph: &graph, damping: &cfg.damping };
		let mut candidates = Vec::new();

		for kind in &types {
			candidates.extend(matcher::run(*kind, &ctx));
		}

		let limit = resolve_limit(req.limit, cfg.default_limit, cfg.max_limit);
		let offset = req.offset.map_or(0, |offset| usize::try_from(offset).unwrap_or(0));
		let page = unify::unify(candidates, offset, limit);
		let opts = HeadlineOptions {
			min_words: cfg.snippet.min_words as usize,
			max_words: cfg.snippet.max_words as usize,
			start_sel: &cfg.snippet.start_sel,
			stop_sel: &cfg.snippet.stop_sel,
		};
		let items: Vec<SearchItem> =
			page.items.into_iter().map(|candidate| to_item(candidate, &ranker, &opts)).collect();

		tracing::debug!(
			tenant_id = %tenant_id,
			types = ?types,
			matched_leads = graph.matched_leads(),
			total = page.total,
			returned = items.len(),
			"Global search completed."
		);

		Ok(GlobalSearchResponse { items, total: page.total })
	}

	/// [`CrmService::global_search`] for an authenticated caller; admins see admin-only types.
	pub async fn global_search_as<I>(
		&self,
		identity: &I,
		req: GlobalSearchRequest,
	) -> Result<GlobalSearchResponse>
	where
		I: Identity + ?Sized,
	{
		self.global_search(identity.tenant_id(), req, identity.has_role(ADMIN_ROLE)).await
	}

	/// Fetches the rows the requested types need, concurrently. The lead graph is only loaded
	/// when a lead-related type is requested.
	async fn load_corpus(&self, tenant_id: Uuid, types: &[EntityType]) -> Result<Corpus> {
		let store = self.store.as_ref();
		let lead_graph = types.iter().any(|kind| kind.is_lead_related());
		let wants = |kind: EntityType| types.contains(&kind);
		let (
			tenant_lead_ids,
			lead_notes,
			lead_services,
			quotes,
			appointments,
			partner_leads,
			partners,
			catalog_products,
			service_types,
		) = tokio::try_join!(
			fetch("tenant_lead_ids", lead_graph, || store.tenant_lead_ids(tenant_id)),
			fetch("lead_notes", lead_graph, || store.lead_notes(tenant_id)),
			fetch("lead_services", lead_graph, || store.lead_services(tenant_id)),
			fetch("quotes", lead_graph, || store.quotes(tenant_id)),
			fetch("appointments", lead_graph, || store.appointments(tenant_id)),
			fetch("partner_leads", lead_graph, || store.partner_leads(tenant_id)),
			fetch("partners", wants(EntityType::Partner), || store.partners(tenant_id)),
			fetch("catalog_products", wants(EntityType::CatalogProduct), || {
				store.catalog_products(tenant_id)
			}),
			fetch("service_types", wants(EntityType::ServiceType), || {
				store.service_types(tenant_id)
			}),
		)?;
		let mut corpus = Corpus {
			leads: Vec::new(),
			lead_notes,
			lead_services,
			quotes,
			partners,
			partner_leads,
			appointments,
			catalog_products,
			service_types,
		};

		if lead_graph {
			let hub = relations::hub_lead_ids(&tenant_lead_ids, &corpus);

			corpus.leads = fetch("leads", true, || store.leads(&hub)).await?;
		}

		Ok(corpus)
	}
}

async fn fetch<T, F, Fut>(operation: &'static str, enabled: bool, fetch: F) -> Result<Vec<T>>
where
	F: FnOnce() -> Fut,
	Fut: Future<Output = crm_storage::Result<Vec<T>>>,
{
	if !enabled {
		return Ok(Vec::new());
	}

	fetch().await.map_err(|source| {
		tracing::warn!(error = %source, operation, "Global search fetch failed.");

		Error::Internal { operation: format!("global_search.{operation}"), source }
	})
}

/// Non-positive or missing limits fall back to the default; larger ones are capped.
fn resolve_limit(limit: Option<i64>, default_limit: u32, max_limit: u32) -> usize {
	let limit = match limit {
		Some(limit) if limit > 0 => u32::try_from(limit).unwrap_or(u32::MAX).min(max_limit),
		_ => default_limit,
	};

	limit as usize
}

fn to_item(
	candidate: Candidate<'_>,
	ranker: &Ranker<'_>,
	opts: &HeadlineOptions<'_>,
) -> SearchItem {
	let row = candidate.row;
	let entity_type = row.entity_type();
	let id = row.id();
	let (title, subtitle, status) = describe(row);

	SearchItem {
		id,
		entity_type,
		title,
		subtitle,
		preview: unify::render_preview(candidate.preview, ranker, opts),
		status,
		link: format!("{}/{id}", entity_type.link_prefix()),
		score: candidate.score,
		matched_field: candidate.matched_field.to_string(),
		created_at: row.created_at(),
	}
}

/// Title, subtitle and status label of a row.
fn describe(row: Row<'_>) -> (String, Option<String>, Option<String>) {
	match row {
		Row::Lead(lead) => {
			let title = lead_name(lead)
				.or_else(|| non_blank(lead.consumer_email.as_deref()))
				.or_else(|| non_blank(lead.consumer_phone.as_deref()))
				.unwrap_or_else(|| "Unnamed lead".to_string());
			let subtitle = non_blank(lead.address_city.as_deref())
				.or_else(|| non_blank(lead.consumer_email.as_deref()));

			(title, subtitle, None)
		},
		Row::Quote { quote, lead } => {
			let amount = format_amount(quote.total_cents);
			let subtitle = join_parts([lead.and_then(lead_name), Some(amount)]);

			(quote.quote_number.clone(), subtitle, Some(quote.status.clone()))
		},
		Row::Partner(partner) => {
			let subtitle = non_blank(partner.contact_name.as_deref())
				.or_else(|| non_blank(partner.city.as_deref()));

			(partner.business_name.clone(), subtitle, None)
		},
		Row::Appointment(appointment) => {
			let start = appointment
				.start_time
				.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
				.ok();
			let subtitle = join_parts([start, non_blank(appointment.location.as_deref())]);

			(appointment.title.clone(), subtitle, Some(appointment.status.clone()))
		},
		Row::CatalogProduct(product) =>
			(product.title.clone(), non_blank(product.reference.as_deref()), None),
		Row::ServiceType(service_type) => {
			let status = if service_type.is_active { "active" } else { "inactive" };

			(service_type.name.clone(), Some(service_type.slug.clone()), Some(status.to_string()))
		},
	}
}

fn lead_name(lead: &Lead) -> Option<String> {
	let parts = [lead.consumer_first_name.trim(), lead.consumer_last_name.trim()];
	let name = parts.iter().filter(|part| !part.is_empty()).copied().collect::<Vec<_>>().join(" ");

	if name.is_empty() { None } else { Some(name) }
}

fn non_blank(value: Option<&str>) -> Option<String> {
	value.map(str::trim).filter(|value| !value.is_empty()).map(str::to_string)
}

fn join_parts<const N: usize>(parts: [Option<String>; N]) -> Option<String> {
	let joined = parts.into_iter().flatten().collect::<Vec<_>>().join(" · ");

	if joined.is_empty() { None } else { Some(joined) }
}

/// Cents as a plain decimal amount, e.g. `-1234` as `-12.34`.
fn format_amount(cents: i64) -> String {
	let sign = if cents < 0 { "-" } else { "" };
	let abs = cents.unsigned_abs();

	format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
