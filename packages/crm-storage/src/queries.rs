//! Read-only, tenant-scoped row fetches backing global search.

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
	Result,
	models::{
		Appointment, CatalogProduct, Lead, LeadNote, LeadService, Partner, PartnerLead, Quote,
		ServiceType,
	},
};

/// Ids of live leads owned by the tenant directly.
pub async fn tenant_lead_ids<'e, E>(executor: E, tenant_id: Uuid) -> Result<Vec<Uuid>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_scalar::<_, Uuid>(
		"\
SELECT id
FROM leads
WHERE organization_id = $1 AND deleted_at IS NULL",
	)
	.bind(tenant_id)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

/// Live leads by id. Callers pass ids that were already bounded to one tenant.
pub async fn leads_by_ids<'e, E>(executor: E, lead_ids: &[Uuid]) -> Result<Vec<Lead>>
where
	E: PgExecutor<'e>,
{
	if lead_ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows = sqlx::query_as::<_, Lead>(
		"\
SELECT
	id,
	consumer_first_name,
	consumer_last_name,
	consumer_email,
	consumer_phone,
	address_city,
	created_at
FROM leads
WHERE id = ANY($1::uuid[]) AND deleted_at IS NULL",
	)
	.bind(lead_ids)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn lead_notes<'e, E>(executor: E, tenant_id: Uuid) -> Result<Vec<LeadNote>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, LeadNote>(
		"\
SELECT id, lead_id, body, created_at
FROM lead_notes
WHERE organization_id = $1",
	)
	.bind(tenant_id)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn lead_services<'e, E>(executor: E, tenant_id: Uuid) -> Result<Vec<LeadService>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, LeadService>(
		"\
SELECT id, lead_id, consumer_note
FROM lead_services
WHERE organization_id = $1",
	)
	.bind(tenant_id)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn quotes<'e, E>(executor: E, tenant_id: Uuid) -> Result<Vec<Quote>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, Quote>(
		"\
SELECT id, lead_id, quote_number, notes, total_cents, status, created_at
FROM quotes
WHERE organization_id = $1",
	)
	.bind(tenant_id)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn partners<'e, E>(executor: E, tenant_id: Uuid) -> Result<Vec<Partner>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, Partner>(
		"\
SELECT
	id,
	business_name,
	contact_name,
	contact_email,
	address_line,
	postal_code,
	city,
	created_at
FROM partners
WHERE organization_id = $1",
	)
	.bind(tenant_id)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn partner_leads<'e, E>(executor: E, tenant_id: Uuid) -> Result<Vec<PartnerLead>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, PartnerLead>(
		"\
SELECT partner_id, lead_id
FROM partner_leads
WHERE organization_id = $1",
	)
	.bind(tenant_id)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn appointments<'e, E>(executor: E, tenant_id: Uuid) -> Result<Vec<Appointment>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, Appointment>(
		"\
SELECT id, lead_id, title, description, location, start_time, status, created_at
FROM appointments
WHERE organization_id = $1",
	)
	.bind(tenant_id)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn catalog_products<'e, E>(executor: E, tenant_id: Uuid) -> Result<Vec<CatalogProduct>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, CatalogProduct>(
		"\
SELECT id, title, reference, description, created_at
FROM catalog_products
WHERE organization_id = $1",
	)
	.bind(tenant_id)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn service_types<'e, E>(executor: E, tenant_id: Uuid) -> Result<Vec<ServiceType>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, ServiceType>(
		"\
SELECT id, name, slug, description, is_active, created_at
FROM service_types
WHERE organization_id = $1",
	)
	.bind(tenant_id)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}
