use uuid::Uuid;

use crate::BoxFuture;
use crm_storage::{
	Result,
	db::Db,
	models::{
		Appointment, CatalogProduct, Lead, LeadNote, LeadService, Partner, PartnerLead, Quote,
		ServiceType,
	},
	queries,
};

/// Tenant-scoped, read-only row access consumed by global search.
pub trait SearchStore
where
	Self: Send + Sync,
{
	fn tenant_lead_ids<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<Uuid>>>;

	/// Live leads by id. Ids come from one tenant's relation rows.
	fn leads<'a>(&'a self, lead_ids: &'a [Uuid]) -> BoxFuture<'a, Result<Vec<Lead>>>;

	fn lead_notes<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<LeadNote>>>;

	fn lead_services<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<LeadService>>>;

	fn quotes<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<Quote>>>;

	fn partners<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<Partner>>>;

	fn partner_leads<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<PartnerLead>>>;

	fn appointments<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<Appointment>>>;

	fn catalog_products<'a>(
		&'a self,
		tenant_id: Uuid,
	) -> BoxFuture<'a, Result<Vec<CatalogProduct>>>;

	fn service_types<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<ServiceType>>>;
}

/// Postgres-backed store.
pub struct PgSearchStore {
	db: Db,
}
impl PgSearchStore {
	pub fn new(db: Db) -> Self {
		Self { db }
	}
}
impl SearchStore for PgSearchStore {
	fn tenant_lead_ids<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<Uuid>>> {
		Box::pin(queries::tenant_lead_ids(&self.db.pool, tenant_id))
	}

	fn leads<'a>(&'a self, lead_ids: &'a [Uuid]) -> BoxFuture<'a, Result<Vec<Lead>>> {
		Box::pin(queries::leads_by_ids(&self.db.pool, lead_ids))
	}

	fn lead_notes<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<LeadNote>>> {
		Box::pin(queries::lead_notes(&self.db.pool, tenant_id))
	}

	fn lead_services<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<LeadService>>> {
		Box::pin(queries::lead_services(&self.db.pool, tenant_id))
	}

	fn quotes<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<Quote>>> {
		Box::pin(queries::quotes(&self.db.pool, tenant_id))
	}

	fn partners<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<Partner>>> {
		Box::pin(queries::partners(&self.db.pool, tenant_id))
	}

	fn partner_leads<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<PartnerLead>>> {
		Box::pin(queries::partner_leads(&self.db.pool, tenant_id))
	}

	fn appointments<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<Appointment>>> {
		Box::pin(queries::appointments(&self.db.pool, tenant_id))
	}

	fn catalog_products<'a>(
		&'a self,
		tenant_id: Uuid,
	) -> BoxFuture<'a, Result<Vec<CatalogProduct>>> {
		Box::pin(queries::catalog_products(&self.db.pool, tenant_id))
	}

	fn service_types<'a>(&'a self, tenant_id: Uuid) -> BoxFuture<'a, Result<Vec<ServiceType>>> {
		Box::pin(queries::service_types(&self.db.pool, tenant_id))
	}
}
