use std::sync::Arc;

use crm_service::CrmService;
use crm_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<CrmService>,
}
impl AppState {
	pub async fn new(config: crm_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let service = CrmService::new(config, db)?;

		Ok(Self::with_service(service))
	}

	pub fn with_service(service: CrmService) -> Self {
		Self { service: Arc::new(service) }
	}
}
