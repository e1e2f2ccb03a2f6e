pub mod search;
pub mod time_serde;

mod error;
mod store;

pub use error::{Error, ErrorKind, Result};
pub use search::{GlobalSearchRequest, GlobalSearchResponse, SearchItem};
pub use store::{PgSearchStore, SearchStore};

use std::{future::Future, pin::Pin, sync::Arc};

use uuid::Uuid;

use crate::search::query::Tokenizers;
use crm_config::Config;
use crm_domain::text::Language;
use crm_storage::db::Db;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Role that unlocks admin-only entity types.
pub const ADMIN_ROLE: &str = "admin";

/// The authenticated caller, as resolved by whatever sits in front of the service.
pub trait Identity {
	fn tenant_id(&self) -> Uuid;

	fn has_role(&self, role: &str) -> bool;
}

pub struct CrmService {
	pub cfg: Config,
	pub store: Arc<dyn SearchStore>,
	tokenizers: Tokenizers,
}
impl CrmService {
	pub fn new(cfg: Config, db: Db) -> Result<Self> {
		Self::with_store(cfg, Arc::new(PgSearchStore::new(db)))
	}

	pub fn with_store(cfg: Config, store: Arc<dyn SearchStore>) -> Result<Self> {
		let Some(language) = Language::parse(&cfg.search.language) else {
			return Err(Error::Validation {
				message: format!("Unsupported search language '{}'.", cfg.search.language),
			});
		};

		Ok(Self { cfg, store, tokenizers: Tokenizers::new(language) })
	}
}
