use std::fmt;

use serde::{Deserialize, Serialize};

/// Searchable record kinds. The order of `ALL` is the order used when no type filter is given.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
	Lead,
	Quote,
	Partner,
	Appointment,
	CatalogProduct,
	ServiceType,
}
impl EntityType {
	pub const ALL: [Self; 6] = [
		Self::Lead,
		Self::Quote,
		Self::Partner,
		Self::Appointment,
		Self::CatalogProduct,
		Self::ServiceType,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Lead => "lead",
			Self::Quote => "quote",
			Self::Partner => "partner",
			Self::Appointment => "appointment",
			Self::CatalogProduct => "catalog_product",
			Self::ServiceType => "service_type",
		}
	}

	/// Case-sensitive; only the snake_case wire names are accepted.
	pub fn parse(raw: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.as_str() == raw)
	}

	/// Internal taxonomy that only administrators may search.
	pub fn is_admin_only(self) -> bool {
		matches!(self, Self::ServiceType)
	}

	/// Whether rows of this type are reachable from a lead and can inherit its match.
	pub fn is_lead_related(self) -> bool {
		matches!(self, Self::Lead | Self::Quote | Self::Partner | Self::Appointment)
	}

	pub fn link_prefix(self) -> &'static str {
		match self {
			Self::Lead => "/leads",
			Self::Quote => "/quotes",
			Self::Partner => "/partners",
			Self::Appointment => "/appointments",
			Self::CatalogProduct => "/catalog/products",
			Self::ServiceType => "/admin/service-types",
		}
	}
}
impl fmt::Display for EntityType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
