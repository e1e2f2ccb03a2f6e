use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Lead {
	pub id: Uuid,
	pub consumer_first_name: String,
	pub consumer_last_name: String,
	pub consumer_email: Option<String>,
	pub consumer_phone: Option<String>,
	pub address_city: Option<String>,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeadNote {
	pub id: Uuid,
	pub lead_id: Uuid,
	pub body: String,
	pub created_at: OffsetDateTime,
}

/// Every service row links its lead into the hub set; only the note is ranked.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeadService {
	pub id: Uuid,
	pub lead_id: Uuid,
	pub consumer_note: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Quote {
	pub id: Uuid,
	pub lead_id: Uuid,
	pub quote_number: String,
	pub notes: Option<String>,
	pub total_cents: i64,
	pub status: String,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Partner {
	pub id: Uuid,
	pub business_name: String,
	pub contact_name: Option<String>,
	pub contact_email: Option<String>,
	pub address_line: Option<String>,
	pub postal_code: Option<String>,
	pub city: Option<String>,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct PartnerLead {
	pub partner_id: Uuid,
	pub lead_id: Uuid,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Appointment {
	pub id: Uuid,
	pub lead_id: Option<Uuid>,
	pub title: String,
	pub description: Option<String>,
	pub location: Option<String>,
	pub start_time: OffsetDateTime,
	pub status: String,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CatalogProduct {
	pub id: Uuid,
	pub title: String,
	pub reference: Option<String>,
	pub description: Option<String>,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ServiceType {
	pub id: Uuid,
	pub name: String,
	pub slug: String,
	pub description: Option<String>,
	pub is_active: bool,
	pub created_at: OffsetDateTime,
}
