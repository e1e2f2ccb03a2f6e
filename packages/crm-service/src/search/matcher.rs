//! One matcher per entity type, all producing the same candidate shape for the unifier.

use time::OffsetDateTime;
use uuid::Uuid;

use crate::search::{
	ranking::{FieldClass, LadderHit, Ranker},
	relations::{Corpus, LeadGraph},
};
use crm_config::SearchDamping;
use crm_domain::entity::EntityType;
use crm_storage::models::{Appointment, CatalogProduct, Lead, Partner, Quote, ServiceType};

/// Text a preview is cut from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewSource<'c> {
	/// Free text that produced the hit; rendered with highlighted match terms.
	Highlight(&'c str),
	/// Fallback identifying field; rendered as a plain excerpt.
	Plain(&'c str),
	None,
}

#[derive(Clone, Copy, Debug)]
pub enum Row<'c> {
	Lead(&'c Lead),
	Quote { quote: &'c Quote, lead: Option<&'c Lead> },
	Partner(&'c Partner),
	Appointment(&'c Appointment),
	CatalogProduct(&'c CatalogProduct),
	ServiceType(&'c ServiceType),
}
impl Row<'_> {
	pub fn entity_type(&self) -> EntityType {
		match self {
			Self::Lead(_) => EntityType::Lead,
			Self::Quote { .. } => EntityType::Quote,
			Self::Partner(_) => EntityType::Partner,
			Self::Appointment(_) => EntityType::Appointment,
			Self::CatalogProduct(_) => EntityType::CatalogProduct,
			Self::ServiceType(_) => EntityType::ServiceType,
		}
	}

	pub fn id(&self) -> Uuid {
		match self {
			Self::Lead(lead) => lead.id,
			Self::Quote { quote, .. } => quote.id,
			Self::Partner(partner) => partner.id,
			Self::Appointment(appointment) => appointment.id,
			Self::CatalogProduct(product) => product.id,
			Self::ServiceType(service_type) => service_type.id,
		}
	}

	pub fn created_at(&self) -> OffsetDateTime {
		match self {
			Self::Lead(lead) => lead.created_at,
			Self::Quote { quote, .. } => quote.created_at,
			Self::Partner(partner) => partner.created_at,
			Self::Appointment(appointment) => appointment.created_at,
			Self::CatalogProduct(product) => product.created_at,
			Self::ServiceType(service_type) => service_type.created_at,
		}
	}
}

#[derive(Clone, Copy, Debug)]
pub struct Candidate<'c> {
	pub row: Row<'c>,
	pub score: f32,
	pub matched_field: &'static str,
	pub preview: PreviewSource<'c>,
}

pub struct MatchContext<'c> {
	pub ranker: &'c Ranker<'c>,
	pub corpus: &'c Corpus,
	pub graph: &'c LeadGraph<'c>,
	pub damping: &'c SearchDamping,
}

/// Candidates of one entity type: rows with a direct hit or a matching related lead.
pub fn run<'c>(kind: EntityType, ctx: &MatchContext<'c>) -> Vec<Candidate<'c>> {
	match kind {
		EntityType::Lead => leads(ctx),
		EntityType::Quote => quotes(ctx),
		EntityType::Partner => partners(ctx),
		EntityType::Appointment => appointments(ctx),
		EntityType::CatalogProduct => catalog_products(ctx),
		EntityType::ServiceType => service_types(ctx),
	}
}

fn leads<'c>(ctx: &MatchContext<'c>) -> Vec<Candidate<'c>> {
	let mut out = Vec::new();

	for lead in &ctx.corpus.leads {
		let Some(record) = ctx.graph.get(lead.id) else { continue };
		let matched_field = match (record.own_field, record.note) {
			(Some(field), _) => field,
			(None, Some(_)) => "notes",
			(None, None) => "service_note",
		};
		let preview = if let Some((note, _)) = record.note {
			PreviewSource::Highlight(&note.body)
		} else if let Some(note) = record.service_note.and_then(|(service, _)| {
			service.consumer_note.as_deref()
		}) {
			PreviewSource::Highlight(note)
		} else {
			first_plain(&[
				lead.consumer_email.as_deref(),
				lead.consumer_phone.as_deref(),
				lead.address_city.as_deref(),
			])
		};

		out.push(Candidate {
			row: Row::Lead(lead),
			score: record.lead_rank,
			matched_field,
			preview,
		});
	}

	out
}

fn quotes<'c>(ctx: &MatchContext<'c>) -> Vec<Candidate<'c>> {
	let mut out = Vec::new();

	for quote in &ctx.corpus.quotes {
		let own = ctx.ranker.rank(&[
			(Some(quote.quote_number.as_str()), FieldClass::A),
			(quote.notes.as_deref(), FieldClass::D),
		]);
		let propagated = ctx.graph.lead_rank(quote.lead_id);

		if own.score <= 0.0 && propagated <= 0.0 {
			continue;
		}

		let matched_field = if own.field_hit(0) {
			"quote_number"
		} else if own.field_hit(1) {
			"notes"
		} else {
			"lead"
		};
		let preview = match quote.notes.as_deref() {
			Some(notes) if own.field_hit(1) => PreviewSource::Highlight(notes),
			notes => first_plain(&[notes]),
		};

		out.push(Candidate {
			row: Row::Quote { quote, lead: ctx.graph.lead(quote.lead_id) },
			score: own.score + propagated * ctx.damping.quote,
			matched_field,
			preview,
		});
	}

	out
}

fn partners<'c>(ctx: &MatchContext<'c>) -> Vec<Candidate<'c>> {
	let mut out = Vec::new();

	for partner in &ctx.corpus.partners {
		let own = ctx.ranker.rank(&[
			(Some(partner.business_name.as_str()), FieldClass::A),
			(partner.contact_name.as_deref(), FieldClass::B),
			(partner.contact_email.as_deref(), FieldClass::B),
			(partner.address_line.as_deref(), FieldClass::C),
			(partner.postal_code.as_deref(), FieldClass::C),
			(partner.city.as_deref(), FieldClass::C),
		]);
		let propagated = ctx.graph.partner_rank(partner.id);

		if own.score <= 0.0 && propagated <= 0.0 {
			continue;
		}

		let matched_field = if own.field_hit(0) {
			"name"
		} else if own.field_hit(1) {
			"contact"
		} else if own.field_hit(2) {
			"email"
		} else if own.field_hit(3) || own.field_hit(4) || own.field_hit(5) {
			"address"
		} else {
			"lead"
		};

		out.push(Candidate {
			row: Row::Partner(partner),
			score: own.score + propagated * ctx.damping.partner,
			matched_field,
			preview: first_plain(&[
				partner.contact_name.as_deref(),
				partner.contact_email.as_deref(),
				partner.city.as_deref(),
			]),
		});
	}

	out
}

fn appointments<'c>(ctx: &MatchContext<'c>) -> Vec<Candidate<'c>> {
	let mut out = Vec::new();

	for appointment in &ctx.corpus.appointments {
		let own = ctx.ranker.rank(&[
			(Some(appointment.title.as_str()), FieldClass::A),
			(appointment.location.as_deref(), FieldClass::C),
			(appointment.description.as_deref(), FieldClass::D),
		]);
		let propagated = appointment.lead_id.map_or(0.0, |lead_id| ctx.graph.lead_rank(lead_id));

		if own.score <= 0.0 && propagated <= 0.0 {
			continue;
		}

		let matched_field = if own.field_hit(0) {
			"title"
		} else if own.field_hit(1) {
			"location"
		} else if own.field_hit(2) {
			"description"
		} else {
			"lead"
		};
		let preview = match appointment.description.as_deref() {
			Some(description) if own.field_hit(2) => PreviewSource::Highlight(description),
			description => first_plain(&[description, appointment.location.as_deref()]),
		};

		out.push(Candidate {
			row: Row::Appointment(appointment),
			score: own.score + propagated * ctx.damping.appointment,
			matched_field,
			preview,
		});
	}

	out
}

fn catalog_products<'c>(ctx: &MatchContext<'c>) -> Vec<Candidate<'c>> {
	let mut out = Vec::new();

	for product in &ctx.corpus.catalog_products {
		let Some((score, hit)) = ctx.ranker.ladder(
			&product.title,
			product.reference.as_deref(),
			product.description.as_deref(),
		) else {
			continue;
		};
		let matched_field = match hit {
			LadderHit::Primary => "title",
			LadderHit::Secondary => "reference",
			LadderHit::Description => "description",
		};

		out.push(Candidate {
			row: Row::CatalogProduct(product),
			score,
			matched_field,
			preview: described(product.description.as_deref(), hit, product.reference.as_deref()),
		});
	}

	out
}

fn service_types<'c>(ctx: &MatchContext<'c>) -> Vec<Candidate<'c>> {
	let mut out = Vec::new();

	for service_type in &ctx.corpus.service_types {
		let Some((score, hit)) = ctx.ranker.ladder(
			&service_type.name,
			Some(service_type.slug.as_str()),
			service_type.description.as_deref(),
		) else {
			continue;
		};
		let matched_field = match hit {
			LadderHit::Primary => "name",
			LadderHit::Secondary => "slug",
			LadderHit::Description => "description",
		};

		out.push(Candidate {
			row: Row::ServiceType(service_type),
			score,
			matched_field,
			preview: described(
				service_type.description.as_deref(),
				hit,
				Some(service_type.slug.as_str()),
			),
		});
	}

	out
}

fn described<'c>(
	description: Option<&'c str>,
	hit: LadderHit,
	fallback: Option<&'c str>,
) -> PreviewSource<'c> {
	match description {
		Some(description) if hit == LadderHit::Description => PreviewSource::Highlight(description),
		description => first_plain(&[description, fallback]),
	}
}

fn first_plain<'c>(fields: &[Option<&'c str>]) -> PreviewSource<'c> {
	fields
		.iter()
		.flatten()
		.copied()
		.find(|value| !value.trim().is_empty())
		.map_or(PreviewSource::None, PreviewSource::Plain)
}
