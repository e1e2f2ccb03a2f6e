//! The lead-centric relationship graph and the per-lead match records derived from it.

use std::{
	cmp::Ordering,
	collections::{BTreeSet, HashMap},
};

use uuid::Uuid;

use crate::search::ranking::{FieldClass, Ranker};
use crm_config::SearchDamping;
use crm_storage::models::{
	Appointment, CatalogProduct, Lead, LeadNote, LeadService, Partner, PartnerLead, Quote,
	ServiceType,
};

/// Every row one search call ranks, fetched for a single tenant.
#[derive(Debug, Default)]
pub struct Corpus {
	pub leads: Vec<Lead>,
	pub lead_notes: Vec<LeadNote>,
	pub lead_services: Vec<LeadService>,
	pub quotes: Vec<Quote>,
	pub partners: Vec<Partner>,
	pub partner_leads: Vec<PartnerLead>,
	pub appointments: Vec<Appointment>,
	pub catalog_products: Vec<CatalogProduct>,
	pub service_types: Vec<ServiceType>,
}

/// Leads reachable from the tenant's own leads or from any of its lead-bearing relation rows.
///
/// The result is sorted so the follow-up fetch is deterministic.
pub fn hub_lead_ids(tenant_lead_ids: &[Uuid], corpus: &Corpus) -> Vec<Uuid> {
	let mut hub: BTreeSet<Uuid> = tenant_lead_ids.iter().copied().collect();

	hub.extend(corpus.quotes.iter().map(|quote| quote.lead_id));
	hub.extend(corpus.appointments.iter().filter_map(|appointment| appointment.lead_id));
	hub.extend(corpus.lead_services.iter().map(|service| service.lead_id));
	hub.extend(corpus.lead_notes.iter().map(|note| note.lead_id));
	hub.extend(corpus.partner_leads.iter().map(|link| link.lead_id));

	hub.into_iter().collect()
}

/// Why and how strongly one lead matched.
#[derive(Debug)]
pub struct LeadMatch<'c> {
	/// Highest priority own field that matched, if any.
	pub own_field: Option<&'static str>,
	/// Best matching note and its undamped rank.
	pub note: Option<(&'c LeadNote, f32)>,
	/// Best matching service consumer note and its undamped rank.
	pub service_note: Option<(&'c LeadService, f32)>,
	/// Own rank plus the damped best note and service-note ranks.
	pub lead_rank: f32,
}

pub struct LeadGraph<'c> {
	leads: HashMap<Uuid, &'c Lead>,
	matches: HashMap<Uuid, LeadMatch<'c>>,
	partner_leads: HashMap<Uuid, Vec<Uuid>>,
}
impl<'c> LeadGraph<'c> {
	/// Ranks every hub lead, folding in its best note and service-note hits.
	///
	/// Only leads with a positive `lead_rank` get a record, so a note-only hit still counts as the
	/// lead matching.
	pub fn resolve(ranker: &Ranker<'_>, corpus: &'c Corpus, damping: &SearchDamping) -> Self {
		let leads: HashMap<Uuid, &'c Lead> =
			corpus.leads.iter().map(|lead| (lead.id, lead)).collect();
		let mut notes: HashMap<Uuid, (&'c LeadNote, f32)> = HashMap::new();
		let mut services: HashMap<Uuid, (&'c LeadService, f32)> = HashMap::new();

		for note in &corpus.lead_notes {
			if !leads.contains_key(&note.lead_id) {
				continue;
			}

			let rank = ranker.rank_text(&note.body, FieldClass::C);

			keep_best(&mut notes, note.lead_id, note, rank, |best| best.id);
		}
		for service in &corpus.lead_services {
			let Some(consumer_note) = service.consumer_note.as_deref() else { continue };

			if consumer_note.trim().is_empty() || !leads.contains_key(&service.lead_id) {
				continue;
			}

			let rank = ranker.rank_text(consumer_note, FieldClass::C);

			keep_best(&mut services, service.lead_id, service, rank, |best| best.id);
		}

		let mut matches = HashMap::new();

		for lead in &corpus.leads {
			let own = ranker.rank(&[
				(Some(lead.consumer_first_name.as_str()), FieldClass::A),
				(Some(lead.consumer_last_name.as_str()), FieldClass::A),
				(lead.consumer_email.as_deref(), FieldClass::B),
				(lead.consumer_phone.as_deref(), FieldClass::B),
				(lead.address_city.as_deref(), FieldClass::C),
			]);
			let own_field = if own.field_hit(0) || own.field_hit(1) {
				Some("name")
			} else if own.field_hit(2) {
				Some("email")
			} else if own.field_hit(3) {
				Some("phone")
			} else if own.field_hit(4) {
				Some("city")
			} else {
				None
			};
			let note = notes.get(&lead.id).copied();
			let service_note = services.get(&lead.id).copied();
			let lead_rank = own.score
				+ note.map_or(0.0, |(_, rank)| rank) * damping.note
				+ service_note.map_or(0.0, |(_, rank)| rank) * damping.service_note;

			if lead_rank > 0.0 {
				matches.insert(lead.id, LeadMatch {
					own_field,
					note,
					service_note,
					lead_rank,
				});
			}
		}

		let mut partner_leads: HashMap<Uuid, Vec<Uuid>> = HashMap::new();

		for link in &corpus.partner_leads {
			partner_leads.entry(link.partner_id).or_default().push(link.lead_id);
		}

		Self { leads, matches, partner_leads }
	}

	pub fn get(&self, lead_id: Uuid) -> Option<&LeadMatch<'c>> {
		self.matches.get(&lead_id)
	}

	pub fn lead(&self, lead_id: Uuid) -> Option<&'c Lead> {
		self.leads.get(&lead_id).copied()
	}

	/// `lead_rank` of a lead, zero when it did not match or is not live.
	pub fn lead_rank(&self, lead_id: Uuid) -> f32 {
		self.matches.get(&lead_id).map_or(0.0, |record| record.lead_rank)
	}

	/// Highest `lead_rank` among the leads assigned to a partner.
	pub fn partner_rank(&self, partner_id: Uuid) -> f32 {
		self.partner_leads
			.get(&partner_id)
			.map(|lead_ids| lead_ids.iter().map(|id| self.lead_rank(*id)).fold(0.0, f32::max))
			.unwrap_or(0.0)
	}

	pub fn matched_leads(&self) -> usize {
		self.matches.len()
	}
}

/// Keeps the highest ranked hit per lead; equal ranks resolve to the lowest row id.
fn keep_best<'c, T, F>(
	best: &mut HashMap<Uuid, (&'c T, f32)>,
	lead_id: Uuid,
	row: &'c T,
	rank: f32,
	id_of: F,
) where
	F: Fn(&T) -> Uuid,
{
	if rank <= 0.0 {
		return;
	}

	let replace = match best.get(&lead_id) {
		Some((current, current_rank)) => match rank.total_cmp(current_rank) {
			Ordering::Greater => true,
			Ordering::Equal => id_of(row) < id_of(current),
			Ordering::Less => false,
		},
		None => true,
	};

	if replace {
		best.insert(lead_id, (row, rank));
	}
}
