use std::cmp::Ordering;

use crate::search::{
	matcher::{Candidate, PreviewSource},
	ranking::Ranker,
};
use crm_domain::headline::{self, HeadlineOptions};

pub struct Page<'c> {
	/// Size of the merged set before offset and limit, saturated at `i64::MAX`.
	pub total: i64,
	pub items: Vec<Candidate<'c>>,
}

/// Strict total order: score descending, newest first, then entity id and type ascending.
pub fn cmp_candidates(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
	b.score
		.total_cmp(&a.score)
		.then_with(|| b.row.created_at().cmp(&a.row.created_at()))
		.then_with(|| a.row.id().cmp(&b.row.id()))
		.then_with(|| a.row.entity_type().cmp(&b.row.entity_type()))
}

/// Merges per-type candidates into one ordered page.
pub fn unify(mut candidates: Vec<Candidate<'_>>, offset: usize, limit: usize) -> Page<'_> {
	candidates.sort_by(cmp_candidates);

	let total = i64::try_from(candidates.len()).unwrap_or(i64::MAX);
	let items = candidates.into_iter().skip(offset).take(limit).collect();

	Page { total, items }
}

/// Renders a preview snippet; blank sources yield `None`.
pub fn render_preview(
	source: PreviewSource<'_>,
	ranker: &Ranker<'_>,
	opts: &HeadlineOptions<'_>,
) -> Option<String> {
	let out = match source {
		PreviewSource::Highlight(text) => {
			headline::headline(text, opts, |word| ranker.is_hit_word(word))
		},
		PreviewSource::Plain(text) => headline::excerpt(text, opts.max_words),
		PreviewSource::None => return None,
	};

	if out.is_empty() { None } else { Some(out) }
}

#[cfg(test)]
mod tests {
	use time::{Duration, OffsetDateTime};
	use uuid::Uuid;

	use super::*;
	use crate::search::matcher::Row;
	use crm_storage::models::CatalogProduct;

	fn product(created_at: OffsetDateTime) -> CatalogProduct {
		CatalogProduct {
			id: Uuid::new_v4(),
			title: "Dakgoot".to_string(),
			reference: None,
			description: None,
			created_at,
		}
	}

	fn candidate(product: &CatalogProduct, score: f32) -> Candidate<'_> {
		Candidate {
			row: Row::CatalogProduct(product),
			score,
			matched_field: "title",
			preview: PreviewSource::None,
		}
	}

	#[test]
	fn orders_by_score_then_recency_then_id() {
		let now = OffsetDateTime::UNIX_EPOCH + Duration::days(10);
		let old = product(now - Duration::days(1));
		let new = product(now);
		let twin_a = product(now);
		let twin_b = product(now);
		let page = unify(
			vec![
				candidate(&old, 0.8),
				candidate(&twin_b, 0.3),
				candidate(&new, 0.8),
				candidate(&twin_a, 0.3),
			],
			0,
			10,
		);
		let ids: Vec<Uuid> = page.items.iter().map(|item| item.row.id()).collect();
		let (low, high) =
			if twin_a.id < twin_b.id { (twin_a.id, twin_b.id) } else { (twin_b.id, twin_a.id) };

		assert_eq!(ids, vec![new.id, old.id, low, high]);
	}

	#[test]
	fn total_counts_the_whole_merged_set() {
		let rows: Vec<CatalogProduct> =
			(0..5).map(|_| product(OffsetDateTime::UNIX_EPOCH)).collect();
		let candidates = rows.iter().map(|row| candidate(row, 1.0)).collect();
		let page = unify(candidates, 3, 10);

		assert_eq!(page.total, 5);
		assert_eq!(page.items.len(), 2);
	}
}
