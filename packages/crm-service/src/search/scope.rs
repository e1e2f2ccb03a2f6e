use crm_domain::entity::EntityType;

use crate::{Error, Result};

/// Parses the comma-separated type filter.
///
/// Returns `None` for an omitted or blank filter, which means "every type the caller may see".
/// Tokens are trimmed and case-sensitive; duplicates collapse onto their first occurrence and an
/// unknown token rejects the whole request.
pub fn parse_types(raw: Option<&str>) -> Result<Option<Vec<EntityType>>> {
	let Some(raw) = raw else { return Ok(None) };
	let mut out = Vec::new();

	for token in raw.split(',').map(str::trim).filter(|token| !token.is_empty()) {
		let Some(kind) = EntityType::parse(token) else {
			return Err(Error::Validation {
				message: format!("Unknown entity type '{token}' in types filter."),
			});
		};

		if !out.contains(&kind) {
			out.push(kind);
		}
	}

	if out.is_empty() { Ok(None) } else { Ok(Some(out)) }
}

/// Applies the caller's visibility to a parsed filter. Admin-only types are silently removed for
/// everybody else, even when they were asked for by name.
pub fn visible_types(requested: Option<Vec<EntityType>>, is_admin: bool) -> Vec<EntityType> {
	let requested = requested.unwrap_or_else(|| EntityType::ALL.to_vec());

	if is_admin {
		return requested;
	}

	requested.into_iter().filter(|kind| !kind.is_admin_only()).collect()
}

pub fn resolve(raw: Option<&str>, is_admin: bool) -> Result<Vec<EntityType>> {
	Ok(visible_types(parse_types(raw)?, is_admin))
}
