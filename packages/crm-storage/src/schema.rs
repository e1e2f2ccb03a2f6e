pub fn render_schema() -> String {
	let init = include_str!("../../../sql/init.sql");

	expand_includes(init)
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"00_extensions.sql" => out.push_str(include_str!("../../../sql/00_extensions.sql")),
				"tables/001_leads.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_leads.sql")),
				"tables/002_lead_notes.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_lead_notes.sql")),
				"tables/003_lead_services.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_lead_services.sql")),
				"tables/004_quotes.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_quotes.sql")),
				"tables/005_partners.sql" =>
					out.push_str(include_str!("../../../sql/tables/005_partners.sql")),
				"tables/006_partner_leads.sql" =>
					out.push_str(include_str!("../../../sql/tables/006_partner_leads.sql")),
				"tables/007_appointments.sql" =>
					out.push_str(include_str!("../../../sql/tables/007_appointments.sql")),
				"tables/008_catalog_products.sql" =>
					out.push_str(include_str!("../../../sql/tables/008_catalog_products.sql")),
				"tables/009_service_types.sql" =>
					out.push_str(include_str!("../../../sql/tables/009_service_types.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}
