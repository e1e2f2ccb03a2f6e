mod error;

pub use error::{Error, Result};

use std::{env, str::FromStr, thread};

use sqlx::{
	ConnectOptions, Connection, Executor,
	postgres::{PgConnectOptions, PgConnection},
};
use tokio::runtime::Builder;
use uuid::Uuid;

pub const DSN_ENV: &str = "CRM_PG_DSN";

const MAINTENANCE_DATABASES: [&str; 2] = ["postgres", "template1"];

/// Scratch database for one test. It lives on the server named by [`DSN_ENV`] and is dropped
/// by [`TestDatabase::cleanup`], or on drop as a fallback.
pub struct TestDatabase {
	database: String,
	dsn: String,
	maintenance: PgConnectOptions,
	dropped: bool,
}
impl TestDatabase {
	pub async fn new(base_dsn: &str) -> Result<Self> {
		let base = PgConnectOptions::from_str(base_dsn)
			.map_err(|err| Error::Message(format!("Invalid {DSN_ENV} value: {err}.")))?;
		let (maintenance, mut conn) = open_maintenance(&base).await?;
		let database = format!("crm_search_{}", Uuid::new_v4().simple());

		conn.execute(format!(r#"CREATE DATABASE "{database}""#).as_str()).await.map_err(
			|err| Error::Message(format!("Could not create database {database}: {err}.")),
		)?;

		let dsn = base.database(&database).to_url_lossy().to_string();

		Ok(Self { database, dsn, maintenance, dropped: false })
	}

	pub fn dsn(&self) -> &str {
		&self.dsn
	}

	pub async fn cleanup(mut self) -> Result<()> {
		drop_database(&self.maintenance, &self.database).await?;

		self.dropped = true;

		Ok(())
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if self.dropped {
			return;
		}

		let database = std::mem::take(&mut self.database);
		let maintenance = self.maintenance.clone();

		// The caller may be inside a runtime, so the blocking drop runs on its own thread.
		let worker = thread::spawn(move || {
			let outcome = Builder::new_current_thread()
				.enable_all()
				.build()
				.map_err(|err| Error::Message(err.to_string()))
				.and_then(|runtime| runtime.block_on(drop_database(&maintenance, &database)));

			if let Err(err) = outcome {
				eprintln!("Leaked test database {database}: {err}");
			}
		});
		let _ = worker.join();
	}
}

pub fn env_dsn() -> Option<String> {
	env::var(DSN_ENV).ok().filter(|dsn| !dsn.trim().is_empty())
}

async fn open_maintenance(base: &PgConnectOptions) -> Result<(PgConnectOptions, PgConnection)> {
	let mut failures = Vec::new();

	for name in MAINTENANCE_DATABASES {
		let options = base.clone().database(name);

		match PgConnection::connect_with(&options).await {
			Ok(conn) => return Ok((options, conn)),
			Err(err) => failures.push(format!("{name}: {err}")),
		}
	}

	Err(Error::Message(format!(
		"No maintenance database reachable ({}).",
		failures.join("; ")
	)))
}

async fn drop_database(maintenance: &PgConnectOptions, database: &str) -> Result<()> {
	let mut conn = PgConnection::connect_with(maintenance)
		.await
		.map_err(|err| Error::Message(format!("Could not reconnect for cleanup: {err}.")))?;

	// Pool connections from the test may still be open.
	conn.execute(format!(r#"DROP DATABASE IF EXISTS "{database}" WITH (FORCE)"#).as_str())
		.await
		.map_err(|err| Error::Message(format!("Could not drop database {database}: {err}.")))?;

	Ok(())
}
