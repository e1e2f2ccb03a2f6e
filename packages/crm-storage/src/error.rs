#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("Timed out after {elapsed_ms} ms.")]
	Timeout { elapsed_ms: u64 },
}
