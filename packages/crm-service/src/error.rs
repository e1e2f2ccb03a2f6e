pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Validation failed: {message}")]
	Validation { message: String },
	#[error("Internal error during {operation}.")]
	Internal {
		operation: String,
		#[source]
		source: crm_storage::Error,
	},
}
impl Error {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Validation { .. } => ErrorKind::Validation,
			Self::Internal { .. } => ErrorKind::Internal,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
	Validation,
	Internal,
}
impl ErrorKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Validation => "validation",
			Self::Internal => "internal",
		}
	}
}
