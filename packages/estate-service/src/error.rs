use estate_storage::Error as StorageError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	Validation { message: String, fields: Vec<String> },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Store unavailable: {message}")]
	StoreUnavailable { message: String },
	#[error("Request cancelled.")]
	Cancelled,
}
impl From<StorageError> for Error {
	fn from(err: StorageError) -> Self {
		match err {
			StorageError::Cancelled => Self::Cancelled,
			StorageError::InvalidArgument(message) => Self::Validation { message, fields: Vec::new() },
			StorageError::Sqlx(inner) => Self::StoreUnavailable { message: inner.to_string() },
			StorageError::Unavailable(message) | StorageError::InvalidRow(message) =>
				Self::StoreUnavailable { message },
		}
	}
}

impl From<estate_domain::Error> for Error {
	fn from(err: estate_domain::Error) -> Self {
		let fields = err.field().map(|field| vec![field.to_string()]).unwrap_or_default();

		Self::Validation { message: err.to_string(), fields }
	}
}
