pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("Invalid {field}: {message}")]
	InvalidField { field: &'static str, message: String },
	#[error("Duplicate listing id {id:?} in batch.")]
	DuplicateId { id: String },
}
impl Error {
	pub fn field(&self) -> Option<&'static str> {
		match self {
			Self::InvalidField { field, .. } => Some(field),
			Self::DuplicateId { .. } => None,
		}
	}
}
