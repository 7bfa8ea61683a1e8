#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("Store unavailable: {0}")]
	Unavailable(String),
	#[error("Operation cancelled.")]
	Cancelled,
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	#[error("Invalid stored row: {0}")]
	InvalidRow(String),
}
