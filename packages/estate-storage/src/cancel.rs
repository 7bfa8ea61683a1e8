use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::{Error, Result};

/// Drives `operation` until it finishes or `cancel` fires, whichever comes first.
///
/// A token that is already cancelled wins before the operation is polled, so no round trip
/// is started. Dropping the operation mid-flight releases whatever it held; for a
/// transaction that means rollback.
pub async fn run<F, T>(cancel: &CancellationToken, operation: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	tokio::select! {
		biased;
		_ = cancel.cancelled() => Err(Error::Cancelled),
		result = operation => result,
	}
}
