use crate::model::SourceKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Per-source failures. These never reach the caller: the fan-out boundary
/// converts them to empty contributions and logs them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Source {kind} timed out after {deadline_ms} ms.")]
	SourceTimeout { kind: SourceKind, deadline_ms: u64 },
	#[error("Source {kind} failed: {message}")]
	SourceFailure { kind: SourceKind, message: String },
}
