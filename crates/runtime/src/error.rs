//! Errors surfaced by the simulation API.

use skill_core::{ActivationError, ActorId, ErrorSeverity, SkillError};
use thiserror::Error;

pub use crate::replication::ReplicationError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Activation(#[from] ActivationError),

    #[error(transparent)]
    Replication(#[from] ReplicationError),

    #[error("unknown actor {0}")]
    UnknownActor(ActorId),

    #[error("simulation requires a class registry before building")]
    MissingRegistry,
}

impl SkillError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Activation(e) => e.severity(),
            Self::Replication(ReplicationError::Codec(_)) => ErrorSeverity::Internal,
            Self::Replication(_) => ErrorSeverity::Validation,
            Self::UnknownActor(_) => ErrorSeverity::Validation,
            Self::MissingRegistry => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Activation(e) => e.error_code(),
            Self::Replication(ReplicationError::Wire(e)) => e.error_code(),
            Self::Replication(ReplicationError::Codec(_)) => "REPLICATION_CODEC",
            Self::Replication(ReplicationError::DigestMismatch { .. }) => {
                "REPLICATION_DIGEST_MISMATCH"
            }
            Self::Replication(ReplicationError::SpawnRefused { .. }) => {
                "REPLICATION_SPAWN_REFUSED"
            }
            Self::UnknownActor(_) => "RUNTIME_UNKNOWN_ACTOR",
            Self::MissingRegistry => "RUNTIME_MISSING_REGISTRY",
        }
    }
}
