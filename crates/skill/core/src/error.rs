//! Shared error classification.
//!
//! Each operation owns its error enum (`ActivationError` in the executor,
//! `WireError` next to the codec). They all implement [`SkillError`] so hosts
//! can decide between retrying a cast, rejecting content and reporting a bug
//! without matching on every variant.

/// How a host should react to a failed skill operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The same request may succeed on a later frame (cooldown, resource).
    Recoverable,
    /// The request or record itself is malformed; retrying is pointless.
    Validation,
    /// Framework state disagrees with itself.
    Internal,
    /// The framework was assembled wrong and cannot run.
    Fatal,
}

impl ErrorSeverity {
    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// True for severities that point at a bug rather than bad input.
    pub const fn is_internal(self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Implemented by every error enum in the skill crates.
pub trait SkillError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs and telemetry.
    ///
    /// Defaults to the Rust type name; enums override it per variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
