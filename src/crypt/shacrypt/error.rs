use thiserror::Error;

/// Failure modes of [`super::shacrypt`].
///
/// No variant carries the password, salt, or any derived digest bytes:
/// diagnostics may only reveal which algorithm was chosen and whether
/// `rounds=` was explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShaCryptError {
    #[error("null argument")]
    NullArgument,
    #[error("insufficient destination buffer size")]
    InsufficientBufferSize,
    #[error("invalid salt")]
    InvalidSalt,
    #[error("invalid format of salt")]
    InvalidSaltFormat,
    #[error("unknown crypt identifier '{0}'")]
    UnknownCryptIdentifier(char),
    #[error("invalid rounds option")]
    InvalidRoundsOption,
    #[error("cannot create encrypted password")]
    CryptFailure,
}
