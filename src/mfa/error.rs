use thiserror::Error;

/// Errors returned by [`MfaProvider`](super::MfaProvider) implementations.
///
/// `Unconfigured` and `NoValidUserFound` are sentinels: they steer activation
/// and dispatch instead of aborting them.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No configuration applies to this provider. Only meaningful from `configure`.
    #[error("MFA provider is not configured")]
    Unconfigured,
    /// This provider did not confirm the user. Only meaningful from `validate_mfa`.
    #[error("no valid user found")]
    NoValidUserFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProviderError {
    #[must_use]
    pub fn is_unconfigured(&self) -> bool {
        matches!(self, Self::Unconfigured)
    }

    #[must_use]
    pub fn is_no_valid_user_found(&self) -> bool {
        matches!(self, Self::NoValidUserFound)
    }
}

#[derive(Debug, Error)]
pub enum ActivationError {
    #[error("MFA provider {provider} configuration caused an error")]
    Provider {
        provider: String,
        #[source]
        source: ProviderError,
    },
    #[error("MFA providers have already been activated")]
    AlreadyActivated,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("MFA provider {0} is already registered")]
    DuplicateProvider(String),
    #[error("MFA provider {0} registered after activation")]
    Frozen(String),
}
