use async_trait::async_trait;

use super::{
    channel::{MfaRequest, MfaResponse},
    config::MfaConfig,
    error::ProviderError,
};

/// A pluggable multi-factor authentication method.
///
/// Providers are shared between concurrent logins, so they keep whatever
/// `configure` produced behind their own synchronization.
#[async_trait]
pub trait MfaProvider: Send + Sync {
    /// Unique, stable identifier of this provider. Used in logs.
    fn provider_id(&self) -> &str;

    /// Load this provider's settings from the global configuration blob.
    ///
    /// # Errors
    /// Returns [`ProviderError::Unconfigured`] when the blob holds nothing for
    /// this provider. Any other error aborts activation.
    fn configure(&self, config_source: &[u8]) -> Result<(), ProviderError>;

    /// Validate the login request against the user's enrolled MFA entries.
    ///
    /// # Errors
    /// Returns [`ProviderError::NoValidUserFound`] when this method did not
    /// confirm the user. Any other error aborts the validation attempt.
    async fn validate_mfa(
        &self,
        response: &mut MfaResponse,
        request: &MfaRequest,
        user: &str,
        entries: &[MfaConfig],
    ) -> Result<(), ProviderError>;
}
