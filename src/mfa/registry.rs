use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, instrument};

use super::{
    channel::{MfaRequest, MfaResponse},
    config::MfaConfig,
    error::{ActivationError, ProviderError, RegistryError},
    provider::MfaProvider,
};

#[derive(Default)]
struct State {
    registered: Vec<Arc<dyn MfaProvider>>,
    active: Vec<Arc<dyn MfaProvider>>,
    activated: bool,
}

/// Registered MFA providers and the subset activated from configuration.
///
/// Built once at startup and shared (usually behind an `Arc`) with every
/// component that validates logins.
#[derive(Default)]
pub struct MfaRegistry {
    state: RwLock<State>,
}

impl MfaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // State is append-only, a panicking writer cannot leave it half-updated.
    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a provider. Registration order is activation and validation order.
    ///
    /// # Errors
    /// Returns an error if a provider with the same ID is already registered,
    /// or if the registry has already been activated.
    pub fn register(&self, provider: Arc<dyn MfaProvider>) -> Result<(), RegistryError> {
        let mut state = self.write();
        let id = provider.provider_id();

        if state.activated {
            return Err(RegistryError::Frozen(id.to_string()));
        }

        if state.registered.iter().any(|p| p.provider_id() == id) {
            return Err(RegistryError::DuplicateProvider(id.to_string()));
        }

        debug!(mfa_provider = id, "Registered MFA provider");
        state.registered.push(provider);

        Ok(())
    }

    /// Configure every registered provider and keep the ones that succeed.
    ///
    /// Providers answering [`ProviderError::Unconfigured`] are skipped. Any
    /// other error stops activation right away; providers activated before it
    /// stay active.
    ///
    /// # Errors
    /// Returns [`ActivationError::Provider`] naming the first provider that
    /// failed, or [`ActivationError::AlreadyActivated`] on a second call.
    pub fn initialize(&self, config_source: &[u8]) -> Result<(), ActivationError> {
        let mut state = self.write();

        if state.activated {
            return Err(ActivationError::AlreadyActivated);
        }
        state.activated = true;

        let registered = state.registered.clone();
        for provider in registered {
            let id = provider.provider_id();

            match provider.configure(config_source) {
                Ok(()) => {
                    debug!(mfa_provider = id, "Activated MFA provider");
                    state.active.push(provider);
                }
                Err(ProviderError::Unconfigured) => {
                    debug!(mfa_provider = id, "MFA provider unconfigured");
                }
                Err(source) => {
                    return Err(ActivationError::Provider {
                        provider: id.to_string(),
                        source,
                    });
                }
            }
        }

        Ok(())
    }

    /// Try the active providers in order until one confirms the user.
    ///
    /// A user without MFA entries passes without consulting any provider.
    ///
    /// # Errors
    /// Returns the first error other than [`ProviderError::NoValidUserFound`]
    /// unchanged, or [`ProviderError::NoValidUserFound`] when no provider
    /// confirmed the user.
    #[instrument(skip(self, response, request, entries), fields(entry_count = entries.len()))]
    pub async fn validate_mfa(
        &self,
        response: &mut MfaResponse,
        request: &MfaRequest,
        user: &str,
        entries: &[MfaConfig],
    ) -> Result<(), ProviderError> {
        if entries.is_empty() {
            return Ok(());
        }

        let active = self.read().active.clone();

        for provider in active {
            match provider.validate_mfa(response, request, user, entries).await {
                Ok(()) => {
                    debug!(mfa_provider = provider.provider_id(), "MFA validated");
                    return Ok(());
                }
                Err(ProviderError::NoValidUserFound) => {}
                Err(err) => return Err(err),
            }
        }

        Err(ProviderError::NoValidUserFound)
    }

    #[must_use]
    pub fn registered_ids(&self) -> Vec<String> {
        self.read()
            .registered
            .iter()
            .map(|p| p.provider_id().to_string())
            .collect()
    }

    #[must_use]
    pub fn active_ids(&self) -> Vec<String> {
        self.read()
            .active
            .iter()
            .map(|p| p.provider_id().to_string())
            .collect()
    }

    #[must_use]
    pub fn is_activated(&self) -> bool {
        self.read().activated
    }
}
