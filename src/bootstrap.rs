use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
    mfa::{MfaProvider, MfaRegistry},
    settings::Settings,
    GIT_COMMIT_HASH,
};

/// Register `providers` in order, then activate them from the configured blob.
///
/// # Errors
/// Returns an error if a provider cannot be registered, the configuration
/// file cannot be read, or a provider fails to configure.
#[instrument(skip_all)]
pub fn bootstrap(settings: &Settings, providers: Vec<Arc<dyn MfaProvider>>) -> Result<MfaRegistry> {
    let registry = MfaRegistry::new();

    for provider in providers {
        registry
            .register(provider)
            .context("MFA provider registration failed")?;
    }

    let config_source = settings.load_config_source()?;

    activate(&registry, &config_source)?;

    Ok(registry)
}

/// Activate an already populated registry from a configuration blob.
///
/// # Errors
/// Returns an error if a provider fails to configure.
pub fn activate(registry: &MfaRegistry, config_source: &[u8]) -> Result<()> {
    registry
        .initialize(config_source)
        .context("MFA provider activation failed")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        build = GIT_COMMIT_HASH,
        registered = ?registry.registered_ids(),
        active = ?registry.active_ids(),
        "MFA providers activated"
    );

    Ok(())
}
