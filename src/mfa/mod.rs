//! Multi-factor authentication (MFA) provider dispatch.
//!
//! Flow Overview:
//! 1) Providers are registered on an [`MfaRegistry`] during startup.
//! 2) [`MfaRegistry::initialize`] hands the configuration blob to every provider;
//!    those that configure successfully become active.
//! 3) [`MfaRegistry::validate_mfa`] tries the active providers for each login,
//!    first confirmation wins.

pub mod channel;
pub mod config;
pub mod error;
pub mod field;
pub mod provider;
pub mod registry;

pub use channel::{MfaRequest, MfaResponse};
pub use config::{provider_section, MfaConfig};
pub use error::{ActivationError, ProviderError, RegistryError};
pub use field::{LoginField, MFA_LOGIN_FIELD, MFA_LOGIN_FIELD_NAME};
pub use provider::MfaProvider;
pub use registry::MfaRegistry;
