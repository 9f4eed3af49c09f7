//! # mfa-dispatch (Pluggable MFA provider dispatch)
//!
//! `mfa-dispatch` coordinates multi-factor authentication methods without
//! implementing any of them. Concrete methods (TOTP, WebAuthn, SMS, ...) live
//! elsewhere and plug in through the [`mfa::MfaProvider`] trait.
//!
//! ## Lifecycle
//!
//! 1. **Registration:** every provider known to the process is added to an
//!    [`mfa::MfaRegistry`] at startup. Order matters: it is the activation order
//!    and the order in which providers are tried during login.
//! 2. **Activation:** the raw configuration blob is handed to each provider once.
//!    Providers without configuration step aside; any other configuration error
//!    aborts startup.
//! 3. **Validation:** on every login the active providers are tried in order
//!    until one confirms the user. Users without enrolled MFA methods pass.
//!
//! ## Errors
//!
//! Two sentinel errors drive control flow instead of aborting:
//! [`mfa::ProviderError::Unconfigured`] during activation and
//! [`mfa::ProviderError::NoValidUserFound`] during validation.

pub mod bootstrap;
pub mod mfa;
pub mod settings;
pub mod telemetry;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
