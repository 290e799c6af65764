// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Client settings
//!
//! A client is configured from two layers:
//!
//! - [`ServiceDefaults`]: what the service itself declares (the environment
//!   variable that may override its host, its default host, scope and
//!   transport security), usually taken from the meta document.
//! - [`ClientOptions`]: what the caller passes explicitly.
//!
//! [`ClientSettings::resolve`] merges both into the values a call needs.
//!
//! # Precedence
//!
//! - **host**: explicit option, then the non-empty environment variable, then
//!   the service default
//! - **scope**: explicit option, then the service default, then the host
//! - **insecure**: explicit option or service default

use super::error::AgreementsError;

/// One or more authorization scopes handed to the credential provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scopes(Vec<String>);

impl Scopes {
    pub fn new(scopes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(scopes.into_iter().map(Into::into).collect())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Scopes {
    fn from(scope: &str) -> Self {
        Self(vec![scope.to_string()])
    }
}

impl From<String> for Scopes {
    fn from(scope: String) -> Self {
        Self(vec![scope])
    }
}

impl From<Vec<String>> for Scopes {
    fn from(scopes: Vec<String>) -> Self {
        Self(scopes)
    }
}

impl From<&[&str]> for Scopes {
    fn from(scopes: &[&str]) -> Self {
        Self::new(scopes.iter().copied())
    }
}

/// Per-service defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDefaults {
    /// Environment variable that overrides the host when set and non-empty.
    pub host_variable: Option<String>,
    pub host_default: Option<String>,
    pub insecure_default: bool,
    pub scope_default: Option<Scopes>,
}

/// Explicit caller configuration; everything left unset falls back to the
/// service defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOptions {
    pub host: Option<String>,
    pub scope: Option<Scopes>,
    pub insecure: bool,
}

impl ClientOptions {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn scope(mut self, scope: impl Into<Scopes>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }
}

/// Fully resolved settings used for every call of one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub host: String,
    pub scopes: Scopes,
    pub insecure: bool,
}

impl ClientSettings {
    /// Resolve against the process environment.
    pub fn resolve(
        options: ClientOptions,
        defaults: &ServiceDefaults,
    ) -> Result<Self, AgreementsError> {
        Self::resolve_with(options, defaults, |name| std::env::var(name).ok())
    }

    /// Resolve with a custom environment lookup.
    pub fn resolve_with(
        options: ClientOptions,
        defaults: &ServiceDefaults,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AgreementsError> {
        let from_env = || {
            defaults
                .host_variable
                .as_deref()
                .and_then(|name| env(name))
                .filter(|value| !value.is_empty())
        };

        let host = options
            .host
            .filter(|host| !host.is_empty())
            .or_else(from_env)
            .or_else(|| defaults.host_default.clone())
            .ok_or_else(|| {
                AgreementsError::ConfigurationUnavailable(match &defaults.host_variable {
                    Some(name) => format!("no host given and {} is not set", name),
                    None => "no host given".to_string(),
                })
            })?;

        let scopes = options
            .scope
            .filter(|scopes| !scopes.is_empty())
            .or_else(|| defaults.scope_default.clone())
            .unwrap_or_else(|| Scopes::from(host.as_str()));

        Ok(Self {
            host,
            scopes,
            insecure: options.insecure || defaults.insecure_default,
        })
    }
}
