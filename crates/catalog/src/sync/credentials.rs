use crate::config::UpstreamConfig;
use chrono::NaiveDate;
use md5::{Digest, Md5};
use shared::errors::ServiceError;
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Builds the date-bound username/password pair the upstream API expects.
#[derive(Debug, Clone)]
pub struct CredentialDeriver {
    secret: String,
    username_prefix: String,
    username_suffix: Option<String>,
}

impl CredentialDeriver {
    pub fn new(
        secret: impl Into<String>,
        username_prefix: impl Into<String>,
        username_suffix: Option<String>,
    ) -> Self {
        Self {
            secret: secret.into(),
            username_prefix: username_prefix.into(),
            username_suffix,
        }
    }

    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self::new(
            config.secret.clone(),
            config.username_prefix.clone(),
            config.username_suffix.clone(),
        )
    }

    /// Lowercase hex MD5 of `<secret>-DD-MM-YY`.
    pub fn password_for(&self, date: NaiveDate) -> String {
        let plain = format!("{}-{}", self.secret, date.format("%d-%m-%y"));
        hex::encode(Md5::digest(plain.as_bytes()))
    }

    /// `<prefix>DDMMYY<suffix>`, or `None` when no suffix is configured.
    pub fn username_for(&self, date: NaiveDate) -> Option<String> {
        self.username_suffix.as_ref().map(|suffix| {
            format!(
                "{}{}{}",
                self.username_prefix,
                date.format("%d%m%y"),
                suffix
            )
        })
    }

    pub fn derive(
        &self,
        date: NaiveDate,
        username_override: Option<&str>,
    ) -> Result<Credentials, ServiceError> {
        let username = match username_override.map(str::trim).filter(|u| !u.is_empty()) {
            Some(username) => username.to_string(),
            None => self.username_for(date).ok_or_else(|| {
                ServiceError::Credentials(
                    "No upstream username: set UPSTREAM_USERNAME_SUFFIX or pass a username"
                        .to_string(),
                )
            })?,
        };

        Ok(Credentials {
            username,
            password: self.password_for(date),
        })
    }
}
