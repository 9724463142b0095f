use async_trait::async_trait;

use crate::config::AdminConfig;

/// Checks admin credentials. Returning `Ok(false)` means "wrong credentials".
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<bool, AuthError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("credential verifier unavailable: {0}")]
    Unavailable(String),
}

/// Verifier backed by the single admin credential pair from configuration.
#[derive(Clone, Default)]
pub struct ConfiguredCredentials {
    identifier: Option<String>,
    secret: Option<String>,
}

impl ConfiguredCredentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
            secret: Some(secret.into()),
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self {
            identifier: config.identifier.clone(),
            secret: config.secret.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.identifier.is_some() && self.secret.is_some()
    }
}

impl std::fmt::Debug for ConfiguredCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfiguredCredentials")
            .field("identifier", &self.identifier)
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[async_trait]
impl CredentialVerifier for ConfiguredCredentials {
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<bool, AuthError> {
        let (Some(expected_identifier), Some(expected_secret)) = (&self.identifier, &self.secret)
        else {
            return Ok(false);
        };

        let identifier_matches = expected_identifier.eq_ignore_ascii_case(identifier.trim());
        let secret_matches = constant_time_eq(expected_secret.as_bytes(), secret.as_bytes());
        Ok(identifier_matches & secret_matches)
    }
}

fn constant_time_eq(expected: &[u8], actual: &[u8]) -> bool {
    if expected.len() != actual.len() {
        return false;
    }

    expected
        .iter()
        .zip(actual)
        .fold(0u8, |acc, (left, right)| acc | (left ^ right))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_verifier_rejects_everything() {
        let verifier = ConfiguredCredentials::default();
        assert!(!verifier.is_configured());
        let accepted = verifier
            .authenticate("admin@events.example", "")
            .await
            .expect("verifier responds");
        assert!(!accepted);
    }

    #[tokio::test]
    async fn identifier_is_case_insensitive_but_secret_is_exact() {
        let verifier = ConfiguredCredentials::new("admin@events.example", "s3cret-phrase");

        assert!(verifier
            .authenticate("Admin@Events.example", "s3cret-phrase")
            .await
            .expect("verifier responds"));
        assert!(!verifier
            .authenticate("admin@events.example", "S3cret-phrase")
            .await
            .expect("verifier responds"));
        assert!(!verifier
            .authenticate("admin@events.example", "s3cret")
            .await
            .expect("verifier responds"));
    }

    #[test]
    fn debug_output_hides_secret() {
        let verifier = ConfiguredCredentials::new("admin@events.example", "s3cret-phrase");
        let rendered = format!("{verifier:?}");
        assert!(!rendered.contains("s3cret-phrase"));
    }
}
