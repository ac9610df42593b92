use async_trait::async_trait;
use rusoto_core::{
    credential::AwsCredentials, credential::CredentialsError, credential::ProvideAwsCredentials,
};

use crate::config::StaticCredentials;

/// Hands out the key pair supplied through configuration on every request.
#[derive(Debug, Clone)]
pub struct CredentialsFromConfig {
    aws_credentials: AwsCredentials,
}

impl CredentialsFromConfig {
    pub fn new(credentials: &StaticCredentials) -> Self {
        let aws_credentials = AwsCredentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            credentials.session_token.clone(),
            None,
        );

        CredentialsFromConfig { aws_credentials }
    }
}

#[async_trait]
impl ProvideAwsCredentials for CredentialsFromConfig {
    async fn credentials(&self) -> Result<AwsCredentials, CredentialsError> {
        Ok(self.aws_credentials.clone())
    }
}
