//! ECR authentication
//!
//! Fetches a short-lived authorization token from ECR, decodes it into a
//! username/password pair and logs the local docker client into the
//! account's registry. No step is retried; the first failure is surfaced
//! to the caller.

use crate::error::{AwsError, Result};
use crate::{AwsContext, sts};
use aws_config::SdkConfig;
use aws_sdk_ecr::error::DisplayErrorContext;
use base64::Engine;
use colored::Colorize;
use netsells_process::Process;

/// Credentials decoded from an ECR authorization token.
///
/// Held in memory for the duration of one login call, never persisted.
#[derive(Debug)]
pub struct RegistryCredentials {
    pub username: String,
    pub password: String,
}

/// Log the docker client into the registry derived from `ctx`.
pub async fn authenticate_docker(ctx: &AwsContext) -> Result<()> {
    let config = ctx.sdk_config().await;

    let token = authorization_token(&config).await?;

    // Deliberate escape hatch: the raw token is only emitted at trace
    // level, which requires --verbosity 3.
    tracing::trace!("Got ECR authorization token: {}", token);

    let credentials = decode_authorization_token(&token)?;
    let registry = ctx.registry_host();
    let caller = sts::caller_arn(&config).await;

    println!("Targeting registry {}", registry.cyan());
    println!("Using user {}", caller.cyan());
    println!();

    docker_login(&registry, &credentials).await?;

    Ok(())
}

/// Fetch an authorization token for the configured identity.
pub async fn authorization_token(config: &SdkConfig) -> Result<String> {
    let client = aws_sdk_ecr::Client::new(config);

    let output = client
        .get_authorization_token()
        .send()
        .await
        .map_err(|e| AwsError::TokenFetchFailed(DisplayErrorContext(&e).to_string()))?;

    let token = output
        .authorization_data()
        .first()
        .and_then(|data| data.authorization_token())
        .ok_or_else(|| {
            AwsError::TokenFetchFailed("no authorization data in response".to_string())
        })?;

    Ok(token.to_string())
}

/// Decode a base64 `username:password` authorization token.
pub fn decode_authorization_token(token: &str) -> Result<RegistryCredentials> {
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(token)
        .map_err(|e| AwsError::MalformedToken(format!("invalid base64: {}", e)))?;

    let decoded = String::from_utf8(decoded)
        .map_err(|e| AwsError::MalformedToken(format!("invalid UTF-8: {}", e)))?;

    let Some((username, password)) = decoded.split_once(':') else {
        return Err(AwsError::MalformedToken(
            "expected username:password".to_string(),
        ));
    };

    Ok(RegistryCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

async fn docker_login(registry: &str, credentials: &RegistryCredentials) -> Result<()> {
    Process::new("docker")
        .args([
            "login",
            "--username",
            credentials.username.as_str(),
            "--password",
            credentials.password.as_str(),
            registry,
        ])
        .run()
        .await?;

    Ok(())
}
