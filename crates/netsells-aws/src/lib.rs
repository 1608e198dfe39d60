//! AWS integration for the Netsells CLI
//!
//! Covers the one AWS workflow the CLI needs: authenticating the local
//! docker client against ECR. Credential resolution itself is delegated to
//! the AWS SDK's default provider chain.

pub mod ecr;
pub mod error;
pub mod sts;

pub use error::*;

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Resolved AWS settings for one invocation.
///
/// Built by the CLI from its resolved configuration and passed down
/// explicitly; nothing here is read from global state.
#[derive(Debug, Clone)]
pub struct AwsContext {
    pub region: String,
    pub account_id: String,
    pub profile: Option<String>,
}

impl AwsContext {
    /// Load the SDK configuration for this context.
    pub async fn sdk_config(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()));

        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }

        loader.load().await
    }

    /// The ECR registry hostname for this account and region.
    pub fn registry_host(&self) -> String {
        format!("{}.dkr.ecr.{}.amazonaws.com", self.account_id, self.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_host_format() {
        let ctx = AwsContext {
            region: "eu-west-2".to_string(),
            account_id: "422860057079".to_string(),
            profile: None,
        };
        assert_eq!(
            ctx.registry_host(),
            "422860057079.dkr.ecr.eu-west-2.amazonaws.com"
        );
    }
}
