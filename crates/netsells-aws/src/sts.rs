//! STS caller identity
//!
//! Used for informational output only; failures are logged and swallowed.

use aws_config::SdkConfig;
use aws_sdk_sts::error::DisplayErrorContext;

/// The ARN of the current caller, or an empty string if it cannot be
/// resolved. Best-effort by design.
pub async fn caller_arn(config: &SdkConfig) -> String {
    let client = aws_sdk_sts::Client::new(config);

    match client.get_caller_identity().send().await {
        Ok(output) => output.arn().unwrap_or_default().to_string(),
        Err(e) => {
            tracing::debug!(
                "Failed to get caller identity: {}",
                DisplayErrorContext(&e)
            );
            String::new()
        }
    }
}
