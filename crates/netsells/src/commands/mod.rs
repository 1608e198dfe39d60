pub mod build;
pub mod login;
pub mod push;

use crate::AwsArgs;
use netsells_aws::AwsContext;
use netsells_config::{self as config, NetsellsFile};

/// AWS 共通フラグを設定ファイル・デフォルトと突き合わせて解決する
pub fn aws_context(aws: &AwsArgs, file: &NetsellsFile) -> AwsContext {
    let region = config::resolve_string(
        aws.aws_region.as_deref(),
        file,
        Some("docker.aws.region"),
        config::DEFAULT_AWS_REGION,
    );

    let account_id = config::resolve_string(
        aws.aws_account_id.as_deref(),
        file,
        Some("docker.aws.account-id"),
        config::DEFAULT_AWS_ACCOUNT_ID,
    );

    let profile = config::resolve_string(aws.aws_profile.as_deref(), file, None, "");

    tracing::debug!(
        "AWS context: region={} ({:?}), account_id={} ({:?})",
        region.value,
        region.source,
        account_id.value,
        account_id.source,
    );

    AwsContext {
        region: region.value,
        account_id: account_id.value,
        profile: (!profile.value.is_empty()).then_some(profile.value),
    }
}
