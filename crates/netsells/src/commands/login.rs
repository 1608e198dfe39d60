//! docker:aws:login — docker クライアントを ECR に認証させる

use crate::{AwsArgs, checks};
use colored::Colorize;
use netsells_config::NetsellsFile;

pub async fn handle(file: &NetsellsFile, aws: &AwsArgs) -> anyhow::Result<()> {
    checks::require_binaries(&["docker"])?;

    let ctx = super::aws_context(aws, file);

    println!("{}", "Logging into docker".blue());
    if let Err(e) = netsells_aws::ecr::authenticate_docker(&ctx).await {
        eprintln!("{}", e.to_string().red());
        anyhow::bail!("docker login failed");
    }

    println!("{}", "Successfully logged into docker".green());
    Ok(())
}
