//! docker:build — compose イメージを本番向けにビルドする

use crate::{AwsArgs, TagArgs, checks, docker, git};
use colored::Colorize;
use netsells_config::{self as config, NetsellsFile};

pub async fn handle(file: &NetsellsFile, aws: &AwsArgs, tags: &TagArgs) -> anyhow::Result<()> {
    // タグが確定できなければ、外部ツールに触れる前に打ち切る
    let tag = effective_tag(file, tags).await?;

    checks::require_binaries(&["docker"])?;
    checks::require_files(&docker::COMPOSE_FILES)?;

    let services = config::resolve_list(&tags.services, file, Some("docker.services"));
    let ctx = super::aws_context(aws, file);

    println!("{}", "Logging into docker".blue());
    if let Err(e) = netsells_aws::ecr::authenticate_docker(&ctx).await {
        eprintln!("{}", e.to_string().red());
        anyhow::bail!("docker login failed");
    }

    let compose = docker::Compose::new();
    docker::build_all(&compose, &tag, &services.value).await?;

    println!("{}", "Docker images built.".green());
    Ok(())
}

/// 生タグ（フラグ / NETSELLS_TAG、なければ git の SHA）を解決し、
/// 接頭辞・環境名の方針を適用する
pub(crate) async fn effective_tag(file: &NetsellsFile, tags: &TagArgs) -> anyhow::Result<String> {
    let raw_tag = match tags.tag.as_deref() {
        Some(tag) if !tag.is_empty() => tag.to_string(),
        _ => git::current_sha().await,
    };

    if raw_tag.is_empty() {
        eprintln!(
            "{}",
            "No tag set or available from git. Cannot proceed.".red()
        );
        anyhow::bail!("no tag available");
    }

    let tag_prefix = config::resolve_string(tags.tag_prefix.as_deref(), file, None, "");
    let environment = config::resolve_string(tags.environment.as_deref(), file, None, "");

    Ok(docker::prefixed_tag(
        &raw_tag,
        &tag_prefix.value,
        &environment.value,
    ))
}
