//! docker:aws:push — ビルド済みイメージを ECR にプッシュする

use crate::{AwsArgs, TagArgs, checks, docker};
use colored::Colorize;
use netsells_config::{self as config, NetsellsFile};

pub async fn handle(file: &NetsellsFile, aws: &AwsArgs, tags: &TagArgs) -> anyhow::Result<()> {
    let tag = super::build::effective_tag(file, tags).await?;

    checks::require_binaries(&["docker", "docker-compose"])?;
    checks::require_files(&docker::COMPOSE_FILES)?;

    let services = config::resolve_list(&tags.services, file, Some("docker.services"));
    let ctx = super::aws_context(aws, file);

    println!("{}", "Logging into docker".blue());
    if let Err(e) = netsells_aws::ecr::authenticate_docker(&ctx).await {
        eprintln!("{}", e.to_string().red());
        anyhow::bail!("docker login failed");
    }

    let compose = docker::Compose::new();
    docker::push_all(&compose, &tag, &services.value).await?;

    println!("{}", "Docker images pushed.".green());
    Ok(())
}
