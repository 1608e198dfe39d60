//! タグ組み立てと docker-compose 呼び出し

use colored::Colorize;
use netsells_process::{OutputMode, Process, ProcessError};

/// ビルド・プッシュで常に渡す compose マニフェスト
pub const COMPOSE_FILES: [&str; 2] = ["docker-compose.yml", "docker-compose.prod.yml"];

/// 最終的なイメージタグを組み立てる
///
/// タグ接頭辞が非空ならそのまま連結し（区切りなし）、環境名による
/// 接頭辞より常に優先する。どちらも空なら生タグを変更せず返す。
pub fn prefixed_tag(tag: &str, tag_prefix: &str, environment: &str) -> String {
    if !tag_prefix.is_empty() {
        return format!("{}{}", tag_prefix, tag);
    }

    if !environment.is_empty() {
        return format!("{}-{}", environment, tag);
    }

    tag.to_string()
}

/// docker-compose の呼び出し
///
/// タグは CLI 引数ではなく環境変数 `TAG` で子プロセスへ渡す。
/// 出力は長時間ビルドの診断のため常にラインごとにストリームする。
pub struct Compose {
    program: String,
}

impl Compose {
    pub fn new() -> Self {
        Self {
            program: "docker-compose".to_string(),
        }
    }

    /// 呼び出すプログラムを差し替える（テスト用スタブなど）
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// 1 サービス（service = None なら全サービス）をビルドする
    pub async fn build(&self, tag: &str, service: Option<&str>) -> Result<(), ProcessError> {
        self.invocation(&["build", "--no-cache"], tag, service)
            .run()
            .await
            .map(|_| ())
    }

    /// ビルド済みイメージをプッシュする
    pub async fn push(&self, tag: &str, service: Option<&str>) -> Result<(), ProcessError> {
        self.invocation(&["push"], tag, service)
            .run()
            .await
            .map(|_| ())
    }

    fn invocation(&self, subcommand: &[&str], tag: &str, service: Option<&str>) -> Process {
        let mut process = Process::new(&self.program)
            .args(["-f", COMPOSE_FILES[0], "-f", COMPOSE_FILES[1]])
            .args(subcommand.iter().copied());

        if let Some(service) = service {
            process = process.arg(service);
        }

        process
            .env("TAG", tag)
            .output_mode(OutputMode::StreamedAndCaptured)
    }
}

impl Default for Compose {
    fn default() -> Self {
        Self::new()
    }
}

/// ビルド対象をリスト順に処理する。最初の失敗で残りを打ち切る
pub async fn build_all(compose: &Compose, tag: &str, services: &[String]) -> anyhow::Result<()> {
    if services.is_empty() {
        println!(
            "{}",
            format!("Building docker images for all services with tag {}", tag).blue()
        );

        if compose.build(tag, None).await.is_err() {
            eprintln!(
                "{}",
                "Unable to build all images, check the above output for reasons why.".red()
            );
            anyhow::bail!("docker build failed");
        }

        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Building docker images for services with tag {}: {}",
            tag,
            services.join(", ")
        )
        .blue()
    );

    for service in services {
        if compose.build(tag, Some(service)).await.is_err() {
            eprintln!(
                "{}",
                "Unable to build all images, check the above output for reasons why.".red()
            );
            anyhow::bail!("docker build failed for service {}", service);
        }
    }

    Ok(())
}

/// プッシュ対象をリスト順に処理する。最初の失敗で残りを打ち切る
pub async fn push_all(compose: &Compose, tag: &str, services: &[String]) -> anyhow::Result<()> {
    if services.is_empty() {
        println!(
            "{}",
            format!("Pushing docker images for all services with tag {}", tag).blue()
        );

        if compose.push(tag, None).await.is_err() {
            eprintln!(
                "{}",
                "Unable to push all images, check the above output for reasons why.".red()
            );
            anyhow::bail!("docker push failed");
        }

        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Pushing docker images for services with tag {}: {}",
            tag,
            services.join(", ")
        )
        .blue()
    );

    for service in services {
        if compose.push(tag, Some(service)).await.is_err() {
            eprintln!(
                "{}",
                "Unable to push all images, check the above output for reasons why.".red()
            );
            anyhow::bail!("docker push failed for service {}", service);
        }
    }

    Ok(())
}
