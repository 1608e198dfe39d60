mod checks;
mod commands;
mod docker;
mod git;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use netsells_config::NetsellsFile;

#[derive(Parser)]
#[command(name = "netsells")]
#[command(about = "Easily manage apps and infrastructure", long_about = None)]
struct Cli {
    /// ログ詳細度 (0-3)。3 は取得した ECR トークンも出力する
    #[arg(
        short = 'v',
        long = "verbosity",
        global = true,
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=3)
    )]
    verbosity: u8,

    #[command(subcommand)]
    command: Commands,
}

/// AWS 共通フラグ（全コマンドで同じ解決順: フラグ → 環境変数 →
/// .netsells.yml → デフォルト）
#[derive(Args)]
pub struct AwsArgs {
    /// Override the default AWS region
    #[arg(long = "aws-region", env = "NETSELLS_AWS_REGION")]
    pub aws_region: Option<String>,

    /// Override the default AWS account ID
    #[arg(long = "aws-account-id", env = "NETSELLS_AWS_ACCOUNT_ID")]
    pub aws_account_id: Option<String>,

    /// Override the AWS profile to use
    #[arg(long = "aws-profile", env = "NETSELLS_AWS_PROFILE")]
    pub aws_profile: Option<String>,
}

/// タグとビルド対象のフラグ
#[derive(Args)]
pub struct TagArgs {
    /// The tag that should be built with the images. Defaults to the current commit SHA
    #[arg(long, env = "NETSELLS_TAG")]
    pub tag: Option<String>,

    /// The tag prefix that should be built with the images
    #[arg(long = "tag-prefix", env = "NETSELLS_TAG_PREFIX")]
    pub tag_prefix: Option<String>,

    /// The destination environment for the images
    #[arg(long, env = "NETSELLS_ENVIRONMENT")]
    pub environment: Option<String>,

    /// The services that should be built. Not defining this will build all services
    #[arg(long, env = "NETSELLS_SERVICES", value_delimiter = ',')]
    pub services: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Builds docker-compose ready for prod
    #[command(name = "docker:build")]
    DockerBuild {
        #[command(flatten)]
        aws: AwsArgs,
        #[command(flatten)]
        tags: TagArgs,
    },
    /// Logs into docker via the AWS account
    #[command(name = "docker:aws:login")]
    DockerAwsLogin {
        #[command(flatten)]
        aws: AwsArgs,
    },
    /// Pushes docker-compose built images to ECR
    #[command(name = "docker:aws:push")]
    DockerAwsPush {
        #[command(flatten)]
        aws: AwsArgs,
        #[command(flatten)]
        tags: TagArgs,
    },
}

/// --verbosity をログレベルに対応付ける。RUST_LOG が設定されていれば
/// そちらを優先する
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbosity);

    // 設定ファイルは起動時に一度だけ読み込み、以降は不変の文脈として
    // 各コマンドへ引き回す。壊れたファイルは警告して空として扱う
    let file = match NetsellsFile::load() {
        Ok(file) => file,
        Err(e) => {
            eprintln!("{} {}", "Warning:".yellow().bold(), e);
            NetsellsFile::default()
        }
    };

    match &cli.command {
        Commands::DockerBuild { aws, tags } => commands::build::handle(&file, aws, tags).await,
        Commands::DockerAwsLogin { aws } => commands::login::handle(&file, aws).await,
        Commands::DockerAwsPush { aws, tags } => commands::push::handle(&file, aws, tags).await,
    }
}
