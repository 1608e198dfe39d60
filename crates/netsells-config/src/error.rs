use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(".netsells.yml の解析に失敗しました: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
