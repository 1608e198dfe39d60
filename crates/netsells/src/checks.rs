//! コマンド実行前の前提条件チェック
//!
//! 欠けているものはまとめて報告し、外部プロセスを一切起動せずに
//! 失敗させる。

use colored::Colorize;
use std::path::Path;

/// PATH 上に実行ファイルが見つからない場合 true
pub fn is_missing_binary(binary: &str) -> bool {
    let Some(paths) = std::env::var_os("PATH") else {
        return true;
    };

    !std::env::split_paths(&paths).any(|dir| dir.join(binary).is_file())
}

/// カレントディレクトリ基準でファイルが存在しない場合 true
pub fn is_missing_file(file: &str) -> bool {
    !Path::new(file).exists()
}

/// 必須バイナリを確認し、欠けていればまとめて報告する
pub fn require_binaries(required: &[&str]) -> anyhow::Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|binary| is_missing_binary(binary))
        .collect();

    report_missing("binaries", &missing)
}

/// 必須ファイルを確認し、欠けていればまとめて報告する
pub fn require_files(required: &[&str]) -> anyhow::Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|file| is_missing_file(file))
        .collect();

    report_missing("files", &missing)
}

fn report_missing(kind: &str, missing: &[&str]) -> anyhow::Result<()> {
    if missing.is_empty() {
        return Ok(());
    }

    eprintln!(
        "{}",
        format!("Cannot run due to missing required {}:", kind).red()
    );
    for item in missing {
        eprintln!("  {}", item.red());
    }

    anyhow::bail!("missing required {}", kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_is_missing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(!is_missing_file(file.path().to_str().unwrap()));
        assert!(is_missing_file("/definitely/not/a/real/file.yml"));
    }

    #[cfg(unix)]
    #[test]
    fn test_is_missing_binary_scans_path() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("some-tool");
        fs::write(&binary, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&binary, fs::Permissions::from_mode(0o755)).unwrap();

        temp_env::with_var("PATH", Some(dir.path()), || {
            assert!(!is_missing_binary("some-tool"));
            assert!(is_missing_binary("some-other-tool"));
        });
    }

    #[test]
    fn test_require_files_reports_all_missing() {
        let err = require_files(&["/no/such/a.yml", "/no/such/b.yml"]).unwrap_err();
        assert!(err.to_string().contains("missing required files"));
    }
}
