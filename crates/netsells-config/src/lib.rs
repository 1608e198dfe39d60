//! Netsells CLI の設定解決
//!
//! 値の解決は常に固定の優先順位で行う:
//! CLI フラグ（clap が環境変数フォールバックも吸収する）→
//! `.netsells.yml` のドット区切りキー → ハードコードされたデフォルト。
//! どの経路でも必ず値が返る（空文字も正当なデフォルト）。

pub mod error;

pub use error::*;

use std::path::Path;

/// カレントディレクトリで探す設定ファイル名
pub const NETSELLS_FILE_NAME: &str = ".netsells.yml";

/// デフォルトの AWS リージョン
pub const DEFAULT_AWS_REGION: &str = "eu-west-2";

/// デフォルトの AWS アカウント ID
pub const DEFAULT_AWS_ACCOUNT_ID: &str = "422860057079";

/// 値がどのレイヤーから来たか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Flag,
    File,
    Default,
}

/// 解決済みの設定値と、その出所
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub value: T,
    pub source: Provenance,
}

/// `.netsells.yml` の読み込み済みドキュメント
///
/// ファイルが存在しない場合は空ドキュメントとして扱う。スキーマは
/// 持たず、`docker.aws.region` のようなドット区切りパスで参照する。
#[derive(Debug, Default, Clone)]
pub struct NetsellsFile {
    doc: Option<serde_yaml::Value>,
}

impl NetsellsFile {
    /// 指定ディレクトリから `.netsells.yml` を読み込む
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(NETSELLS_FILE_NAME);

        if !path.exists() {
            tracing::debug!("No {} found in {}", NETSELLS_FILE_NAME, dir.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let doc: serde_yaml::Value = serde_yaml::from_str(&content)?;

        Ok(Self { doc: Some(doc) })
    }

    /// カレントディレクトリから読み込む
    pub fn load() -> Result<Self> {
        Self::load_from(&std::env::current_dir()?)
    }

    /// ドット区切りパスの値を文字列として取得
    ///
    /// YAML 上で数値や真偽値として書かれたスカラー（クォートなしの
    /// アカウント ID など）は文字列に変換して返す。
    pub fn get_string(&self, path: &str) -> Option<String> {
        match self.lookup(path)? {
            serde_yaml::Value::String(s) => Some(s.clone()),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            serde_yaml::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// ドット区切りパスの値を文字列リストとして取得
    pub fn get_string_list(&self, path: &str) -> Vec<String> {
        let Some(serde_yaml::Value::Sequence(seq)) = self.lookup(path) else {
            return Vec::new();
        };

        seq.iter()
            .filter_map(|v| match v {
                serde_yaml::Value::String(s) => Some(s.clone()),
                serde_yaml::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect()
    }

    fn lookup(&self, path: &str) -> Option<&serde_yaml::Value> {
        let mut current = self.doc.as_ref()?;

        for segment in path.split('.') {
            current = current.get(segment)?;
        }

        Some(current)
    }
}

/// スカラー値を解決する
///
/// 空でないフラグ値が常に勝つ。次に設定ファイル、最後にデフォルト。
pub fn resolve_string(
    flag: Option<&str>,
    file: &NetsellsFile,
    file_path: Option<&str>,
    default: &str,
) -> Resolved<String> {
    if let Some(value) = flag
        && !value.is_empty()
    {
        tracing::debug!("Resolved from flag: {}", value);
        return Resolved {
            value: value.to_string(),
            source: Provenance::Flag,
        };
    }

    if let Some(path) = file_path
        && let Some(value) = file.get_string(path)
        && !value.is_empty()
    {
        tracing::debug!("Resolved {} from {}: {}", path, NETSELLS_FILE_NAME, value);
        return Resolved {
            value,
            source: Provenance::File,
        };
    }

    tracing::debug!("Falling back to default: {:?}", default);
    Resolved {
        value: default.to_string(),
        source: Provenance::Default,
    }
}

/// リスト値を解決する
///
/// 優先順位はスカラーと同じ。「空でない」は要素が 1 つ以上あること。
/// ファイルパス未指定・未定義の場合は空リスト。
pub fn resolve_list(
    flag: &[String],
    file: &NetsellsFile,
    file_path: Option<&str>,
) -> Resolved<Vec<String>> {
    if !flag.is_empty() {
        return Resolved {
            value: flag.to_vec(),
            source: Provenance::Flag,
        };
    }

    if let Some(path) = file_path {
        let values = file.get_string_list(path);
        if !values.is_empty() {
            return Resolved {
                value: values,
                source: Provenance::File,
            };
        }
    }

    Resolved {
        value: Vec::new(),
        source: Provenance::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn file_with(content: &str) -> NetsellsFile {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(NETSELLS_FILE_NAME), content).unwrap();
        NetsellsFile::load_from(dir.path()).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let file = NetsellsFile::load_from(dir.path()).unwrap();
        assert_eq!(file.get_string("docker.aws.region"), None);
        assert!(file.get_string_list("docker.services").is_empty());
    }

    #[test]
    fn test_get_string_nested_path() {
        let file = file_with("docker:\n  aws:\n    region: eu-west-1\n");
        assert_eq!(
            file.get_string("docker.aws.region"),
            Some("eu-west-1".to_string())
        );
        assert_eq!(file.get_string("docker.aws.missing"), None);
    }

    #[test]
    fn test_get_string_coerces_numeric_scalar() {
        // クォートなしのアカウント ID は YAML 上は数値になる
        let file = file_with("docker:\n  aws:\n    account-id: 123456789012\n");
        assert_eq!(
            file.get_string("docker.aws.account-id"),
            Some("123456789012".to_string())
        );
    }

    #[test]
    fn test_get_string_list() {
        let file = file_with("docker:\n  services:\n    - api\n    - worker\n");
        assert_eq!(
            file.get_string_list("docker.services"),
            vec!["api".to_string(), "worker".to_string()]
        );
    }

    #[test]
    fn test_resolve_string_flag_wins_over_file_and_default() {
        let file = file_with("docker:\n  aws:\n    region: from-file\n");
        let resolved = resolve_string(
            Some("from-flag"),
            &file,
            Some("docker.aws.region"),
            "from-default",
        );
        assert_eq!(resolved.value, "from-flag");
        assert_eq!(resolved.source, Provenance::Flag);
    }

    #[test]
    fn test_resolve_string_empty_flag_falls_through_to_file() {
        let file = file_with("docker:\n  aws:\n    region: from-file\n");
        let resolved = resolve_string(
            Some(""),
            &file,
            Some("docker.aws.region"),
            "from-default",
        );
        assert_eq!(resolved.value, "from-file");
        assert_eq!(resolved.source, Provenance::File);
    }

    #[test]
    fn test_resolve_string_default_when_flag_and_file_absent() {
        let file = NetsellsFile::default();
        let resolved = resolve_string(None, &file, Some("docker.aws.region"), "eu-west-2");
        assert_eq!(resolved.value, "eu-west-2");
        assert_eq!(resolved.source, Provenance::Default);
    }

    #[test]
    fn test_resolve_string_empty_default_is_legal() {
        let file = NetsellsFile::default();
        let resolved = resolve_string(None, &file, None, "");
        assert_eq!(resolved.value, "");
        assert_eq!(resolved.source, Provenance::Default);
    }

    #[test]
    fn test_resolve_list_flag_wins() {
        let file = file_with("docker:\n  services:\n    - from-file\n");
        let flag = vec!["api".to_string(), "worker".to_string()];
        let resolved = resolve_list(&flag, &file, Some("docker.services"));
        assert_eq!(resolved.value, flag);
        assert_eq!(resolved.source, Provenance::Flag);
    }

    #[test]
    fn test_resolve_list_file_when_flag_empty() {
        let file = file_with("docker:\n  services:\n    - api\n");
        let resolved = resolve_list(&[], &file, Some("docker.services"));
        assert_eq!(resolved.value, vec!["api".to_string()]);
        assert_eq!(resolved.source, Provenance::File);
    }

    #[test]
    fn test_resolve_list_empty_without_file_path() {
        let file = NetsellsFile::default();
        let resolved = resolve_list(&[], &file, None);
        assert!(resolved.value.is_empty());
        assert_eq!(resolved.source, Provenance::Default);
    }
}
