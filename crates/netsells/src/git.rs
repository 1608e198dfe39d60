//! git メタデータの取得

use netsells_process::Process;

/// 現在のコミット SHA を返す。リポジトリ外や git 不在なら空文字
/// （呼び出し側がタグ未指定として扱う）
pub async fn current_sha() -> String {
    let result = Process::new("git")
        .args(["log", "-1", "--pretty=format:%H"])
        .echo_on_failure(false)
        .run()
        .await;

    match result {
        Ok(output) => output.trim().to_string(),
        Err(_) => String::new(),
    }
}
