use env_logger::Env;

/// 初始化日誌
///
/// 預設只輸出 warn 以上，`verbose` 時提升到 debug；`RUST_LOG` 仍可覆寫。
/// 日誌寫到 stderr，stdout 只保留確認訊息。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    // 測試或重複呼叫時 logger 可能已初始化
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}
