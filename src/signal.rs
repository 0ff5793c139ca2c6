use anyhow::{Context, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 攔截 Ctrl-C，讓程序不會直接結束而略過暫存檔清理
///
/// 子程序 ffmpeg 會收到同一個信號並自行結束，呼叫端在工具返回後檢查旗標即可。
pub fn setup_shutdown_signal() -> Result<Arc<AtomicBool>> {
    let shutdown_signal = Arc::new(AtomicBool::new(false));
    let signal_clone = Arc::clone(&shutdown_signal);

    ctrlc::set_handler(move || {
        signal_clone.store(true, Ordering::SeqCst);
        eprintln!("\n收到中斷信號，正在清理暫存檔...");
    })
    .context("無法設定 Ctrl-C 處理器")?;

    Ok(shutdown_signal)
}

#[must_use]
pub fn is_shutdown_requested(signal: &AtomicBool) -> bool {
    signal.load(Ordering::SeqCst)
}
