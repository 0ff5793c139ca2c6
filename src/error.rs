use std::path::PathBuf;
use thiserror::Error;

/// 參數錯誤的結束碼（與原始腳本相同）
pub const EXIT_USAGE: u8 = 1;
/// 其他失敗的預設結束碼
pub const EXIT_FAILURE: u8 = 2;
/// Ctrl-C 中斷
pub const EXIT_INTERRUPTED: u8 = 130;

/// 預覽圖生成過程中可辨識的錯誤類別
#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("{0}")]
    Usage(String),

    #[error("無法解析 ffprobe 輸出（需要兩個數值）: {output:?}")]
    Probe { output: String },

    #[error("{tool} 執行失敗（{}）: {stderr}", describe_status(.status))]
    ExternalTool {
        tool: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("{tool} 未產生輸出檔案: {}", .path.display())]
    MissingOutput { tool: String, path: PathBuf },

    #[error("{message}: {}", .path.display())]
    Filesystem { message: String, path: PathBuf },

    #[error("操作已中斷")]
    Interrupted,
}

impl PreviewError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    pub fn filesystem(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Filesystem {
            message: message.into(),
            path: path.into(),
        }
    }

    /// 對應的程序結束碼
    ///
    /// 外部工具失敗時沿用工具本身的結束碼，讓呼叫端看到與直接執行 ffmpeg 相同的狀態。
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => EXIT_USAGE,
            Self::Interrupted => EXIT_INTERRUPTED,
            Self::ExternalTool {
                status: Some(code), ..
            } => u8::try_from(*code)
                .ok()
                .filter(|c| *c != 0)
                .unwrap_or(EXIT_FAILURE),
            _ => EXIT_FAILURE,
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    status.map_or_else(
        || "無結束碼，可能被信號終止".to_string(),
        |code| format!("exit code {code}"),
    )
}
