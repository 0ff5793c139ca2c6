use crate::error::PreviewError;
use anyhow::Result;
use log::debug;
use std::ffi::OsString;
use std::process::Command;

/// 外部工具的執行結果
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// 結束碼；被信號終止時為 `None`
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.status, Some(0))
    }

    /// 非零結束時轉為 `PreviewError::ExternalTool`
    pub fn ensure_success(&self, tool: &str) -> Result<(), PreviewError> {
        if self.success() {
            return Ok(());
        }
        Err(PreviewError::ExternalTool {
            tool: tool.to_string(),
            status: self.status,
            stderr: self.stderr.trim().to_string(),
        })
    }
}

/// 呼叫 ffmpeg / ffprobe 的唯一入口
///
/// 其餘邏輯只依賴這個介面，測試時可以換成假的實作。
pub trait ToolRunner {
    fn run(&self, program: &str, args: &[OsString]) -> Result<ToolOutput>;
}

impl<T: ToolRunner + ?Sized> ToolRunner for &T {
    fn run(&self, program: &str, args: &[OsString]) -> Result<ToolOutput> {
        (**self).run(program, args)
    }
}

/// 以 `std::process::Command` 實際執行外部程式
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemToolRunner;

impl ToolRunner for SystemToolRunner {
    fn run(&self, program: &str, args: &[OsString]) -> Result<ToolOutput> {
        debug!("執行 {program} {args:?}");

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| PreviewError::ExternalTool {
                tool: program.to_string(),
                status: None,
                stderr: format!("無法啟動: {e}"),
            })?;

        Ok(ToolOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
