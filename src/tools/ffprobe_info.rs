use crate::error::PreviewError;
use std::ffi::OsString;
use std::path::Path;

/// 影片串流資訊（僅取樣所需欄位）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoMetadata {
    pub frame_count: f64,
    pub duration_seconds: f64,
}

/// ffprobe 參數：只查詢第一個視訊串流的長度與幀數，輸出純數值
#[must_use]
pub fn probe_args(path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "-v",
        "error",
        "-select_streams",
        "v:0",
        "-show_entries",
        "stream=duration,nb_frames",
        "-of",
        "default=noprint_wrappers=1:nokey=1",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    args.push(path.as_os_str().to_os_string());
    args
}

/// 解析 ffprobe 的純文字輸出
///
/// ffprobe 依串流欄位的固定順序輸出，與 `-show_entries` 的書寫順序無關：
/// 先 `duration`，後 `nb_frames`。必須剛好是兩個數值。
pub fn parse_probe_output(stdout: &str) -> Result<VideoMetadata, PreviewError> {
    let probe_error = || PreviewError::Probe {
        output: stdout.trim().to_string(),
    };

    let values = stdout
        .split_whitespace()
        .map(|token| token.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(probe_error)?;

    match values.as_slice() {
        [duration_seconds, frame_count] => Ok(VideoMetadata {
            frame_count: *frame_count,
            duration_seconds: *duration_seconds,
        }),
        _ => Err(probe_error()),
    }
}
