use crate::error::PreviewError;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// 暫存幀檔名前綴與副檔名，對應 ffmpeg 的 `output_frame_%04d.png`
const FRAME_PREFIX: &str = "output_frame_";
const FRAME_EXTENSION: &str = ".png";
const FRAME_DIGITS: usize = 4;
pub const FRAME_PATTERN: &str = "output_frame_%04d.png";

/// 單次執行專用的暫存幀資料夾
///
/// 資料夾名稱含指紋與隨機 UUID，並行執行不會互相覆寫。
/// 離開作用域時（包含錯誤路徑）會刪除所有暫存幀及資料夾本身。
#[derive(Debug)]
pub struct TempFrameDir {
    path: PathBuf,
}

impl TempFrameDir {
    pub fn create(root: &Path, fingerprint: &str) -> Result<Self, PreviewError> {
        let path = root.join(format!("video_preview_{fingerprint}_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&path)
            .map_err(|e| PreviewError::filesystem(format!("無法建立暫存資料夾（{e}）"), &path))?;
        debug!("暫存資料夾: {}", path.display());
        Ok(Self { path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 交給 ffmpeg 的輸出/輸入樣式路徑
    #[must_use]
    pub fn frame_pattern(&self) -> PathBuf {
        self.path.join(FRAME_PATTERN)
    }

    /// 目前存在的暫存幀，依編號排序
    #[must_use]
    pub fn frames(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(&self.path) else {
            return Vec::new();
        };

        let mut frames: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(is_frame_file_name)
            })
            .collect();
        frames.sort();
        frames
    }

    /// 刪除所有符合樣式的暫存幀，回傳成功刪除的數量
    ///
    /// 個別刪除失敗只記錄警告，不中斷流程。
    pub fn cleanup(&self) -> usize {
        let mut removed = 0;
        for frame in self.frames() {
            match fs::remove_file(&frame) {
                Ok(()) => removed += 1,
                Err(e) => warn!("無法刪除暫存幀 {}: {e}", frame.display()),
            }
        }
        removed
    }
}

impl Drop for TempFrameDir {
    fn drop(&mut self) {
        let removed = self.cleanup();
        debug!("已刪除 {removed} 張暫存幀");

        if self.path.exists() && fs::remove_dir_all(&self.path).is_err() {
            warn!("無法清理暫存資料夾: {}", self.path.display());
        }
    }
}

/// `output_frame_` + 四位以上數字 + `.png`
fn is_frame_file_name(name: &str) -> bool {
    name.strip_prefix(FRAME_PREFIX)
        .and_then(|rest| rest.strip_suffix(FRAME_EXTENSION))
        .is_some_and(|digits| {
            digits.len() >= FRAME_DIGITS && digits.chars().all(|c| c.is_ascii_digit())
        })
}
