use crate::config::types::{CACHE_DIR_NAME, Config};
use std::path::PathBuf;

/// 命令列可覆寫的設定項目
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub cache_dir: Option<PathBuf>,
    pub temp_dir: Option<PathBuf>,
    pub ffmpeg: Option<String>,
    pub ffprobe: Option<String>,
    pub force: bool,
}

impl Config {
    /// 預設快取資料夾：`<使用者快取目錄>/dired-preview`
    ///
    /// 找不到使用者快取目錄時退回系統暫存目錄。
    #[must_use]
    pub fn default_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(CACHE_DIR_NAME)
    }

    /// 在預設值上套用命令列覆寫
    #[must_use]
    pub fn resolve(overrides: ConfigOverrides) -> Self {
        let mut config = overrides
            .cache_dir
            .map_or_else(Self::default, Self::with_cache_dir);

        if let Some(temp_dir) = overrides.temp_dir {
            config.temp_root = temp_dir;
        }
        if let Some(ffmpeg) = overrides.ffmpeg {
            config.ffmpeg = ffmpeg;
        }
        if let Some(ffprobe) = overrides.ffprobe {
            config.ffprobe = ffprobe;
        }
        config.reuse_cached = !overrides.force;

        config
    }

    /// 指紋對應的預覽圖路徑
    #[must_use]
    pub fn preview_path(&self, fingerprint: &str) -> PathBuf {
        self.cache_dir.join(format!("{fingerprint}.png"))
    }
}
