use std::path::PathBuf;

/// 預設快取資料夾名稱（位於使用者快取目錄下）
pub const CACHE_DIR_NAME: &str = "dired-preview";
pub const DEFAULT_FFMPEG: &str = "ffmpeg";
pub const DEFAULT_FFPROBE: &str = "ffprobe";

/// 單張預覽圖的輸出寬度，高度依比例縮放
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 640;
/// 交給 ffmpeg 的執行緒數量
pub const DEFAULT_FFMPEG_THREADS: u32 = 4;
pub const DEFAULT_TILE_COLS: u32 = 2;
pub const DEFAULT_TILE_ROWS: u32 = 2;

/// 執行期設定，啟動時解析一次後傳給 `PreviewGenerator`
#[derive(Debug, Clone)]
pub struct Config {
    /// 預覽圖輸出資料夾，必須已存在
    pub cache_dir: PathBuf,
    /// 暫存幀的上層資料夾，每次執行會在其中建立獨立子資料夾
    pub temp_root: PathBuf,
    pub ffmpeg: String,
    pub ffprobe: String,
    pub thumbnail_width: u32,
    pub ffmpeg_threads: u32,
    pub tile_cols: u32,
    pub tile_rows: u32,
    /// 預覽圖已存在時直接沿用
    pub reuse_cached: bool,
}

impl Config {
    /// 以指定的快取資料夾建立設定，其餘欄位使用預設值
    #[must_use]
    pub fn with_cache_dir(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            temp_root: std::env::temp_dir(),
            ffmpeg: DEFAULT_FFMPEG.to_string(),
            ffprobe: DEFAULT_FFPROBE.to_string(),
            thumbnail_width: DEFAULT_THUMBNAIL_WIDTH,
            ffmpeg_threads: DEFAULT_FFMPEG_THREADS,
            tile_cols: DEFAULT_TILE_COLS,
            tile_rows: DEFAULT_TILE_ROWS,
            reuse_cached: true,
        }
    }

    /// 取樣幀數等於網格格數
    #[must_use]
    pub const fn tile_cells(&self) -> usize {
        (self.tile_cols * self.tile_rows) as usize
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_cache_dir(Self::default_cache_dir())
    }
}
