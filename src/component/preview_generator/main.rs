use super::ffmpeg_command::{sampled_frames_args, thumbnail_args, tile_args};
use super::frame_selector::select_sample_frames;
use crate::config::Config;
use crate::error::PreviewError;
use crate::signal::is_shutdown_requested;
use crate::tools::{
    FingerprintScope, TempFrameDir, ToolOutput, ToolRunner, VideoMetadata, calculate_fingerprint,
    parse_probe_output, probe_args, validate_directory_exists, validate_file_exists,
};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 預覽圖模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewMode {
    /// 單張代表幀
    SingleFrame,
    /// 四張取樣幀拼成 2x2
    Tiled,
}

impl PreviewMode {
    /// 單張模式只雜湊檔案開頭，拼貼模式雜湊整個檔案
    #[must_use]
    pub const fn fingerprint_scope(self) -> FingerprintScope {
        match self {
            Self::SingleFrame => FingerprintScope::Prefix,
            Self::Tiled => FingerprintScope::Full,
        }
    }
}

/// 單次生成結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOutcome {
    pub output_path: PathBuf,
    pub fingerprint: String,
    /// 沿用既有快取，未呼叫外部工具
    pub reused: bool,
}

/// 預覽圖生成器
///
/// 流程：
/// 1. 計算內容指紋，決定輸出檔名
/// 2. 快取已存在則直接回傳
/// 3. 單張模式：ffmpeg 挑選代表幀並縮放
/// 4. 拼貼模式：ffprobe 取得幀數 → 選取四個幀編號 → 擷取到暫存資料夾 → 合併為網格
pub struct PreviewGenerator<R> {
    config: Config,
    runner: R,
    shutdown_signal: Arc<AtomicBool>,
}

impl<R: ToolRunner> PreviewGenerator<R> {
    pub const fn new(config: Config, runner: R, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            runner,
            shutdown_signal,
        }
    }

    pub fn generate(&self, video_path: &Path, mode: PreviewMode) -> Result<PreviewOutcome> {
        validate_file_exists(video_path)?;
        validate_directory_exists(&self.config.cache_dir)?;

        let fingerprint = calculate_fingerprint(video_path, mode.fingerprint_scope())
            .with_context(|| format!("無法計算指紋: {}", video_path.display()))?;
        let output_path = self.config.preview_path(&fingerprint);
        debug!(
            "{} → {} ({mode:?})",
            video_path.display(),
            output_path.display()
        );

        if self.config.reuse_cached && is_non_empty_file(&output_path) {
            info!("沿用既有預覽圖: {}", output_path.display());
            return Ok(PreviewOutcome {
                output_path,
                fingerprint,
                reused: true,
            });
        }

        // ffmpeg 先寫到同資料夾的暫存檔，成功後才取代正式檔案，失敗時舊預覽圖不受影響
        let staging_path = staging_path(&output_path);
        let result = match mode {
            PreviewMode::SingleFrame => self.extract_frame(video_path, &staging_path),
            PreviewMode::Tiled => self.generate_tiled(video_path, &fingerprint, &staging_path),
        }
        .and_then(|()| {
            fs::rename(&staging_path, &output_path).map_err(|e| {
                anyhow::Error::from(PreviewError::filesystem(
                    format!("無法寫入預覽圖（{e}）"),
                    &output_path,
                ))
            })
        });

        if let Err(e) = result {
            remove_partial_output(&staging_path);
            return Err(e);
        }

        info!("預覽圖已建立: {}", output_path.display());
        Ok(PreviewOutcome {
            output_path,
            fingerprint,
            reused: false,
        })
    }

    fn extract_frame(&self, video_path: &Path, output_path: &Path) -> Result<()> {
        let args = thumbnail_args(
            video_path,
            output_path,
            self.config.thumbnail_width,
            self.config.ffmpeg_threads,
        );
        self.run_tool(&self.config.ffmpeg, &args, video_path)?;
        ensure_output(&self.config.ffmpeg, output_path)?;
        Ok(())
    }

    fn generate_tiled(&self, video_path: &Path, fingerprint: &str, output_path: &Path) -> Result<()> {
        let metadata = self.probe_metadata(video_path)?;

        let indices = select_sample_frames(metadata.frame_count, self.config.tile_cells());
        debug!("取樣幀編號: {indices:?}");

        // 離開此函式時（含錯誤路徑）由 Drop 清理
        let temp_dir = TempFrameDir::create(&self.config.temp_root, fingerprint)?;

        self.run_tool(
            &self.config.ffmpeg,
            &sampled_frames_args(video_path, &indices, &temp_dir.frame_pattern()),
            video_path,
        )?;

        let frames = temp_dir.frames();
        if frames.is_empty() {
            return Err(PreviewError::MissingOutput {
                tool: self.config.ffmpeg.clone(),
                path: temp_dir.frame_pattern(),
            }
            .into());
        }
        if frames.len() < indices.len() {
            warn!(
                "只擷取到 {} 張幀（要求 {} 張），影片幀數過少",
                frames.len(),
                indices.len()
            );
        }

        self.run_tool(
            &self.config.ffmpeg,
            &tile_args(
                &temp_dir.frame_pattern(),
                output_path,
                self.config.tile_cols,
                self.config.tile_rows,
            ),
            video_path,
        )?;
        ensure_output(&self.config.ffmpeg, output_path)?;

        let removed = temp_dir.cleanup();
        debug!("已清理 {removed} 張暫存幀");
        Ok(())
    }

    /// 使用 ffprobe 取得影片幀數與長度
    fn probe_metadata(&self, video_path: &Path) -> Result<VideoMetadata> {
        let output = self.run_tool(&self.config.ffprobe, &probe_args(video_path), video_path)?;
        let metadata = parse_probe_output(&output.stdout)?;
        debug!(
            "影片資訊 {}: {} 幀, {:.2}s",
            video_path.display(),
            metadata.frame_count,
            metadata.duration_seconds
        );
        Ok(metadata)
    }

    /// 執行外部工具：先檢查中斷旗標，再檢查結束碼
    fn run_tool(&self, program: &str, args: &[OsString], video_path: &Path) -> Result<ToolOutput> {
        let output = self
            .runner
            .run(program, args)
            .with_context(|| format!("無法執行 {program}: {}", video_path.display()))?;
        self.check_shutdown()?;
        output.ensure_success(program)?;
        Ok(output)
    }

    fn check_shutdown(&self) -> Result<(), PreviewError> {
        if is_shutdown_requested(&self.shutdown_signal) {
            return Err(PreviewError::Interrupted);
        }
        Ok(())
    }
}

/// 快取命中與輸出檢查共用：存在且非空的一般檔案
fn is_non_empty_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_file() && m.len() > 0)
}

/// 與正式輸出同資料夾的暫存輸出檔，保留 `.png` 讓 ffmpeg 推斷格式
fn staging_path(output_path: &Path) -> PathBuf {
    let stem = output_path
        .file_stem()
        .map_or_else(|| "preview".to_string(), |s| s.to_string_lossy().into_owned());
    output_path.with_file_name(format!(".{stem}.{}.partial.png", uuid::Uuid::new_v4()))
}

/// 工具回報成功但沒有輸出檔時視為失敗
fn ensure_output(tool: &str, path: &Path) -> Result<(), PreviewError> {
    if !is_non_empty_file(path) {
        return Err(PreviewError::MissingOutput {
            tool: tool.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// 失敗時移除暫存輸出檔的半成品
fn remove_partial_output(path: &Path) {
    if path.exists() {
        match fs::remove_file(path) {
            Ok(()) => debug!("已移除不完整的預覽圖: {}", path.display()),
            Err(e) => warn!("無法移除不完整的預覽圖 {}: {e}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_scope_per_mode() {
        assert_eq!(
            PreviewMode::SingleFrame.fingerprint_scope(),
            FingerprintScope::Prefix
        );
        assert_eq!(PreviewMode::Tiled.fingerprint_scope(), FingerprintScope::Full);
    }

    #[test]
    fn test_ensure_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        assert!(ensure_output("ffmpeg", &path).is_err());

        fs::write(&path, b"").unwrap();
        assert!(ensure_output("ffmpeg", &path).is_err());

        fs::write(&path, b"png").unwrap();
        assert!(ensure_output("ffmpeg", &path).is_ok());
    }

    #[test]
    fn test_staging_path_beside_output() {
        let output = Path::new("/cache/0123abcd.png");
        let first = staging_path(output);
        let second = staging_path(output);

        assert_eq!(first.parent(), Some(Path::new("/cache")));
        assert_ne!(first, second);
        let name = first.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".0123abcd."));
        assert!(name.ends_with(".partial.png"));
    }

    #[test]
    fn test_is_non_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        assert!(!is_non_empty_file(&path));
        fs::write(&path, b"").unwrap();
        assert!(!is_non_empty_file(&path));
        fs::write(&path, b"png").unwrap();
        assert!(is_non_empty_file(&path));
        assert!(!is_non_empty_file(dir.path()));
    }

    #[test]
    fn test_remove_partial_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        fs::write(&path, b"partial").unwrap();
        remove_partial_output(&path);
        assert!(!path.exists());
        // 不存在時不做任何事
        remove_partial_output(&path);
    }
}
