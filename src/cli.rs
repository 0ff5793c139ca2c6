use crate::component::{PreviewGenerator, PreviewMode, PreviewOutcome};
use crate::config::{Config, ConfigOverrides};
use crate::error::{EXIT_FAILURE, PreviewError};
use crate::init;
use crate::signal::setup_shutdown_signal;
use crate::tools::SystemToolRunner;
use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use console::style;
use log::{error, warn};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 為影片產生預覽圖，輸出至快取資料夾並以內容指紋命名
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// 影片檔案路徑
    pub video_path: PathBuf,

    /// 預覽圖快取資料夾（必須已存在），預設為 <使用者快取目錄>/dired-preview
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// 暫存幀的上層資料夾，預設為系統暫存目錄
    #[arg(long, value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// ffmpeg 執行檔
    #[arg(long, value_name = "PROGRAM")]
    pub ffmpeg: Option<String>,

    /// ffprobe 執行檔
    #[arg(long, value_name = "PROGRAM")]
    pub ffprobe: Option<String>,

    /// 即使預覽圖已存在也重新產生
    #[arg(short, long)]
    pub force: bool,

    /// 輸出除錯日誌
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub fn config(&self) -> Config {
        Config::resolve(ConfigOverrides {
            cache_dir: self.cache_dir.clone(),
            temp_dir: self.temp_dir.clone(),
            ffmpeg: self.ffmpeg.clone(),
            ffprobe: self.ffprobe.clone(),
            force: self.force,
        })
    }
}

/// 兩個執行檔共用的進入點
#[must_use]
pub fn main(mode: PreviewMode) -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let err = usage_error(&e);
            eprint!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };

    init::init(cli.verbose);

    match run(&cli, mode) {
        Ok(outcome) => {
            print_outcome(&outcome, mode);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("預覽圖生成失敗 {}: {e:#}", cli.video_path.display());
            eprintln!("{} {e:#}", style("錯誤:").red().bold());
            ExitCode::from(exit_code_for(&e))
        }
    }
}

/// clap 的參數錯誤（含用法說明）轉為 `PreviewError::Usage`
#[must_use]
pub fn usage_error(err: &clap::Error) -> PreviewError {
    PreviewError::usage(err.render().to_string())
}

fn run(cli: &Cli, mode: PreviewMode) -> Result<PreviewOutcome> {
    let shutdown_signal = setup_shutdown_signal().unwrap_or_else(|e| {
        warn!("{e:#}");
        Arc::new(AtomicBool::new(false))
    });

    let generator = PreviewGenerator::new(cli.config(), SystemToolRunner, shutdown_signal);
    generator.generate(&cli.video_path, mode)
}

fn print_outcome(outcome: &PreviewOutcome, mode: PreviewMode) {
    let label = match (mode, outcome.reused) {
        (_, true) => "沿用既有預覽圖",
        (PreviewMode::SingleFrame, false) => "單張預覽圖已建立",
        (PreviewMode::Tiled, false) => "拼貼預覽圖已建立",
    };
    println!(
        "{} {label}: {}",
        style("✓").green(),
        outcome.output_path.display()
    );
}

/// 依錯誤鏈中第一個 `PreviewError` 決定結束碼
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<PreviewError>())
        .map_or(EXIT_FAILURE, PreviewError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::path::Path;

    #[test]
    fn test_parse_single_path() {
        let cli = Cli::try_parse_from(["video-preview", "/videos/a.mp4"]).unwrap();
        assert_eq!(cli.video_path, PathBuf::from("/videos/a.mp4"));
        assert!(!cli.force);
        assert!(cli.config().reuse_cached);
    }

    #[test]
    fn test_parse_rejects_wrong_argument_count() {
        let err = Cli::try_parse_from(["video-preview"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        assert!(Cli::try_parse_from(["video-preview", "a.mp4", "b.mp4"]).is_err());
    }

    #[test]
    fn test_usage_error_from_clap() {
        let err = Cli::try_parse_from(["video-preview"]).unwrap_err();
        let usage = usage_error(&err);

        assert!(matches!(usage, PreviewError::Usage(_)));
        assert_eq!(usage.exit_code(), crate::error::EXIT_USAGE);
        assert!(usage.to_string().contains("Usage"));
    }

    #[test]
    fn test_parse_options_into_config() {
        let cli = Cli::try_parse_from([
            "video-preview-tile",
            "--cache-dir",
            "/srv/previews",
            "--ffprobe",
            "/opt/bin/ffprobe",
            "--force",
            "a.mp4",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.cache_dir, Path::new("/srv/previews"));
        assert_eq!(config.ffprobe, "/opt/bin/ffprobe");
        assert_eq!(config.ffmpeg, "ffmpeg");
        assert!(!config.reuse_cached);
    }

    #[test]
    fn test_exit_code_for_wrapped_error() {
        let err = anyhow::Error::from(PreviewError::Probe {
            output: "N/A".to_string(),
        })
        .context("無法讀取影片資訊");
        assert_eq!(exit_code_for(&err), EXIT_FAILURE);

        let err: anyhow::Error = Err::<(), _>(PreviewError::ExternalTool {
            tool: "ffmpeg".to_string(),
            status: Some(183),
            stderr: String::new(),
        })
        .context("無法執行 ffmpeg")
        .unwrap_err();
        assert_eq!(exit_code_for(&err), 183);

        assert_eq!(exit_code_for(&anyhow::anyhow!("其他錯誤")), EXIT_FAILURE);
    }
}
