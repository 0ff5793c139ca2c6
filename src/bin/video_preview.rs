//! 單張預覽圖：`video-preview <video_path>`

use std::process::ExitCode;
use video_preview_hook::cli;
use video_preview_hook::component::PreviewMode;

fn main() -> ExitCode {
    cli::main(PreviewMode::SingleFrame)
}
