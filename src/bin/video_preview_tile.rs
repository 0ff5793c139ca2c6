//! 2x2 拼貼預覽圖：`video-preview-tile <video_path>`

use std::process::ExitCode;
use video_preview_hook::cli;
use video_preview_hook::component::PreviewMode;

fn main() -> ExitCode {
    cli::main(PreviewMode::Tiled)
}
