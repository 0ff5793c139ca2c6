//! 影片預覽圖生成元件
//!
//! 兩種模式：
//! - 單張：ffmpeg `thumbnail` 濾鏡挑選代表幀
//! - 拼貼：ffprobe 取得幀數，擷取四張取樣幀後以 `tile` 濾鏡合併為 2x2

mod ffmpeg_command;
mod frame_selector;
mod main;

pub use ffmpeg_command::{sampled_frames_args, select_expression, thumbnail_args, tile_args};
pub use frame_selector::select_sample_frames;
pub use main::{PreviewGenerator, PreviewMode, PreviewOutcome};
