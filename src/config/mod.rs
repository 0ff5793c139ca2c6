pub mod load;
pub mod types;

pub use load::ConfigOverrides;
pub use types::{
    CACHE_DIR_NAME, Config, DEFAULT_FFMPEG_THREADS, DEFAULT_THUMBNAIL_WIDTH, DEFAULT_TILE_COLS,
    DEFAULT_TILE_ROWS,
};
