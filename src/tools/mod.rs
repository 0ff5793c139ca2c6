mod ffprobe_info;
mod file_hasher;
mod path_validator;
mod temp_frames;
mod tool_runner;

pub use ffprobe_info::{VideoMetadata, parse_probe_output, probe_args};
pub use file_hasher::{
    BLOCK_SIZE, FINGERPRINT_HEX_LEN, FingerprintScope, PREFIX_BLOCK_LIMIT, PREFIX_BYTES,
    calculate_fingerprint,
};
pub use path_validator::{validate_directory_exists, validate_file_exists};
pub use temp_frames::{FRAME_PATTERN, TempFrameDir};
pub use tool_runner::{SystemToolRunner, ToolOutput, ToolRunner};
