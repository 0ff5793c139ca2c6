use std::ffi::OsString;
use std::path::Path;

/// 所有 ffmpeg 呼叫共用的前置參數
///
/// `-y` 讓強制重建時直接覆寫，`-nostdin` 避免等待終端輸入。
const COMMON_ARGS: [&str; 5] = ["-hide_banner", "-nostdin", "-loglevel", "error", "-y"];

fn with_common_args() -> Vec<OsString> {
    COMMON_ARGS.iter().map(OsString::from).collect()
}

fn push_args(args: &mut Vec<OsString>, values: &[&str]) {
    args.extend(values.iter().map(OsString::from));
}

/// 單張代表幀：ffmpeg `thumbnail` 濾鏡挑選代表幀後等比縮放到指定寬度
#[must_use]
pub fn thumbnail_args(video_path: &Path, output_path: &Path, width: u32, threads: u32) -> Vec<OsString> {
    let mut args = with_common_args();
    args.push("-i".into());
    args.push(video_path.into());
    push_args(
        &mut args,
        &[
            "-vf",
            &format!("thumbnail,scale={width}:-1"),
            "-frames:v",
            "1",
            "-threads",
            &threads.to_string(),
        ],
    );
    args.push(output_path.into());
    args
}

/// 幀選取運算式：幀編號等於任一指定編號時選取
///
/// 逗號需跳脫，否則會被濾鏡圖解析為濾鏡分隔符。
#[must_use]
pub fn select_expression(indices: &[u64]) -> String {
    let terms: Vec<String> = indices.iter().map(|i| format!(r"eq(n\,{i})")).collect();
    format!("select={}", terms.join("+"))
}

/// 一次擷取多張指定幀，以可變幀率輸出，只寫出被選取的幀
#[must_use]
pub fn sampled_frames_args(video_path: &Path, indices: &[u64], frame_pattern: &Path) -> Vec<OsString> {
    let mut args = with_common_args();
    args.push("-i".into());
    args.push(video_path.into());
    push_args(
        &mut args,
        &["-vf", &select_expression(indices), "-fps_mode", "vfr"],
    );
    args.push(frame_pattern.into());
    args
}

/// 依序讀入暫存幀並以 `tile` 濾鏡排成網格，不縮放
#[must_use]
pub fn tile_args(frame_pattern: &Path, output_path: &Path, cols: u32, rows: u32) -> Vec<OsString> {
    let mut args = with_common_args();
    args.push("-i".into());
    args.push(frame_pattern.into());
    push_args(
        &mut args,
        &["-vf", &format!("tile={cols}x{rows}"), "-frames:v", "1"],
    );
    args.push(output_path.into());
    args
}
