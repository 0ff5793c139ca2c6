//! 取樣幀選取器
//!
//! 依總幀數把影片切成等分，取各分界點的幀編號。

/// 選取 `count` 個等距的幀編號
///
/// 公式：`interval = frame_count / (count + 1)`，`index[i] = floor(interval * i)`，i = 1..=count。
/// 四張時即 20% / 40% / 60% / 80% 位置。
/// 幀數少於 `count + 1` 時編號可能重複，不另外處理。
#[must_use]
pub fn select_sample_frames(frame_count: f64, count: usize) -> Vec<u64> {
    let interval = frame_count / (count + 1) as f64;

    (1..=count)
        .map(|i| {
            // 負值或 NaN 轉型後為 0
            (interval * i as f64).floor() as u64
        })
        .collect()
}
