use crate::error::PreviewError;
use std::path::Path;

/// 確認資料夾存在；快取資料夾不會自動建立
pub fn validate_directory_exists(path: &Path) -> Result<(), PreviewError> {
    if !path.exists() {
        return Err(PreviewError::filesystem("路徑不存在", path));
    }
    if !path.is_dir() {
        return Err(PreviewError::filesystem("路徑不是資料夾", path));
    }
    Ok(())
}

/// 確認輸入影片是一般檔案
pub fn validate_file_exists(path: &Path) -> Result<(), PreviewError> {
    if !path.is_file() {
        return Err(PreviewError::filesystem("找不到影片檔案", path));
    }
    Ok(())
}
