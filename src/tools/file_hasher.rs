use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// 讀取區塊大小
pub const BLOCK_SIZE: usize = 4096;
/// 部分指紋最多讀取的區塊數
pub const PREFIX_BLOCK_LIMIT: usize = 100;
/// 部分指紋涵蓋的位元組數（100 × 4096）
pub const PREFIX_BYTES: u64 = (BLOCK_SIZE * PREFIX_BLOCK_LIMIT) as u64;
/// 指紋長度：BLAKE3 輸出截斷為 128 位元，即 32 個十六進位字元
pub const FINGERPRINT_HEX_LEN: usize = 32;

/// 指紋涵蓋範圍
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerprintScope {
    /// 只讀前 `PREFIX_BYTES` 位元組，大檔案也很快
    Prefix,
    /// 讀取整個檔案
    Full,
}

/// 計算檔案內容指紋（小寫十六進位）
pub fn calculate_fingerprint(path: &Path, scope: FingerprintScope) -> Result<String> {
    let file = File::open(path).with_context(|| format!("無法開啟檔案: {}", path.display()))?;
    let reader = BufReader::with_capacity(BLOCK_SIZE, file);

    match scope {
        FingerprintScope::Prefix => hash_reader(reader.take(PREFIX_BYTES), path),
        FingerprintScope::Full => hash_reader(reader, path),
    }
}

fn hash_reader(mut reader: impl Read, path: &Path) -> Result<String> {
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; BLOCK_SIZE];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .with_context(|| format!("讀取檔案失敗: {}", path.display()))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let hex = hasher.finalize().to_hex();
    Ok(hex.as_str()[..FINGERPRINT_HEX_LEN].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, SeekFrom, Write};
    use tempfile::NamedTempFile;

    fn write_temp(content: &[u8]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    fn patterned(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_fingerprint_format() {
        let temp_file = write_temp(b"test content");

        for scope in [FingerprintScope::Prefix, FingerprintScope::Full] {
            let hash = calculate_fingerprint(temp_file.path(), scope).unwrap();
            assert_eq!(hash.len(), FINGERPRINT_HEX_LEN);
            assert!(
                hash.chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
            );
        }
    }

    #[test]
    fn test_fingerprint_deterministic() {
        let temp_file = write_temp(&patterned(500_000));

        for scope in [FingerprintScope::Prefix, FingerprintScope::Full] {
            let first = calculate_fingerprint(temp_file.path(), scope).unwrap();
            let second = calculate_fingerprint(temp_file.path(), scope).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_small_file_scopes_agree() {
        // 小於前綴長度時兩種範圍讀到的內容相同
        let temp_file = write_temp(b"identical content");

        let prefix = calculate_fingerprint(temp_file.path(), FingerprintScope::Prefix).unwrap();
        let full = calculate_fingerprint(temp_file.path(), FingerprintScope::Full).unwrap();
        assert_eq!(prefix, full);
    }

    #[test]
    fn test_prefix_ignores_bytes_after_limit() {
        let base = patterned(PREFIX_BYTES as usize);
        let mut temp_file = write_temp(&base);
        let before = calculate_fingerprint(temp_file.path(), FingerprintScope::Prefix).unwrap();

        temp_file.write_all(&patterned(10_000)).unwrap();
        temp_file.flush().unwrap();
        let after = calculate_fingerprint(temp_file.path(), FingerprintScope::Prefix).unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn test_prefix_detects_change_inside_limit() {
        let mut content = patterned(PREFIX_BYTES as usize + 4096);
        let original = write_temp(&content);

        content[PREFIX_BYTES as usize - 1] ^= 0xff;
        let modified = write_temp(&content);

        let a = calculate_fingerprint(original.path(), FingerprintScope::Prefix).unwrap();
        let b = calculate_fingerprint(modified.path(), FingerprintScope::Prefix).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_full_detects_change_anywhere() {
        let content = patterned(PREFIX_BYTES as usize * 2);
        let mut temp_file = write_temp(&content);
        let before_full = calculate_fingerprint(temp_file.path(), FingerprintScope::Full).unwrap();
        let before_prefix =
            calculate_fingerprint(temp_file.path(), FingerprintScope::Prefix).unwrap();

        // 修改最後一個位元組
        temp_file.seek(SeekFrom::End(-1)).unwrap();
        temp_file.write_all(&[content[content.len() - 1] ^ 0xff]).unwrap();
        temp_file.flush().unwrap();

        let after_full = calculate_fingerprint(temp_file.path(), FingerprintScope::Full).unwrap();
        let after_prefix =
            calculate_fingerprint(temp_file.path(), FingerprintScope::Prefix).unwrap();

        assert_ne!(before_full, after_full);
        assert_eq!(before_prefix, after_prefix);
    }

    #[test]
    fn test_missing_file() {
        let result = calculate_fingerprint(
            Path::new("/nonexistent/video.mp4"),
            FingerprintScope::Full,
        );
        assert!(result.is_err());
    }
}
