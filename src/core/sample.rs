use crate::domain::model::{FileFormat, SampleFile};
use crate::utils::error::Result;
use md5::{Digest, Md5};
use std::path::Path;

pub const EMPTY_MIME: &str = "application/x-empty";
pub const TEXT_MIME: &str = "text/plain";
pub const BINARY_MIME: &str = "application/octet-stream";

pub fn md5_hex(content: &[u8]) -> String {
    hex::encode(Md5::digest(content))
}

/// 依內容 (不是副檔名) 判斷 MIME 類型
pub fn sniff_mime(content: &[u8]) -> String {
    if content.is_empty() {
        return EMPTY_MIME.to_string();
    }

    match infer::get(content) {
        Some(kind) => kind.mime_type().to_string(),
        None if std::str::from_utf8(content).is_ok() => TEXT_MIME.to_string(),
        None => BINARY_MIME.to_string(),
    }
}

impl SampleFile {
    pub fn from_bytes(path: &Path, content: Vec<u8>) -> Self {
        let md5 = md5_hex(&content);
        let mime = sniff_mime(&content);
        let format = FileFormat::from_mime(&mime);

        Self {
            path: path.to_path_buf(),
            content,
            md5,
            mime,
            format,
        }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read(path).await?;
        Ok(Self::from_bytes(path, content))
    }

    pub fn is_blacklisted(&self, blacklist: &[String]) -> bool {
        blacklist
            .iter()
            .any(|mime| mime.eq_ignore_ascii_case(&self.mime))
    }
}
