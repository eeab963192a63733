use std::fmt;
use std::path::PathBuf;

/// 要送進 CRITs 的指標類型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Domain,
    Sample,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Domain => write!(f, "domain"),
            TargetKind::Sample => write!(f, "sample"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Single,
    List,
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionUnit {
    Domain(String),
    Sample(PathBuf),
    /// 資料夾模式下找到的 zip，需要先解壓再逐一提交
    Archive(PathBuf),
}

/// CRITs `file_format` 欄位只接受 zip、rar、raw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Zip,
    Rar,
    Raw,
}

impl FileFormat {
    pub fn from_mime(mime: &str) -> Self {
        match mime.trim().to_ascii_lowercase().as_str() {
            "application/zip" | "application/gzip" | "application/x-7z-compressed" => {
                FileFormat::Zip
            }
            "application/x-rar-compressed" | "application/vnd.rar" => FileFormat::Rar,
            _ => FileFormat::Raw,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Zip => "zip",
            FileFormat::Rar => "rar",
            FileFormat::Raw => "raw",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 讀入記憶體、雜湊並判斷類型後的樣本
#[derive(Debug, Clone)]
pub struct SampleFile {
    pub path: PathBuf,
    pub content: Vec<u8>,
    pub md5: String,
    pub mime: String,
    pub format: FileFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Accepted { response: serde_json::Value },
    /// MIME 類型在黑名單中，沒有送出任何請求
    Skipped { mime: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub accepted: usize,
    pub failed: usize,
    pub skipped: usize,
    pub archives_expanded: usize,
    pub archives_failed: usize,
}

impl ImportSummary {
    pub fn attempted(&self) -> usize {
        self.accepted + self.failed
    }
}
