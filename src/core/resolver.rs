use crate::domain::model::{InputMode, SubmissionUnit, TargetKind};
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::Validate;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 命令列參數整理後的輸入描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRequest {
    pub kind: TargetKind,
    pub argument: String,
    pub mode: InputMode,
    /// 網域清單是否以逗號切分每一行
    pub split_fields: bool,
}

impl InputRequest {
    pub fn new(kind: TargetKind, argument: impl Into<String>, mode: InputMode) -> Self {
        Self {
            kind,
            argument: argument.into(),
            mode,
            split_fields: true,
        }
    }

    pub fn with_split_fields(mut self, split_fields: bool) -> Self {
        self.split_fields = split_fields;
        self
    }
}

impl InputMode {
    pub fn from_flags(list: bool, folder: bool) -> Result<Self> {
        match (list, folder) {
            (true, true) => Err(ImportError::InvalidArgumentsError {
                message: "Must select a list (-l), a folder (-f), or nothing".to_string(),
            }),
            (true, false) => Ok(InputMode::List),
            (false, true) => Ok(InputMode::Folder),
            (false, false) => Ok(InputMode::Single),
        }
    }
}

impl Validate for InputRequest {
    fn validate(&self) -> Result<()> {
        if self.kind == TargetKind::Domain && self.mode == InputMode::Folder {
            return Err(ImportError::InvalidArgumentsError {
                message: "Must select a list (-l) or nothing for domains; folders are only supported for samples".to_string(),
            });
        }

        if self.argument.trim().is_empty() {
            return Err(ImportError::InvalidArgumentsError {
                message: format!("Missing {} argument", self.kind),
            });
        }

        Ok(())
    }
}

/// 把輸入展開成依序提交的單位。清單或資料夾無法讀取時直接回傳錯誤。
pub fn resolve(request: &InputRequest) -> Result<Vec<SubmissionUnit>> {
    request.validate()?;

    match (request.kind, request.mode) {
        (TargetKind::Domain, InputMode::Single) => {
            Ok(vec![SubmissionUnit::Domain(request.argument.trim().to_string())])
        }
        (TargetKind::Sample, InputMode::Single) => Ok(vec![SubmissionUnit::Sample(
            absolute(Path::new(request.argument.trim()))?,
        )]),
        (TargetKind::Domain, InputMode::List) => {
            let entries = read_list(Path::new(&request.argument), request.split_fields)?;
            Ok(entries.into_iter().map(SubmissionUnit::Domain).collect())
        }
        // 檔案路徑可能含逗號，樣本清單一律一行一個
        (TargetKind::Sample, InputMode::List) => {
            let entries = read_list(Path::new(&request.argument), false)?;
            entries
                .iter()
                .map(|entry| absolute(Path::new(entry)).map(SubmissionUnit::Sample))
                .collect()
        }
        (_, InputMode::Folder) => walk_folder(Path::new(&request.argument)),
    }
}

/// 讀取換行 (或逗號) 分隔的清單，略過空白行與空欄位
pub fn read_list(path: &Path, split_fields: bool) -> Result<Vec<String>> {
    if !split_fields {
        let content = std::fs::read_to_string(path)?;
        return Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        entries.extend(
            record
                .iter()
                .map(|field| field.trim_matches(|c: char| c == '"' || c == '\'').trim())
                .filter(|field| !field.is_empty())
                .map(str::to_string),
        );
    }

    Ok(entries)
}

/// 遞迴列出資料夾下所有一般檔案；`*.zip` 會改成解壓單位
pub fn walk_folder(folder: &Path) -> Result<Vec<SubmissionUnit>> {
    let root = absolute(folder)?;
    if !std::fs::metadata(&root)?.is_dir() {
        return Err(ImportError::InvalidArgumentsError {
            message: format!("{} is not a directory", root.display()),
        });
    }

    let mut units = Vec::new();
    for entry in WalkDir::new(&root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        if is_zip_archive(&path) {
            tracing::debug!("Found zip file: {}", path.display());
            units.push(SubmissionUnit::Archive(path));
        } else {
            tracing::debug!("Found file: {}", path.display());
            units.push(SubmissionUnit::Sample(path));
        }
    }

    Ok(units)
}

pub fn is_zip_archive(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".zip"))
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(path)?)
}
