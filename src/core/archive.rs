use crate::config::ImporterConfig;
use crate::utils::error::Result;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCRATCH_PREFIX: &str = "crits-import-";

/// 解壓後的內容。drop 時會刪除整個暫存資料夾。
#[derive(Debug)]
pub struct ExtractedArchive {
    dir: TempDir,
    files: Vec<PathBuf>,
}

impl ExtractedArchive {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

#[derive(Debug, Clone)]
pub struct ArchiveExpander {
    password: Vec<u8>,
    scratch_root: Option<PathBuf>,
}

impl ArchiveExpander {
    pub fn new(password: impl Into<Vec<u8>>) -> Self {
        Self {
            password: password.into(),
            scratch_root: None,
        }
    }

    pub fn from_config(config: &ImporterConfig) -> Self {
        Self::new(config.zip_password())
            .with_scratch_root(config.scratch_dir().map(Path::to_path_buf))
    }

    /// 指定暫存資料夾的上層目錄 (預設為系統暫存目錄)
    pub fn with_scratch_root(mut self, scratch_root: Option<PathBuf>) -> Self {
        self.scratch_root = scratch_root;
        self
    }

    fn scratch_dir(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX);

        let dir = match &self.scratch_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(dir)
    }

    /// 把 zip 解到專屬的暫存資料夾。任何錯誤都會在回傳前清掉暫存資料夾。
    pub fn extract(&self, archive: &Path) -> Result<ExtractedArchive> {
        let dir = self.scratch_dir()?;
        tracing::info!(
            "Extracting zip file {} to: {}",
            archive.display(),
            dir.path().display()
        );

        let mut zip = zip::ZipArchive::new(BufReader::new(File::open(archive)?))?;
        let mut files = Vec::with_capacity(zip.len());

        for index in 0..zip.len() {
            // 未加密的項目會忽略密碼
            let mut entry = zip.by_index_decrypt(index, &self.password)?;

            let Some(relative) = entry.enclosed_name() else {
                tracing::warn!(
                    "Skipping entry with unsafe path in {}: {}",
                    archive.display(),
                    entry.name()
                );
                continue;
            };

            let target = dir.path().join(relative);
            if entry.is_dir() {
                fs::create_dir_all(&target)?;
                continue;
            }

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut output = File::create(&target)?;
            std::io::copy(&mut entry, &mut output)?;
            files.push(target);
        }

        tracing::debug!("Extracted {} files from {}", files.len(), archive.display());
        Ok(ExtractedArchive { dir, files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::unstable::write::FileOptionsExt;
    use zip::write::{FileOptions, SimpleFileOptions, ZipWriter};

    fn write_zip(path: &Path, entries: &[(&str, &[u8])], password: Option<&'static [u8]>) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        for (name, content) in entries {
            match password {
                Some(password) => zip
                    .start_file(
                        *name,
                        SimpleFileOptions::default().with_deprecated_encryption(password),
                    )
                    .unwrap(),
                None => zip
                    .start_file::<_, ()>(*name, FileOptions::default())
                    .unwrap(),
            }
            zip.write_all(content).unwrap();
        }
        zip.finish().unwrap();
    }

    fn scratch_entries(root: &Path) -> usize {
        fs::read_dir(root).unwrap().count()
    }

    #[test]
    fn test_extract_plain_archive() {
        let work = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let archive = work.path().join("b.zip");
        write_zip(
            &archive,
            &[
                ("one.txt", b"first".as_slice()),
                ("nested/two.bin", b"\x00\x01second".as_slice()),
            ],
            None,
        );

        let expander =
            ArchiveExpander::new("infected").with_scratch_root(Some(scratch.path().to_path_buf()));
        let extracted = expander.extract(&archive).unwrap();

        assert_eq!(extracted.files().len(), 2);
        assert!(extracted.path().starts_with(scratch.path()));
        assert_eq!(
            fs::read(extracted.path().join("one.txt")).unwrap(),
            b"first".to_vec()
        );
        assert!(extracted.path().join("nested/two.bin").is_file());

        let extracted_dir = extracted.path().to_path_buf();
        drop(extracted);
        assert!(!extracted_dir.exists());
        assert_eq!(scratch_entries(scratch.path()), 0);
    }

    #[test]
    fn test_extract_encrypted_archive() {
        let work = TempDir::new().unwrap();
        let archive = work.path().join("sample.zip");
        write_zip(
            &archive,
            &[("dropper.exe", b"MZ\x90\x00".as_slice())],
            Some(b"infected".as_slice()),
        );

        let extracted = ArchiveExpander::new("infected").extract(&archive).unwrap();
        assert_eq!(
            fs::read(&extracted.files()[0]).unwrap(),
            b"MZ\x90\x00".to_vec()
        );
    }

    #[test]
    fn test_wrong_password_cleans_scratch() {
        let work = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let archive = work.path().join("sample.zip");
        write_zip(
            &archive,
            &[("dropper.exe", b"MZ\x90\x00".as_slice())],
            Some(b"infected".as_slice()),
        );

        let expander = ArchiveExpander::new("not-the-password")
            .with_scratch_root(Some(scratch.path().to_path_buf()));
        assert!(expander.extract(&archive).is_err());
        assert_eq!(scratch_entries(scratch.path()), 0);
    }

    #[test]
    fn test_corrupt_archive_cleans_scratch() {
        let work = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let archive = work.path().join("broken.zip");
        fs::write(&archive, b"PK\x03\x04 definitely not a zip").unwrap();

        let expander =
            ArchiveExpander::new("infected").with_scratch_root(Some(scratch.path().to_path_buf()));
        assert!(expander.extract(&archive).is_err());
        assert_eq!(scratch_entries(scratch.path()), 0);
    }

    #[test]
    fn test_from_config_uses_defaults() {
        let config = ImporterConfig::default();
        let expander = ArchiveExpander::from_config(&config);
        assert_eq!(expander.password, b"infected".to_vec());
        assert!(expander.scratch_root.is_none());
    }
}
