use crate::core::archive::ArchiveExpander;
use crate::domain::model::{ImportSummary, SubmissionUnit, SubmitOutcome, TargetKind};
use crate::domain::ports::Submitter;
use crate::utils::error::{ImportError, Result};
use std::path::Path;
use std::time::Duration;

/// 依序處理每個提交單位。單一單位失敗只記錄日誌，只有設定錯誤會中斷整批。
pub struct Importer<S: Submitter> {
    submitter: S,
    expander: ArchiveExpander,
    delay: Duration,
}

impl<S: Submitter> Importer<S> {
    pub fn new(submitter: S, expander: ArchiveExpander, delay: Duration) -> Self {
        Self {
            submitter,
            expander,
            delay,
        }
    }

    #[cfg(test)]
    pub(crate) fn submitter(&self) -> &S {
        &self.submitter
    }

    /// 設定類的致命錯誤會中止整批；其他單位錯誤只記錄並繼續
    pub async fn run(&self, units: &[SubmissionUnit]) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();
        tracing::info!("Importing {} submission units", units.len());

        for unit in units {
            match unit {
                SubmissionUnit::Domain(domain) => {
                    let result = self.submitter.submit_domain(domain).await;
                    self.finish_attempt(TargetKind::Domain, domain, result, &mut summary)
                        .await?;
                }
                SubmissionUnit::Sample(path) => self.submit_sample(path, &mut summary).await?,
                SubmissionUnit::Archive(path) => {
                    self.expand_and_submit(path, &mut summary).await?
                }
            }
        }

        tracing::info!(
            "Import finished: {} attempted, {} accepted, {} failed, {} skipped, {} archives expanded, {} archives failed",
            summary.attempted(),
            summary.accepted,
            summary.failed,
            summary.skipped,
            summary.archives_expanded,
            summary.archives_failed
        );
        Ok(summary)
    }

    async fn submit_sample(&self, path: &Path, summary: &mut ImportSummary) -> Result<()> {
        let result = self.submitter.submit_sample(path).await;
        let label = path.display().to_string();
        self.finish_attempt(TargetKind::Sample, &label, result, summary)
            .await
    }

    /// 解壓後逐一提交；`extracted` 離開作用域時暫存資料夾即被刪除
    async fn expand_and_submit(&self, archive: &Path, summary: &mut ImportSummary) -> Result<()> {
        let extracted = match self.expander.extract(archive) {
            Ok(extracted) => extracted,
            Err(e) => {
                tracing::warn!("Could not expand zip file {}: {}", archive.display(), e);
                summary.archives_failed += 1;
                return Ok(());
            }
        };
        summary.archives_expanded += 1;
        tracing::debug!(
            "Expanded {} into {} ({} files)",
            archive.display(),
            extracted.path().display(),
            extracted.files().len()
        );

        for file in extracted.files() {
            self.submit_sample(file, summary).await?;
        }
        Ok(())
    }

    async fn finish_attempt(
        &self,
        kind: TargetKind,
        label: &str,
        result: Result<SubmitOutcome>,
        summary: &mut ImportSummary,
    ) -> Result<()> {
        let reached_network = match &result {
            Ok(SubmitOutcome::Skipped { .. }) | Err(ImportError::IoError(_)) => false,
            Ok(SubmitOutcome::Accepted { .. }) => true,
            Err(e) => !e.is_fatal(),
        };

        match result {
            Ok(SubmitOutcome::Accepted { response }) => {
                tracing::info!(
                    "Submitted {} {} to CRITs, response was {}",
                    kind,
                    label,
                    response
                );
                summary.accepted += 1;
            }
            Ok(SubmitOutcome::Skipped { mime }) => {
                tracing::debug!("Skipped {} {}: MIME type {} is blacklisted", kind, label, mime);
                summary.skipped += 1;
            }
            Err(e) if e.is_fatal() => {
                tracing::error!("❌ Aborting import at {} {}: {}", kind, label, e);
                return Err(e);
            }
            Err(e) => {
                tracing::warn!("Submission of {} {} failed: {}", kind, label, e);
                summary.failed += 1;
            }
        }

        if reached_network && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(())
    }
}
