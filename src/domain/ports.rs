use crate::domain::model::SubmitOutcome;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// CRITs 提交端點。每次呼叫都是獨立的，不保留任何狀態。
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit_domain(&self, domain: &str) -> Result<SubmitOutcome>;
    async fn submit_sample(&self, path: &Path) -> Result<SubmitOutcome>;
}
