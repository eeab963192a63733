use crate::config::ImporterConfig;
use crate::domain::model::{SampleFile, SubmitOutcome};
use crate::domain::ports::Submitter;
use crate::utils::error::{ImportError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use std::path::Path;

pub const USER_AGENT: &str = "crits_import";

#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub username: String,
    pub source: String,
}

/// CRITs REST API 用戶端 (domains 與 samples 兩個端點)
#[derive(Debug, Clone)]
pub struct CritsClient {
    client: Client,
    domains_url: String,
    samples_url: String,
    credentials: Credentials,
    blacklist: Vec<String>,
}

impl CritsClient {
    pub fn from_config(config: &ImporterConfig) -> Result<Self> {
        // CRITs 端點不驗證 TLS 憑證
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(true);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            domains_url: config.domains_url(),
            samples_url: config.samples_url(),
            credentials: Credentials {
                api_key: config.crits.key.clone(),
                username: config.crits.user.clone(),
                source: config.crits.source.clone(),
            },
            blacklist: config.blacklist(),
        })
    }

    fn sample_form(&self, sample: SampleFile) -> Form {
        let md5 = sample.md5;
        Form::new()
            .text("api_key", self.credentials.api_key.clone())
            .text("username", self.credentials.username.clone())
            .text("source", self.credentials.source.clone())
            .text("upload_type", "file")
            .text("md5", md5.clone())
            .text("file_format", sample.format.as_str())
            .part("filedata", Part::bytes(sample.content).file_name(md5))
    }
}

/// 只有 HTTP 200 算成功；回應不是 JSON 時保留原始文字
async fn read_response(url: &str, response: Response) -> Result<SubmitOutcome> {
    let status = response.status();
    if status != StatusCode::OK {
        return Err(ImportError::RejectedError {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    let response = match serde_json::from_str(&body) {
        Ok(json) => json,
        Err(_) => serde_json::Value::String(body),
    };
    Ok(SubmitOutcome::Accepted { response })
}

#[async_trait]
impl Submitter for CritsClient {
    async fn submit_domain(&self, domain: &str) -> Result<SubmitOutcome> {
        let params = [
            ("api_key", self.credentials.api_key.as_str()),
            ("username", self.credentials.username.as_str()),
            ("source", self.credentials.source.as_str()),
            ("domain", domain),
        ];

        tracing::debug!("POST {} (domain {})", self.domains_url, domain);
        let response = self
            .client
            .post(&self.domains_url)
            .form(&params)
            .send()
            .await?;

        read_response(&self.domains_url, response).await
    }

    async fn submit_sample(&self, path: &Path) -> Result<SubmitOutcome> {
        let sample = SampleFile::load(path).await?;
        tracing::debug!(
            "Sample {} md5={} mime={} format={}",
            path.display(),
            sample.md5,
            sample.mime,
            sample.format
        );

        if sample.is_blacklisted(&self.blacklist) {
            return Ok(SubmitOutcome::Skipped { mime: sample.mime });
        }

        tracing::debug!("POST {} (sample {})", self.samples_url, sample.md5);
        let response = self
            .client
            .post(&self.samples_url)
            .multipart(self.sample_form(sample))
            .send()
            .await?;

        read_response(&self.samples_url, response).await
    }
}
