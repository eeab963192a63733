use crate::core::resolver::InputRequest;
use crate::domain::model::{InputMode, TargetKind};
use crate::utils::error::Result;
use clap::{ArgGroup, Parser};

#[derive(Debug, Clone, Parser)]
#[command(name = "crits-import")]
#[command(about = "Import domains and malware samples into a CRITs instance")]
#[command(group(ArgGroup::new("target").required(true).args(["domain", "sample"])))]
pub struct CliConfig {
    /// Submit a domain (or a list of domains with --list)
    #[arg(short, long, value_name = "VALUE")]
    pub domain: Option<String>,

    /// Submit a sample file (or a list / folder of samples)
    #[arg(short, long, value_name = "VALUE")]
    pub sample: Option<String>,

    /// Treat the value as a file containing a newline/comma separated list
    #[arg(short, long)]
    pub list: bool,

    /// Treat the value as a folder (samples only)
    #[arg(short, long)]
    pub folder: bool,

    /// Do not split domain list lines on commas
    #[arg(long)]
    pub no_split: bool,

    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "crits_import.toml")]
    pub config: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn target(&self) -> (TargetKind, &str) {
        match (&self.domain, &self.sample) {
            (Some(domain), _) => (TargetKind::Domain, domain.as_str()),
            (None, Some(sample)) => (TargetKind::Sample, sample.as_str()),
            (None, None) => (TargetKind::Domain, ""),
        }
    }

    /// 把旗標組合轉成 InputRequest；list 與 folder 互斥
    pub fn input_request(&self) -> Result<InputRequest> {
        let mode = InputMode::from_flags(self.list, self.folder)?;
        let (kind, argument) = self.target();
        Ok(InputRequest::new(kind, argument, mode).with_split_fields(!self.no_split))
    }
}
