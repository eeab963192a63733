pub mod archive;
pub mod client;
pub mod dns_log;
pub mod importer;
pub mod resolver;
pub mod sample;

pub use crate::domain::model::{
    FileFormat, ImportSummary, InputMode, SampleFile, SubmissionUnit, SubmitOutcome, TargetKind,
};
pub use crate::domain::ports::Submitter;
pub use crate::utils::error::Result;
