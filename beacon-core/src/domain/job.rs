//! Job domain types
//!
//! A job is a unit of scheduled work on the node. Every job has exactly one
//! specialization, selected by its [`JobType`], and a pipeline described as
//! DOT source.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::resource::Jaid;

/// Job record as presented by the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub identity: Jaid,
    pub name: String,
    pub spec: JobSpec,
    pub pipeline: PipelineSpec,
}

impl Job {
    /// Type tag of this job, `None` when the node sent an unrecognized one
    pub fn job_type(&self) -> Option<JobType> {
        self.spec.job_type()
    }
}

/// Closed set of job specializations the node supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    DirectRequest,
    FluxMonitor,
    OffChainReporting,
    Keeper,
    Cron,
    Webhook,
}

impl JobType {
    pub const ALL: [JobType; 6] = [
        JobType::DirectRequest,
        JobType::FluxMonitor,
        JobType::OffChainReporting,
        JobType::Keeper,
        JobType::Cron,
        JobType::Webhook,
    ];

    /// Canonical display string, as used by the node API
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::DirectRequest => "directrequest",
            JobType::FluxMonitor => "fluxmonitor",
            JobType::OffChainReporting => "offchainreporting",
            JobType::Keeper => "keeper",
            JobType::Cron => "cron",
            JobType::Webhook => "webhook",
        }
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown job type: {0:?}")]
pub struct UnknownJobType(pub String);

impl std::str::FromStr for JobType {
    type Err = UnknownJobType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobType::ALL
            .into_iter()
            .find(|job_type| job_type.as_str() == s)
            .ok_or_else(|| UnknownJobType(s.to_string()))
    }
}

/// Type-specific payload of a job
///
/// The variant is the job's type tag. A payload is `None` when the node
/// reported the type but not its spec record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JobSpec {
    DirectRequest(Option<DirectRequestSpec>),
    FluxMonitor(Option<FluxMonitorSpec>),
    OffChainReporting(Option<OffChainReportingSpec>),
    Keeper(Option<KeeperSpec>),
    Cron(Option<CronSpec>),
    Webhook(Option<WebhookSpec>),
    /// Tag not known to this client, kept verbatim. Build from a raw tag
    /// with [`JobSpec::from_tag`] so a known tag never ends up here.
    Unknown(String),
}

impl JobSpec {
    /// Tagged variant with no payload
    pub fn absent(job_type: JobType) -> Self {
        match job_type {
            JobType::DirectRequest => JobSpec::DirectRequest(None),
            JobType::FluxMonitor => JobSpec::FluxMonitor(None),
            JobType::OffChainReporting => JobSpec::OffChainReporting(None),
            JobType::Keeper => JobSpec::Keeper(None),
            JobType::Cron => JobSpec::Cron(None),
            JobType::Webhook => JobSpec::Webhook(None),
        }
    }

    /// Payload-less spec for a raw type tag; unrecognized tags become
    /// [`JobSpec::Unknown`]
    pub fn from_tag(tag: &str) -> Self {
        match tag.parse::<JobType>() {
            Ok(job_type) => Self::absent(job_type),
            Err(unknown) => JobSpec::Unknown(unknown.0),
        }
    }

    pub fn job_type(&self) -> Option<JobType> {
        match self {
            JobSpec::DirectRequest(_) => Some(JobType::DirectRequest),
            JobSpec::FluxMonitor(_) => Some(JobType::FluxMonitor),
            JobSpec::OffChainReporting(_) => Some(JobType::OffChainReporting),
            JobSpec::Keeper(_) => Some(JobType::Keeper),
            JobSpec::Cron(_) => Some(JobType::Cron),
            JobSpec::Webhook(_) => Some(JobType::Webhook),
            JobSpec::Unknown(_) => None,
        }
    }

    /// Type tag as displayed; unknown tags are shown as received
    pub fn type_name(&self) -> &str {
        match self {
            JobSpec::Unknown(tag) => tag.as_str(),
            known => known.job_type().map_or("", |job_type| job_type.as_str()),
        }
    }

    /// Creation time of the payload
    pub fn created_at(&self) -> CreatedAt {
        let created_at = match self {
            JobSpec::DirectRequest(spec) => spec.as_ref().map(|s| s.created_at),
            JobSpec::FluxMonitor(spec) => spec.as_ref().map(|s| s.created_at),
            JobSpec::OffChainReporting(spec) => spec.as_ref().map(|s| s.created_at),
            JobSpec::Keeper(spec) => spec.as_ref().map(|s| s.created_at),
            JobSpec::Cron(spec) => spec.as_ref().map(|s| s.created_at),
            JobSpec::Webhook(spec) => spec.as_ref().map(|s| s.created_at),
            JobSpec::Unknown(_) => return CreatedAt::UnknownType,
        };
        created_at.map_or(CreatedAt::Absent, CreatedAt::At)
    }

    /// Type-specific fields worth showing in a detail view
    pub fn details(&self) -> Vec<(&'static str, String)> {
        match self {
            JobSpec::DirectRequest(Some(spec)) => {
                vec![("Contract", spec.contract_address.clone())]
            }
            JobSpec::FluxMonitor(Some(spec)) => vec![
                ("Contract", spec.contract_address.clone()),
                ("Threshold", spec.threshold.to_string()),
                ("Abs. Threshold", spec.absolute_threshold.to_string()),
                ("Poll Timer", spec.poll_timer_period.clone()),
                ("Idle Timer", spec.idle_timer_period.clone()),
            ],
            JobSpec::OffChainReporting(Some(spec)) => {
                let mut details = vec![
                    ("Contract", spec.contract_address.clone()),
                    ("Bootstrap", spec.is_bootstrap_peer.to_string()),
                ];
                if let Some(transmitter) = &spec.transmitter_address {
                    details.push(("Transmitter", transmitter.clone()));
                }
                details
            }
            JobSpec::Keeper(Some(spec)) => vec![
                ("Contract", spec.contract_address.clone()),
                ("From", spec.from_address.clone()),
            ],
            JobSpec::Cron(Some(spec)) => vec![("Schedule", spec.schedule.clone())],
            _ => Vec::new(),
        }
    }
}

/// Outcome of resolving a job's creation time through its specialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatedAt {
    At(DateTime<FixedOffset>),
    /// Known type, spec record not populated
    Absent,
    UnknownType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectRequestSpec {
    #[serde(default)]
    pub contract_address: String,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FluxMonitorSpec {
    #[serde(default)]
    pub contract_address: String,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default)]
    pub absolute_threshold: f64,
    #[serde(default)]
    pub poll_timer_period: String,
    #[serde(default)]
    pub idle_timer_period: String,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffChainReportingSpec {
    #[serde(default)]
    pub contract_address: String,
    #[serde(default)]
    pub is_bootstrap_peer: bool,
    #[serde(default)]
    pub transmitter_address: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeeperSpec {
    #[serde(default)]
    pub contract_address: String,
    #[serde(default)]
    pub from_address: String,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronSpec {
    #[serde(default)]
    pub schedule: String,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookSpec {
    pub created_at: DateTime<FixedOffset>,
}

/// Pipeline of a job, as DOT source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSpec {
    #[serde(default)]
    pub dot_dag_source: String,
}

impl PipelineSpec {
    pub fn new(dot_dag_source: impl Into<String>) -> Self {
        Self {
            dot_dag_source: dot_dag_source.into(),
        }
    }
}
