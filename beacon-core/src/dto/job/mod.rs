//! Job DTOs as served by the node's JSON:API endpoints

use serde::{Deserialize, Serialize};

use crate::domain::job::{
    CronSpec, DirectRequestSpec, FluxMonitorSpec, Job, JobSpec, JobType, KeeperSpec,
    OffChainReportingSpec, PipelineSpec, WebhookSpec,
};
use crate::domain::resource::Jaid;
use crate::dto::Document;

/// A `jobs` resource object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResource {
    pub id: String,
    pub attributes: JobAttributes,
}

/// Attributes of a `jobs` resource
///
/// Every specialization is a separate optional field on the wire; `type`
/// says which one should be populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAttributes {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub job_type: String,
    #[serde(default)]
    pub direct_request_spec: Option<DirectRequestSpec>,
    #[serde(default)]
    pub flux_monitor_spec: Option<FluxMonitorSpec>,
    #[serde(default, rename = "offChainReportingOracleSpec")]
    pub off_chain_reporting_spec: Option<OffChainReportingSpec>,
    #[serde(default)]
    pub keeper_spec: Option<KeeperSpec>,
    #[serde(default)]
    pub cron_spec: Option<CronSpec>,
    #[serde(default)]
    pub webhook_spec: Option<WebhookSpec>,
    #[serde(default)]
    pub pipeline_spec: PipelineSpec,
}

impl JobAttributes {
    /// Wire names of populated spec fields that do not match `type`
    ///
    /// These are dropped when converting into a [`Job`].
    pub fn stray_specs(&self) -> Vec<&'static str> {
        let populated = [
            (JobType::DirectRequest, "directRequestSpec", self.direct_request_spec.is_some()),
            (JobType::FluxMonitor, "fluxMonitorSpec", self.flux_monitor_spec.is_some()),
            (
                JobType::OffChainReporting,
                "offChainReportingOracleSpec",
                self.off_chain_reporting_spec.is_some(),
            ),
            (JobType::Keeper, "keeperSpec", self.keeper_spec.is_some()),
            (JobType::Cron, "cronSpec", self.cron_spec.is_some()),
            (JobType::Webhook, "webhookSpec", self.webhook_spec.is_some()),
        ];

        let tag = self.job_type.parse::<JobType>().ok();
        populated
            .into_iter()
            .filter(|(job_type, _, present)| *present && Some(*job_type) != tag)
            .map(|(_, field, _)| field)
            .collect()
    }
}

impl From<JobResource> for Job {
    fn from(resource: JobResource) -> Self {
        let attrs = resource.attributes;

        let spec = match attrs.job_type.parse::<JobType>() {
            Ok(JobType::DirectRequest) => JobSpec::DirectRequest(attrs.direct_request_spec),
            Ok(JobType::FluxMonitor) => JobSpec::FluxMonitor(attrs.flux_monitor_spec),
            Ok(JobType::OffChainReporting) => {
                JobSpec::OffChainReporting(attrs.off_chain_reporting_spec)
            }
            Ok(JobType::Keeper) => JobSpec::Keeper(attrs.keeper_spec),
            Ok(JobType::Cron) => JobSpec::Cron(attrs.cron_spec),
            Ok(JobType::Webhook) => JobSpec::Webhook(attrs.webhook_spec),
            Err(unknown) => JobSpec::Unknown(unknown.0),
        };

        Job {
            identity: Jaid::new(resource.id),
            name: attrs.name,
            spec,
            pipeline: attrs.pipeline_spec,
        }
    }
}

/// Either payload shape of a jobs document: a list or a single job
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobsPayload {
    Many(Vec<JobResource>),
    One(JobResource),
}

impl JobsPayload {
    pub fn into_resources(self) -> Vec<JobResource> {
        match self {
            JobsPayload::Many(resources) => resources,
            JobsPayload::One(resource) => vec![resource],
        }
    }
}

pub type JobsDocument = Document<JobsPayload>;
