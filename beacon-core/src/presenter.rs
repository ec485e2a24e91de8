//! Display views over jobs
//!
//! Every view here is a pure function of the job value. The `friendly_*`
//! variants never fail and substitute sentinel text instead, so a table can
//! always be rendered; [`Job::tasks`] is the strict variant for callers that
//! need to detect a broken pipeline.

use chrono::SecondsFormat;

use crate::dag::{DagError, extract_tasks};
use crate::domain::job::{CreatedAt, Job};

/// Label of a table of job specs
pub const JOB_COLLECTION_NAME: &str = "specDBs";

/// Column headers of a job table
pub const JOB_HEADERS: [&str; 5] = ["ID", "Name", "Type", "Tasks", "Created At"];

pub const DAG_ERROR_TASK: &str = "error parsing DAG";
pub const CREATED_AT_ABSENT: &str = "N/A";
pub const CREATED_AT_UNKNOWN: &str = "unknown";

/// Something that renders as a table of string rows
pub trait TableRenderable {
    /// Label of the table
    fn name(&self) -> &'static str;

    fn headers(&self) -> &'static [&'static str];

    fn rows(&self) -> Vec<Vec<String>>;
}

impl Job {
    /// Pipeline tasks as `"<node> <kind>"`, in declaration order
    pub fn tasks(&self) -> Result<Vec<String>, DagError> {
        let tasks = extract_tasks(&self.pipeline.dot_dag_source)?;
        Ok(tasks.iter().map(ToString::to_string).collect())
    }

    /// Like [`Job::tasks`], but a broken pipeline yields `["error parsing DAG"]`
    pub fn friendly_tasks(&self) -> Vec<String> {
        self.tasks().unwrap_or_else(|_| vec![DAG_ERROR_TASK.to_string()])
    }

    /// Creation time in RFC3339 with its original offset, `"N/A"` without a
    /// spec record, `"unknown"` for an unrecognized type
    pub fn friendly_created_at(&self) -> String {
        match self.spec.created_at() {
            CreatedAt::At(created_at) => created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            CreatedAt::Absent => CREATED_AT_ABSENT.to_string(),
            CreatedAt::UnknownType => CREATED_AT_UNKNOWN.to_string(),
        }
    }

    /// One row per friendly task; only the task column differs between rows
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let created_at = self.friendly_created_at();

        self.friendly_tasks()
            .into_iter()
            .map(|task| {
                vec![
                    self.identity.id().to_string(),
                    self.name.clone(),
                    self.spec.type_name().to_string(),
                    task,
                    created_at.clone(),
                ]
            })
            .collect()
    }
}

impl TableRenderable for Job {
    fn name(&self) -> &'static str {
        JOB_COLLECTION_NAME
    }

    fn headers(&self) -> &'static [&'static str] {
        &JOB_HEADERS
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.to_rows()
    }
}

/// A list of jobs rendered as one table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Jobs(pub Vec<Job>);

impl From<Vec<Job>> for Jobs {
    fn from(jobs: Vec<Job>) -> Self {
        Self(jobs)
    }
}

impl TableRenderable for Jobs {
    fn name(&self) -> &'static str {
        JOB_COLLECTION_NAME
    }

    fn headers(&self) -> &'static [&'static str] {
        &JOB_HEADERS
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.0.iter().flat_map(Job::to_rows).collect()
    }
}
