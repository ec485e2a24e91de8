//! Job command handlers
//!
//! Handles job listing and inspection, either against a live node or from a
//! JSON:API document saved on disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use beacon_client::NodeClient;
use beacon_core::domain::job::Job;
use beacon_core::dto::job::{JobResource, JobsDocument};
use beacon_core::presenter::Jobs;
use clap::Subcommand;
use colored::*;
use tracing::{info, warn};

use crate::config::Config;
use crate::render::{render_json, render_table};
use crate::types::OutputFormat;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// List jobs on the node
    List {
        /// Page to fetch, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show a single job
    Show {
        /// Job ID
        id: String,
    },
    /// Render jobs from a JSON:API document on disk
    Render {
        /// Path to a jobs document (list or single job)
        file: PathBuf,
    },
    /// Print pipeline tasks, failing if any pipeline cannot be parsed
    Tasks {
        /// Path to a jobs document (list or single job)
        file: PathBuf,
    },
}

/// Handle job commands
///
/// Routes job subcommands to their respective handlers.
///
/// # Arguments
/// * `command` - The job command to execute
/// * `config` - The CLI configuration
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    match command {
        JobCommands::List { page } => {
            let client = NodeClient::new(&config.node_url);
            list_jobs(&client, page, config).await
        }
        JobCommands::Show { id } => {
            let client = NodeClient::new(&config.node_url);
            show_job(&client, &id, config).await
        }
        JobCommands::Render { file } => {
            let jobs = load_jobs(&file)?;
            print_jobs(&jobs, config)
        }
        JobCommands::Tasks { file } => {
            let jobs = load_jobs(&file)?;
            let lines = strict_task_lines(&jobs)?;
            for line in lines {
                println!("{}", line);
            }
            Ok(())
        }
    }
}

/// List one page of jobs from the node
async fn list_jobs(client: &NodeClient, page: u32, config: &Config) -> Result<()> {
    let document = client
        .list_jobs(page, config.page_size)
        .await
        .context("Failed to list jobs")?;

    let jobs = into_jobs(document.data);
    if let Some(meta) = document.meta {
        info!("Fetched {} of {} job(s), page {}", jobs.0.len(), meta.count, page);
    }

    print_jobs(&jobs, config)
}

/// Get and display a single job
async fn show_job(client: &NodeClient, id: &str, config: &Config) -> Result<()> {
    let document = match client.get_job(id).await {
        Ok(document) => document,
        Err(e) if e.is_not_found() => anyhow::bail!("Job {} not found", id),
        Err(e) => return Err(e).context("Failed to get job"),
    };

    let jobs = into_jobs(vec![document.data]);
    match config.output {
        OutputFormat::Json => println!("{}", render_json(&jobs)?),
        OutputFormat::Table => {
            for job in &jobs.0 {
                print_job_details(job);
            }
        }
    }

    Ok(())
}

fn print_jobs(jobs: &Jobs, config: &Config) -> Result<()> {
    match config.output {
        OutputFormat::Json => println!("{}", render_json(jobs)?),
        OutputFormat::Table if jobs.0.is_empty() => println!("{}", "No jobs found.".yellow()),
        OutputFormat::Table => print!("{}", render_table(jobs, config.color)),
    }

    Ok(())
}

/// Read a JSON:API jobs document from disk
fn load_jobs(path: &Path) -> Result<Jobs> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document: JobsDocument = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse jobs document {}", path.display()))?;

    Ok(into_jobs(document.data.into_resources()))
}

/// Convert resources into jobs, warning about data the conversion drops
fn into_jobs(resources: Vec<JobResource>) -> Jobs {
    let jobs = resources
        .into_iter()
        .map(|resource| {
            for field in resource.attributes.stray_specs() {
                warn!(
                    job_id = %resource.id,
                    job_type = %resource.attributes.job_type,
                    "ignoring {} that does not match the job type", field
                );
            }
            let job = Job::from(resource);
            if job.job_type().is_none() {
                warn!(job_id = %job.identity, "unrecognized job type {:?}", job.spec.type_name());
            }
            job
        })
        .collect::<Vec<_>>();

    Jobs(jobs)
}

/// `"<id> <task>"` for every task of every job, failing on the first broken DAG
fn strict_task_lines(jobs: &Jobs) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for job in &jobs.0 {
        let tasks = job
            .tasks()
            .with_context(|| format!("Failed to parse pipeline DAG of job {}", job.identity))?;
        lines.extend(tasks.into_iter().map(|task| format!("{} {}", job.identity, task)));
    }
    Ok(lines)
}

/// Print detailed job information
fn print_job_details(job: &Job) {
    println!("{}", "Job Details:".bold());
    println!("  ID:          {}", job.identity.id().cyan());
    println!("  Name:        {}", job.name);
    println!("  Type:        {}", job.spec.type_name());
    println!("  Created:     {}", job.friendly_created_at());

    for (label, value) in job.spec.details() {
        println!("  {:<13}{}", format!("{}:", label), value);
    }

    println!("\n{}", "Tasks:".bold());
    match job.tasks() {
        Ok(tasks) if tasks.is_empty() => println!("  {}", "(none)".dimmed()),
        Ok(tasks) => {
            for task in tasks {
                println!("  {} {}", "▸".cyan(), task);
            }
        }
        Err(e) => println!("  {}", format!("error parsing DAG: {}", e).red()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_core::presenter::TableRenderable;
    use std::io::Write;

    const DOCUMENT: &str = r#"{
        "data": [
            {
                "type": "jobs",
                "id": "1",
                "attributes": {
                    "name": "Test Job",
                    "type": "directrequest",
                    "directRequestSpec": { "createdAt": "2021-03-04T05:06:07Z" },
                    "pipelineSpec": {
                        "dotDagSource": "ds1 [type=http];\nds1_parse [type=jsonparse];\nds1 -> ds1_parse;"
                    }
                }
            },
            {
                "type": "jobs",
                "id": "2",
                "attributes": {
                    "name": "Broken",
                    "type": "fluxmonitor",
                    "directRequestSpec": { "createdAt": "2021-03-04T05:06:07Z" },
                    "pipelineSpec": { "dotDagSource": "invalid dot" }
                }
            }
        ]
    }"#;

    fn write_document(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_jobs_from_document() {
        let file = write_document(DOCUMENT);
        let jobs = load_jobs(file.path()).unwrap();

        assert_eq!(
            jobs.rows(),
            vec![
                vec!["1", "Test Job", "directrequest", "ds1 http", "2021-03-04T05:06:07Z"],
                vec!["1", "Test Job", "directrequest", "ds1_parse jsonparse", "2021-03-04T05:06:07Z"],
                vec!["2", "Broken", "fluxmonitor", "error parsing DAG", "N/A"],
            ]
        );
    }

    #[test]
    fn test_load_jobs_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_jobs(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_load_jobs_rejects_non_document() {
        let file = write_document("[1, 2, 3]");
        assert!(load_jobs(file.path()).is_err());
    }

    #[test]
    fn test_strict_task_lines_fail_on_broken_dag() {
        let file = write_document(DOCUMENT);
        let jobs = load_jobs(file.path()).unwrap();

        let err = strict_task_lines(&jobs).unwrap_err();
        assert!(err.to_string().contains("job 2"));
    }

    #[test]
    fn test_strict_task_lines() {
        let jobs = Jobs(vec![load_jobs(write_document(DOCUMENT).path()).unwrap().0[0].clone()]);

        assert_eq!(
            strict_task_lines(&jobs).unwrap(),
            vec!["1 ds1 http", "1 ds1_parse jsonparse"]
        );
    }
}
