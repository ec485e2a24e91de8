//! Job-related API endpoints

use beacon_core::dto::Document;
use beacon_core::dto::job::JobResource;
use reqwest::Url;

use crate::NodeClient;
use crate::error::Result;

impl NodeClient {
    /// List one page of jobs
    ///
    /// # Arguments
    /// * `page` - 1-based page number
    /// * `size` - Number of jobs per page
    ///
    /// # Returns
    /// The page of job resources; `meta.count` holds the total
    pub async fn list_jobs(&self, page: u32, size: u32) -> Result<Document<Vec<JobResource>>> {
        self.get_json(self.jobs_url(page, size)?).await
    }

    /// Get a job by ID
    ///
    /// # Arguments
    /// * `id` - The job ID, sent as a single escaped path segment
    pub async fn get_job(&self, id: &str) -> Result<Document<JobResource>> {
        self.get_json(self.job_url(id)?).await
    }

    fn jobs_url(&self, page: u32, size: u32) -> Result<Url> {
        let mut url = self.endpoint(&["v2", "jobs"])?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("size", &size.to_string());
        Ok(url)
    }

    fn job_url(&self, id: &str) -> Result<Url> {
        self.endpoint(&["v2", "jobs", id])
    }
}
