use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::error::{FetchError, TransportError, WriteError};
use crate::http::{HttpResponse, HttpTransport, Transport};
use crate::model::{Project, Task, TaskPatch};

/// Project-data document: the remote embeds a project's task list inside a
/// larger payload; everything but `tasks` is ignored here.
#[derive(Debug, Deserialize)]
struct ProjectData {
    #[serde(default)]
    tasks: Vec<Task>,
}

/// Client for the remote task service's project/task endpoints.
///
/// Read-path failures degrade to partial data (logged, never raised);
/// write-path failures are strict (`None` means the write did not happen).
pub struct TaskClient {
    base_url: String,
    access_token: String,
    transport: Box<dyn Transport>,
}

impl TaskClient {
    pub fn new(config: &AppConfig, access_token: impl Into<String>) -> Result<Self, TransportError> {
        let transport = HttpTransport::new()?;
        Ok(Self::with_transport(
            config.api_base_url(),
            access_token,
            Box::new(transport),
        ))
    }

    pub fn with_transport(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: access_token.into(),
            transport,
        }
    }

    /// List the user's projects. Fail-open: any failure is logged and an
    /// empty list returned, so callers treat empty as "nothing found".
    pub fn list_projects(&self) -> Vec<Project> {
        match self.fetch_projects() {
            Ok(projects) => projects,
            Err(err) => {
                warn!("project listing failed, treating as empty: {err}");
                Vec::new()
            }
        }
    }

    fn fetch_projects(&self) -> Result<Vec<Project>, FetchError> {
        let url = format!("{}/project", self.base_url);
        let response = self.get(&url)?;
        parse_json(&url, &response.body)
    }

    /// Fetch one project's tasks. Candidate endpoints are tried in order
    /// (the project-data shape first, then the bare project resource);
    /// first success wins, and when every candidate fails the *primary*
    /// failure is reported.
    pub fn project_tasks(&self, project_id: &str) -> Result<Vec<Task>, FetchError> {
        let primary = format!("{}/project/{}/data", self.base_url, project_id);
        let fallback = format!("{}/project/{}", self.base_url, project_id);

        match self.tasks_at(&primary) {
            Ok(tasks) => Ok(tasks),
            Err(primary_err) => match self.tasks_at(&fallback) {
                Ok(tasks) => {
                    debug!("primary endpoint failed for project {project_id}, fallback succeeded");
                    Ok(tasks)
                }
                Err(fallback_err) => {
                    debug!("fallback endpoint failed as well: {fallback_err}");
                    Err(primary_err)
                }
            },
        }
    }

    fn tasks_at(&self, url: &str) -> Result<Vec<Task>, FetchError> {
        let response = self.get(url)?;
        let data: ProjectData = parse_json(url, &response.body)?;
        Ok(data.tasks)
    }

    /// Fan out across every project. A failure fetching one project's tasks
    /// is logged and that project omitted; one bad project never aborts the
    /// whole fetch.
    pub fn list_all_tasks(&self) -> Vec<Task> {
        let projects = self.list_projects();
        let mut all_tasks = Vec::new();
        let mut failed = 0usize;

        for project in &projects {
            match self.project_tasks(&project.id) {
                Ok(tasks) => all_tasks.extend(tasks),
                Err(err) => {
                    failed += 1;
                    warn!(project = %project.name, "skipping project tasks: {err}");
                }
            }
        }

        if failed > 0 {
            warn!(
                "{failed} of {} projects failed to load; continuing with partial data",
                projects.len()
            );
        }
        all_tasks
    }

    /// The single write primitive. `None` strictly means "the write did not
    /// happen"; callers must not touch their in-memory copy in that case.
    pub fn update_task_fields(
        &self,
        task_id: &str,
        project_id: &str,
        patch: &TaskPatch,
        original: &Task,
    ) -> Option<Task> {
        match self.push_update(task_id, project_id, patch, original) {
            Ok(task) => Some(task),
            Err(err) => {
                warn!("task update failed, remote state unchanged: {err}");
                None
            }
        }
    }

    fn push_update(
        &self,
        task_id: &str,
        project_id: &str,
        patch: &TaskPatch,
        original: &Task,
    ) -> Result<Task, WriteError> {
        let url = format!("{}/task/{}", self.base_url, task_id);
        let document = merged_document(task_id, project_id, patch, original);
        let body = serde_json::to_value(&document).map_err(|source| WriteError::Malformed {
            url: url.clone(),
            source,
        })?;

        let response = self
            .transport
            .post_json(&url, &self.access_token, &body)
            .map_err(|source| WriteError::Transport {
                url: url.clone(),
                source,
            })?;
        if !response.is_success() {
            return Err(WriteError::Status {
                url,
                status: response.status,
                body: response.body,
            });
        }
        serde_json::from_str(&response.body).map_err(|source| WriteError::Malformed { url, source })
    }

    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let response = self
            .transport
            .get(url, &self.access_token)
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        if !response.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }
        Ok(response)
    }
}

/// The update endpoint replaces the whole remote document, so every write is
/// a read-before-write merge: seed with the addressed ids, apply the patch,
/// copy forward everything else from the known-good original. This is the
/// central correctness property of the write path.
pub(crate) fn merged_document(
    task_id: &str,
    project_id: &str,
    patch: &TaskPatch,
    original: &Task,
) -> Task {
    let mut document = original.clone();
    document.id = task_id.to_string();
    document.project_id = project_id.to_string();
    if let Some(tags) = &patch.tags {
        document.tags = tags.clone();
    }
    if let Some(start) = &patch.start_date {
        document.start_date = Some(start.clone());
    }
    if let Some(due) = &patch.due_date {
        document.due_date = Some(due.clone());
    }
    document
}

fn parse_json<T: serde::de::DeserializeOwned>(url: &str, body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|source| FetchError::Malformed {
        url: url.to_string(),
        source,
    })
}
