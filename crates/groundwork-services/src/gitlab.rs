//! GitLab API client implementation.

use groundwork_types::{GroundworkError, Result};
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

/// GitLab client configuration.
#[derive(Debug, Clone)]
pub struct GitLabConfig {
    /// GitLab base URL
    pub url: String,
    /// Personal access token
    pub token: Option<String>,
    /// Group that owns environment repositories
    pub group: String,
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            url: "https://gitlab.com".to_string(),
            token: None,
            group: "compositionalenterprises".to_string(),
        }
    }
}

/// GitLab API client for publishing environment repositories.
pub struct GitLabClient {
    config: GitLabConfig,
    client: Client,
    base_url: Url,
}

impl GitLabClient {
    /// Create a new GitLab client.
    pub fn new(config: GitLabConfig) -> Result<Self> {
        let base_url = Url::parse(&config.url)
            .map_err(|e| GroundworkError::Service(format!("Invalid GitLab URL: {}", e)))?;

        let user_agent = format!("{}/{}", groundwork_core::APP_NAME, groundwork_core::VERSION);
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&user_agent)
                .map_err(|e| GroundworkError::Service(format!("Invalid user agent: {}", e)))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GroundworkError::Service(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            base_url,
        })
    }

    /// Get the API token from environment or config.
    fn token(&self) -> Result<String> {
        if let Ok(token) = std::env::var("GITLAB_TOKEN") {
            return Ok(token);
        }

        self.config
            .token
            .clone()
            .ok_or_else(|| GroundworkError::Service("No GitLab token available".to_string()))
    }

    fn api_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(&format!("/api/v4/{}", path))
            .map_err(|e| GroundworkError::Service(format!("Invalid API path: {}", e)))
    }

    /// Find the configured group by name.
    pub async fn find_group(&self) -> Result<Group> {
        let url = self.api_url("groups")?;

        let groups: Vec<Group> = self
            .client
            .get(url)
            .header("PRIVATE-TOKEN", self.token()?)
            .query(&[("search", self.config.group.as_str())])
            .send()
            .await
            .map_err(|e| GroundworkError::Service(format!("Group lookup failed: {}", e)))?
            .json()
            .await
            .map_err(|e| GroundworkError::Service(format!("Failed to parse groups: {}", e)))?;

        groups
            .into_iter()
            .find(|g| g.path == self.config.group || g.full_path == self.config.group)
            .ok_or_else(|| {
                GroundworkError::Service(format!("Group not found: {}", self.config.group))
            })
    }

    /// Create a private project under a group namespace.
    ///
    /// Returns the created project, including its SSH push URL.
    pub async fn create_project(&self, name: &str, namespace_id: u64) -> Result<Project> {
        let url = self.api_url("projects")?;

        let body = CreateProject {
            name: name.to_string(),
            namespace_id,
            visibility: "private".to_string(),
        };

        let response = self
            .client
            .post(url)
            .header("PRIVATE-TOKEN", self.token()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| GroundworkError::Service(format!("Project creation failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::CONFLICT {
            let text = response.text().await.unwrap_or_default();
            return Err(GroundworkError::Service(format!(
                "Project '{}' rejected by GitLab ({}): {}",
                name, status, text
            )));
        }
        if !status.is_success() {
            return Err(GroundworkError::Service(format!(
                "Project creation failed ({})",
                status
            )));
        }

        let project: Project = response
            .json()
            .await
            .map_err(|e| GroundworkError::Service(format!("Failed to parse project: {}", e)))?;

        tracing::info!(project = %project.path_with_namespace, "created GitLab project");
        Ok(project)
    }
}

#[derive(Serialize)]
struct CreateProject {
    name: String,
    namespace_id: u64,
    visibility: String,
}

/// GitLab group information.
#[derive(Debug, Clone, Deserialize)]
pub struct Group {
    /// Group id
    pub id: u64,
    /// Group path
    pub path: String,
    /// Full path including any parent groups
    pub full_path: String,
}

/// GitLab project information.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    /// Project id
    pub id: u64,
    /// Namespaced path (group/project)
    pub path_with_namespace: String,
    /// SSH push URL
    pub ssh_url_to_repo: String,
}
