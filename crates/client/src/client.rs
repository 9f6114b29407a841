use std::sync::Arc;

use labsite_core::dashboard::DashboardSummary;
use labsite_core::media::BackgroundImages;
use labsite_core::news::News;
use labsite_core::patent::Patent;
use labsite_core::project::Project;
use labsite_core::publication::Publication;
use labsite_core::research::{ResearchItem, ResearchKind};
use labsite_core::team_member::{sort_roster, MemberCategory, TeamMember};
use labsite_core::todo::TodoItem;
use labsite_core::types::DbId;
use labsite_core::user::{LoginRequest, User};
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::resource::Resource;
use crate::transport::{ApiRequest, HttpTransport, Transport};

/// Entry point for the site API.
///
/// Every instance owns its caches; two clients never observe each other's
/// cached listings.
pub struct LabClient {
    transport: Arc<dyn Transport>,
    pub team_members: Resource<TeamMember>,
    pub publications: Resource<Publication>,
    pub patents: Resource<Patent>,
    pub projects: Resource<Project>,
    pub news: Resource<News>,
    pub research_areas: Resource<ResearchItem>,
    pub research_directions: Resource<ResearchItem>,
    pub research_features: Resource<ResearchItem>,
    pub todos: Resource<TodoItem>,
}

impl LabClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let resource = |kind: ResearchKind| Resource::new(Arc::clone(&transport), kind.route_segment());
        Self {
            team_members: Resource::new(Arc::clone(&transport), "team-members"),
            publications: Resource::new(Arc::clone(&transport), "publications"),
            patents: Resource::new(Arc::clone(&transport), "patents"),
            projects: Resource::new(Arc::clone(&transport), "projects"),
            news: Resource::new(Arc::clone(&transport), "news"),
            research_areas: resource(ResearchKind::Area),
            research_directions: resource(ResearchKind::Direction),
            research_features: resource(ResearchKind::Feature),
            todos: Resource::new(Arc::clone(&transport), "todos"),
            transport,
        }
    }

    /// Client for a server at `base_url`, e.g. `http://localhost:3000`.
    pub fn connect(base_url: &str) -> Self {
        Self::new(Arc::new(HttpTransport::new(base_url)))
    }

    pub fn research(&self, kind: ResearchKind) -> &Resource<ResearchItem> {
        match kind {
            ResearchKind::Area => &self.research_areas,
            ResearchKind::Direction => &self.research_directions,
            ResearchKind::Feature => &self.research_features,
        }
    }

    // ---- team ----

    pub async fn team_by_category(
        &self,
        category: MemberCategory,
    ) -> Result<Vec<TeamMember>, ClientError> {
        self.team_members
            .query(&[("category", category.as_str())])
            .await
    }

    pub async fn search_team(&self, query: &str) -> Result<Vec<TeamMember>, ClientError> {
        self.team_members.query(&[("search", query)]).await
    }

    /// Cached team listing ordered professors first, then by name.
    pub async fn roster(&self, force: bool) -> Result<Vec<TeamMember>, ClientError> {
        let mut members = self.team_members.list(force).await?;
        sort_roster(&mut members);
        Ok(members)
    }

    // ---- research ----

    /// Active items of one research listing, in display order.
    pub async fn active_research(&self, kind: ResearchKind) -> Result<Vec<ResearchItem>, ClientError> {
        self.research(kind).query(&[("active", "true")]).await
    }

    // ---- todos ----

    pub async fn toggle_todo(&self, id: DbId) -> Result<TodoItem, ClientError> {
        let request = ApiRequest::new(Method::PATCH, format!("todos/{id}/toggle"));
        self.todos.send_and_replace(request).await
    }

    // ---- uncached ----

    pub async fn dashboard(&self) -> Result<DashboardSummary, ClientError> {
        self.fetch(ApiRequest::get("dashboard")).await
    }

    pub async fn background_images(&self) -> Result<BackgroundImages, ClientError> {
        self.fetch(ApiRequest::get("background-images")).await
    }

    /// Verify credentials. Wrong credentials are `Ok(None)`.
    ///
    /// A successful login drops every cached listing so the signed-in
    /// session starts from the server's current state.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<User>, ClientError> {
        let body = serde_json::to_value(LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        match self.fetch(ApiRequest::new(Method::POST, "auth/login").with_body(body)).await {
            Ok(user) => {
                self.invalidate_all();
                Ok(Some(user))
            }
            Err(err) if err.status() == Some(401) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Drop all cached listings.
    pub fn invalidate_all(&self) {
        self.team_members.invalidate();
        self.publications.invalidate();
        self.patents.invalidate();
        self.projects.invalidate();
        self.news.invalidate();
        for &kind in ResearchKind::ALL {
            self.research(kind).invalidate();
        }
        self.todos.invalidate();
    }

    async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ClientError> {
        let body = self.transport.send(request).await?.into_result()?;
        Ok(serde_json::from_value(body)?)
    }
}
