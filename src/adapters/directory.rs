use crate::adapters::http::ApiTransport;
use crate::domain::model::{Application, Space};
use crate::domain::ports::Directory;
use crate::domain::warnings::{Reported, Warnings};
use crate::utils::error::{PolicyError, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;

const APPS_PATH: &str = "/v3/apps";
const SPACES_PATH: &str = "/v3/spaces";
const PAGE_SIZE: &str = "5000";

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default)]
    pagination: Option<Pagination>,
    #[serde(default = "Vec::new")]
    resources: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    next: Option<Link>,
}

#[derive(Debug, Deserialize)]
struct Link {
    href: String,
}

#[derive(Debug, Deserialize)]
struct Relationship {
    data: RelationshipData,
}

#[derive(Debug, Deserialize)]
struct RelationshipData {
    guid: String,
}

#[derive(Debug, Deserialize)]
struct AppRelationships {
    space: Relationship,
}

#[derive(Debug, Deserialize)]
struct AppResource {
    guid: String,
    name: String,
    relationships: AppRelationships,
}

impl From<AppResource> for Application {
    fn from(resource: AppResource) -> Self {
        Application {
            guid: resource.guid,
            name: resource.name,
            space_guid: resource.relationships.space.data.guid,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SpaceRelationships {
    organization: Relationship,
}

#[derive(Debug, Deserialize)]
struct SpaceResource {
    guid: String,
    name: String,
    relationships: SpaceRelationships,
}

impl From<SpaceResource> for Space {
    fn from(resource: SpaceResource) -> Self {
        Space {
            guid: resource.guid,
            name: resource.name,
            organization_guid: resource.relationships.organization.data.guid,
        }
    }
}

/// Application directory backed by the platform's v3 API.
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    transport: ApiTransport,
}

impl HttpDirectory {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    async fn find_application(
        &self,
        name: &str,
        space_guid: &str,
        warnings: &mut Warnings,
    ) -> Result<Application> {
        let url = self.transport.url(APPS_PATH);
        let request = self
            .transport
            .request(Method::GET, &url)
            .query(&[("names", name), ("space_guids", space_guid)]);
        let page: Page<AppResource> = self.transport.send_json(request, &url, warnings).await?;

        page.resources
            .into_iter()
            .next()
            .map(Application::from)
            .ok_or_else(|| PolicyError::ApplicationNotFound {
                name: name.to_string(),
            })
    }

    async fn all_applications(
        &self,
        space_guid: &str,
        warnings: &mut Warnings,
    ) -> Result<Vec<Application>> {
        let mut applications = Vec::new();
        let mut url = self.transport.url(APPS_PATH);
        let mut request = self
            .transport
            .request(Method::GET, &url)
            .query(&[("space_guids", space_guid), ("per_page", PAGE_SIZE)]);

        loop {
            let page: Page<AppResource> = self.transport.send_json(request, &url, warnings).await?;
            applications.extend(page.resources.into_iter().map(Application::from));

            match page.pagination.and_then(|p| p.next) {
                Some(next) => {
                    url = next.href;
                    request = self.transport.request(Method::GET, &url);
                }
                None => break,
            }
        }

        tracing::debug!("Found {} applications in space {}", applications.len(), space_guid);
        Ok(applications)
    }

    async fn find_space(&self, name: &str, org_guid: &str, warnings: &mut Warnings) -> Result<Space> {
        let url = self.transport.url(SPACES_PATH);
        let request = self
            .transport
            .request(Method::GET, &url)
            .query(&[("names", name), ("organization_guids", org_guid)]);
        let page: Page<SpaceResource> = self.transport.send_json(request, &url, warnings).await?;

        page.resources
            .into_iter()
            .next()
            .map(Space::from)
            .ok_or_else(|| PolicyError::SpaceNotFound {
                name: name.to_string(),
            })
    }
}

#[async_trait]
impl Directory for HttpDirectory {
    async fn resolve_application(&self, name: &str, space_guid: &str) -> Reported<Application> {
        let mut warnings = Warnings::new();
        let result = self.find_application(name, space_guid, &mut warnings).await;
        Reported::new(result, warnings)
    }

    async fn list_applications(&self, space_guid: &str) -> Reported<Vec<Application>> {
        let mut warnings = Warnings::new();
        let result = self.all_applications(space_guid, &mut warnings).await;
        Reported::new(result, warnings)
    }

    async fn resolve_space(&self, name: &str, org_guid: &str) -> Reported<Space> {
        let mut warnings = Warnings::new();
        let result = self.find_space(name, org_guid, &mut warnings).await;
        Reported::new(result, warnings)
    }
}
