//! Authenticated REST session against the SCA server
//!
//! One `reqwest` client per session, configured once from `HubConfig`. The
//! long-lived API token is exchanged for a bearer token up front; every
//! subsequent call carries the bearer header.

use std::path::Path;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::artifact::api::ArtifactKind;
use crate::hub::config::HubConfig;
use crate::hub::error::{TransportError, TransportResult};
use crate::hub::traits::ScanTransport;
use crate::hub::types::{FieldDefinition, RemoteField, RemoteObjectRef, ResourceMeta};

#[derive(Debug, Deserialize)]
struct BearerResponse {
    #[serde(rename = "bearerToken")]
    bearer_token: String,
}

#[derive(Debug, Deserialize)]
struct ItemList<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ProjectResource {
    name: String,
    #[serde(rename = "_meta")]
    meta: ResourceMeta,
}

#[derive(Debug, Deserialize)]
struct VersionResource {
    #[serde(rename = "versionName")]
    version_name: String,
    #[serde(rename = "_meta")]
    meta: ResourceMeta,
}

#[derive(Debug, Deserialize)]
struct FieldObjectResource {
    name: String,
    #[serde(rename = "_meta")]
    meta: ResourceMeta,
}

#[derive(Debug)]
pub struct HubSession {
    config: HubConfig,
    client: reqwest::Client,
    bearer: Option<String>,
}

impl HubSession {
    /// Build a session from validated connection settings.
    ///
    /// The session is unusable until `authenticate` has run.
    pub fn new(config: HubConfig) -> TransportResult<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.verify_tls)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        Ok(Self {
            config,
            client,
            bearer: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn bearer(&self) -> TransportResult<&str> {
        self.bearer.as_deref().ok_or_else(|| TransportError::Auth {
            message: "session is not authenticated".to_string(),
        })
    }

    /// Exchange the API token for a bearer token
    pub async fn authenticate(&mut self) -> TransportResult<()> {
        let response = self
            .client
            .post(self.url("/api/tokens/authenticate"))
            .header(
                reqwest::header::AUTHORIZATION,
                format!("token {}", self.config.api_token),
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Auth {
                message: format!("token exchange returned status {}", status.as_u16()),
            });
        }

        let body: BearerResponse =
            response
                .json()
                .await
                .map_err(|e| TransportError::MalformedResponse {
                    message: format!("token exchange: {}", e),
                })?;
        self.bearer = Some(body.bearer_token);
        log::debug!("authenticated against {}", self.config.base_url);
        Ok(())
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        context: &str,
    ) -> TransportResult<T> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::UnexpectedStatus {
                status: status.as_u16(),
                context: context.to_string(),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| TransportError::MalformedResponse {
                message: format!("{}: {}", context, e),
            })
    }
}

#[async_trait]
impl ScanTransport for HubSession {
    async fn upload_scan(&self, path: &Path, kind: ArtifactKind) -> TransportResult<u16> {
        let payload = tokio::fs::read(path)
            .await
            .map_err(|e| TransportError::Io {
                message: format!("{}: {}", path.display(), e),
            })?;

        let response = self
            .client
            .post(self.url("/api/scan/data/?mode=replace"))
            .bearer_auth(self.bearer()?)
            .header(CONTENT_TYPE, kind.content_type())
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            Err(TransportError::UnexpectedStatus {
                status: status.as_u16(),
                context: format!("scan upload of {}", path.display()),
            })
        }
    }

    async fn find_project_version(
        &self,
        project: &str,
        version: &str,
    ) -> TransportResult<RemoteObjectRef> {
        let listing: ItemList<ProjectResource> = self
            .fetch_json(
                self.client
                    .get(self.url("/api/projects"))
                    .bearer_auth(self.bearer()?)
                    .query(&[("q", format!("name:{}", project)), ("limit", "25".into())]),
                "project lookup",
            )
            .await?;

        // The name query is a prefix match server-side; insist on exact
        let project_resource = listing
            .items
            .into_iter()
            .find(|p| p.name == project)
            .ok_or_else(|| TransportError::ProjectNotFound {
                project: project.to_string(),
            })?;

        let versions_href = project_resource.meta.link("versions").ok_or_else(|| {
            TransportError::MalformedResponse {
                message: format!("project '{}' has no versions link", project),
            }
        })?;

        let listing: ItemList<VersionResource> = self
            .fetch_json(
                self.client
                    .get(versions_href)
                    .bearer_auth(self.bearer()?)
                    .query(&[
                        ("q", format!("versionName:{}", version)),
                        ("limit", "100".into()),
                    ]),
                "version lookup",
            )
            .await?;

        let version_resource = listing
            .items
            .into_iter()
            .find(|v| v.version_name == version)
            .ok_or_else(|| TransportError::VersionNotFound {
                project: project.to_string(),
                version: version.to_string(),
            })?;

        let custom_fields_href = version_resource
            .meta
            .link("custom-fields")
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}/custom-fields", version_resource.meta.href));

        Ok(RemoteObjectRef {
            project: project.to_string(),
            version: version.to_string(),
            href: version_resource.meta.href,
            custom_fields_href,
        })
    }

    async fn list_custom_fields(
        &self,
        target: &RemoteObjectRef,
    ) -> TransportResult<Vec<RemoteField>> {
        let listing: ItemList<RemoteField> = self
            .fetch_json(
                self.client
                    .get(&target.custom_fields_href)
                    .bearer_auth(self.bearer()?),
                "custom field listing",
            )
            .await?;
        Ok(listing.items)
    }

    async fn update_field(&self, location: &str, field: &RemoteField) -> TransportResult<u16> {
        // Status is returned rather than checked: a failed field update is
        // the caller's per-field outcome, not a transport fault
        let response = self
            .client
            .put(location)
            .bearer_auth(self.bearer()?)
            .json(field)
            .send()
            .await?;
        Ok(response.status().as_u16())
    }

    async fn create_custom_field(&self, definition: &FieldDefinition) -> TransportResult<u16> {
        let listing: ItemList<FieldObjectResource> = self
            .fetch_json(
                self.client
                    .get(self.url("/api/custom-fields/objects"))
                    .bearer_auth(self.bearer()?),
                "custom field object listing",
            )
            .await?;

        let object = listing
            .items
            .into_iter()
            .find(|o| o.name == definition.object)
            .ok_or_else(|| TransportError::FieldObjectNotFound {
                object: definition.object.clone(),
            })?;

        let fields_href = object
            .meta
            .link("fields")
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}/fields", object.meta.href));

        let payload = serde_json::json!({
            "fieldType": definition.field_type,
            "description": definition.description,
            "label": definition.label,
            "position": definition.position,
            "active": true,
            "initialOptions": definition.initial_options,
        });

        let response = self
            .client
            .post(fields_href)
            .bearer_auth(self.bearer()?)
            .json(&payload)
            .send()
            .await?;
        Ok(response.status().as_u16())
    }
}
