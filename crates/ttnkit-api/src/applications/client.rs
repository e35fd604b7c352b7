// Hand-crafted async HTTP client for the console applications API.
//
// Base path: the applications collection (e.g. `https://host/api/applications/`)
// Auth: `Authorization: Bearer <access token>` default header

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::types;
use crate::auth::Credentials;
use crate::error::Error;
use crate::transport::TransportConfig;

// ── Error response shape from the account server ─────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the applications REST surface.
///
/// Every path is built from the configured collection URL; ids are pushed
/// as percent-encoded path segments. The client is stateless beyond its
/// connection pool, so it is cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ApplicationsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApplicationsClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from credentials and a transport config.
    ///
    /// Injects `Authorization` as a default header on every request when
    /// an access token is configured.
    pub fn new(
        api_url: &str,
        credentials: &Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client_with_headers(credentials.headers()?)?;
        let base_url = Self::normalize_base_url(api_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(api_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(api_url)?;
        Ok(Self { http, base_url })
    }

    /// The applications collection URL, always ending in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(raw.to_owned()));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments to the collection URL.
    ///
    /// A trailing `""` segment yields a trailing slash, which several
    /// endpoints (`/`, `/{id}/devices/`) depend on.
    fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn post_no_response<B: Serialize + Sync>(&self, url: Url, body: &B) -> Result<(), Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_empty(resp).await
    }

    async fn post_without_body<T: DeserializeOwned + Default>(&self, url: Url) -> Result<T, Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).send().await?;
        self.handle_response_or_default(resp).await
    }

    async fn put_no_response<B: Serialize + Sync>(&self, url: Url, body: &B) -> Result<(), Error> {
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_empty(resp).await
    }

    async fn patch<T: DeserializeOwned + Default, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("PATCH {url}");

        let resp = self.http.patch(url).json(body).send().await?;
        self.handle_response_or_default(resp).await
    }

    async fn patch_no_response<B: Serialize + Sync>(&self, url: Url, body: &B) -> Result<(), Error> {
        debug!("PATCH {url}");

        let resp = self.http.patch(url).json(body).send().await?;
        self.handle_empty(resp).await
    }

    async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            decode(body)
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    /// Like [`handle_response`](Self::handle_response), but an empty 2xx
    /// body decodes as `T::default()`.
    async fn handle_response_or_default<T: DeserializeOwned + Default>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            if body.trim().is_empty() {
                Ok(T::default())
            } else {
                decode(body)
            }
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::Authentication {
                message: "access token missing or rejected (HTTP 401)".into(),
            };
        }

        let raw = resp.text().await.unwrap_or_default();

        match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(err) => Error::Api {
                status: status.as_u16(),
                message: err
                    .error
                    .or(err.message)
                    .unwrap_or_else(|| status.to_string()),
                code: err.code.map(|c| match c {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                }),
            },
            Err(_) => Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw.chars().take(200).collect()
                },
                code: None,
            },
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Applications ─────────────────────────────────────────────────

    pub async fn list_applications(&self) -> Result<Vec<types::ApplicationResponse>, Error> {
        self.get(self.url(&[""])?).await
    }

    pub async fn get_application(&self, app_id: &str) -> Result<types::ApplicationResponse, Error> {
        self.get(self.url(&[app_id])?).await
    }

    pub async fn create_application(&self, app_id: &str, name: &str) -> Result<(), Error> {
        self.post_no_response(
            self.url(&[""])?,
            &types::CreateApplicationRequest { id: app_id, name },
        )
        .await
    }

    pub async fn update_application(&self, app_id: &str, name: &str) -> Result<(), Error> {
        self.patch_no_response(
            self.url(&[app_id])?,
            &types::UpdateApplicationRequest { description: name },
        )
        .await
    }

    pub async fn delete_application(&self, app_id: &str) -> Result<(), Error> {
        self.delete(self.url(&[app_id])?).await
    }

    // ── Handler registration ─────────────────────────────────────────

    pub async fn register_handler(&self, app_id: &str, handler: &str) -> Result<(), Error> {
        self.put_no_response(
            self.url(&[app_id, "registration"])?,
            &types::RegistrationRequest { handler },
        )
        .await
    }

    pub async fn unregister_handler(&self, app_id: &str) -> Result<(), Error> {
        self.delete(self.url(&[app_id, "registration"])?).await
    }

    // ── Devices ──────────────────────────────────────────────────────

    pub async fn list_devices(&self, app_id: &str) -> Result<Vec<types::DeviceRecord>, Error> {
        self.get(self.url(&[app_id, "devices", ""])?).await
    }

    pub async fn get_device(&self, app_id: &str, device_id: &str) -> Result<types::DeviceRecord, Error> {
        self.get(self.url(&[app_id, "devices", device_id])?).await
    }

    pub async fn add_device(&self, app_id: &str, device: &types::DeviceRecord) -> Result<(), Error> {
        self.post_no_response(self.url(&[app_id, "devices"])?, device)
            .await
    }

    pub async fn update_device(
        &self,
        app_id: &str,
        device_id: &str,
        device: &types::DeviceRecord,
    ) -> Result<types::DeviceRecord, Error> {
        self.patch(self.url(&[app_id, "devices", device_id])?, device)
            .await
    }

    /// Delete a device. An empty `device_id` addresses `/{id}/devices/`,
    /// which is what the server sees for a device record without `dev_id`.
    pub async fn delete_device(&self, app_id: &str, device_id: &str) -> Result<(), Error> {
        self.delete(self.url(&[app_id, "devices", device_id])?).await
    }

    // ── EUIs ─────────────────────────────────────────────────────────

    pub async fn create_eui(&self, app_id: &str) -> Result<types::EuiResponse, Error> {
        self.post_without_body(self.url(&[app_id, "euis"])?).await
    }

    pub async fn delete_eui(&self, app_id: &str, eui: &str) -> Result<(), Error> {
        self.delete(self.url(&[app_id, "euis", eui])?).await
    }

    // ── Access keys ──────────────────────────────────────────────────

    pub async fn put_access_key(&self, app_id: &str, name: &str, rights: &[String]) -> Result<(), Error> {
        self.put_no_response(
            self.url(&[app_id, "access-keys", name])?,
            &types::RightsRequest { rights },
        )
        .await
    }

    pub async fn delete_access_key(&self, app_id: &str, name: &str) -> Result<(), Error> {
        self.delete(self.url(&[app_id, "access-keys", name])?).await
    }

    // ── Collaborators ────────────────────────────────────────────────

    pub async fn put_collaborator(
        &self,
        app_id: &str,
        username: &str,
        rights: &[String],
    ) -> Result<(), Error> {
        self.put_no_response(
            self.url(&[app_id, "collaborators", username])?,
            &types::RightsRequest { rights },
        )
        .await
    }

    pub async fn delete_collaborator(&self, app_id: &str, username: &str) -> Result<(), Error> {
        self.delete(self.url(&[app_id, "collaborators", username])?)
            .await
    }
}

fn decode<T: DeserializeOwned>(body: String) -> Result<T, Error> {
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}
