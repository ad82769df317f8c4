mod api;
mod error;

pub use error::ApiError;

use crate::config::ClientConfig;
use crate::state::{AppState, AuthMode, Credentials, PersistedSession};
use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{StatusCode, Url};
use std::path::PathBuf;
use std::sync::Arc;
use servicesquad_protocol::{OpportunityData, OrganizationData, UserData, endpoints};

/// The backend operations the session controller depends on.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// POST the credentials to the endpoint selected by `mode` and return the user.
    async fn authenticate(
        &self,
        mode: AuthMode,
        credentials: &Credentials,
    ) -> Result<UserData, ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;

    /// The user of the current backend session, `None` when there is none.
    async fn current_session(&self) -> Result<Option<UserData>, ApiError>;
}

/// HTTP client for the ServiceSquad backend.
///
/// One `reqwest::Client` is shared by all clones so the session cookie set by
/// `/login` and `/signup` is sent with every later request. When the config
/// names a session file the cookies are saved there and loaded on the next start.
#[derive(Clone)]
pub struct NetworkClient {
    state: AppState,
    server_url: String,
    base_url: Url,
    http: reqwest::Client,
    jar: Arc<Jar>,
    session_file: Option<PathBuf>,
}

impl NetworkClient {
    pub fn new(state: AppState, config: &ClientConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.server_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.server_url, e)))?;

        let jar = Arc::new(Jar::default());
        if let Some(saved) = config.session_file.as_deref().and_then(PersistedSession::load) {
            if saved.server_url == config.server_url {
                for cookie in &saved.cookies {
                    jar.add_cookie_str(cookie, &base_url);
                }
            } else {
                tracing::debug!("Ignoring saved session for {}", saved.server_url);
            }
        }

        let http = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            state,
            server_url: config.server_url.clone(),
            base_url,
            http,
            jar,
            session_file: config.session_file.clone(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }

    /// Whether a session cookie is held, e.g. one loaded from the session file.
    pub fn has_session_cookie(&self) -> bool {
        self.jar.cookies(&self.base_url).is_some()
    }

    /// Write the current cookies to the session file, or remove it when there are none.
    fn persist_cookies(&self) {
        let Some(path) = self.session_file.as_deref() else {
            return;
        };

        let cookies: Vec<String> = self
            .jar
            .cookies(&self.base_url)
            .and_then(|header| header.to_str().ok().map(String::from))
            .map(|header| header.split("; ").map(String::from).collect())
            .unwrap_or_default();

        if cookies.is_empty() {
            PersistedSession::remove(path);
        } else {
            PersistedSession {
                server_url: self.server_url.clone(),
                cookies,
            }
            .save(path);
        }
    }

    // Listings

    pub async fn get_organizations(&self) -> Result<Vec<OrganizationData>, ApiError> {
        api::get(&self.http, &self.url(endpoints::ORGANIZATIONS)).await
    }

    pub async fn get_opportunities(&self) -> Result<Vec<OpportunityData>, ApiError> {
        api::get(&self.http, &self.url(endpoints::OPPORTUNITIES)).await
    }

    /// Fetch organizations into the state. Dropped if the user changes mid-request.
    pub async fn load_organizations(&self) -> Result<(), ApiError> {
        let generation = self.state.session_generation().await;
        let organizations = self.get_organizations().await?;
        let count = organizations.len();
        if self.state.set_organizations(generation, organizations).await {
            tracing::debug!("Loaded {} organizations", count);
        } else {
            tracing::debug!("Discarding organizations fetched for a previous session");
        }
        Ok(())
    }

    /// Fetch opportunities into the state. Dropped if the user changes mid-request.
    pub async fn load_opportunities(&self) -> Result<(), ApiError> {
        let generation = self.state.session_generation().await;
        let opportunities = self.get_opportunities().await?;
        let count = opportunities.len();
        if self.state.set_opportunities(generation, opportunities).await {
            tracing::debug!("Loaded {} opportunities", count);
        } else {
            tracing::debug!("Discarding opportunities fetched for a previous session");
        }
        Ok(())
    }
}

#[async_trait]
impl AuthBackend for NetworkClient {
    async fn authenticate(
        &self,
        mode: AuthMode,
        credentials: &Credentials,
    ) -> Result<UserData, ApiError> {
        let url = self.url(mode.endpoint());
        tracing::debug!("POST {} as {}", url, credentials.username);
        let user = api::post(&self.http, &url, credentials).await?;
        self.persist_cookies();
        Ok(user)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        api::delete(&self.http, &self.url(endpoints::LOGOUT)).await?;
        // The backend may keep the cookie alive with an emptied session
        if let Some(path) = self.session_file.as_deref() {
            PersistedSession::remove(path);
        }
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<UserData>, ApiError> {
        match api::get::<UserData>(&self.http, &self.url(endpoints::CHECK_SESSION)).await {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.status() == Some(StatusCode::UNAUTHORIZED) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
