use std::future::Future;

use serde::Serialize;

use crate::{
    config::Config,
    error::ClientError,
    payload::{LoginRequest, StatsPayload},
};

/// The game backend that receives logins and stat updates.
pub trait Backend: Send + Sync {
    fn login(&self, request: &LoginRequest) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn update_stats(&self, stats: &StatsPayload) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// [`Backend`] reached over plain JSON POSTs.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    http: reqwest::Client,
    login_url: String,
    stats_url: String,
}

impl HttpBackend {
    pub fn new(login_url: impl Into<String>, stats_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            login_url: login_url.into(),
            stats_url: stats_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.auth_url, &config.stats_url)
    }

    async fn post<T: Serialize + ?Sized + Sync>(&self, url: &str, body: &T) -> Result<(), ClientError> {
        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ClientError::BackendStatus(status.as_u16()))
        }
    }
}

impl Backend for HttpBackend {
    async fn login(&self, request: &LoginRequest) -> Result<(), ClientError> {
        self.post(&self.login_url, request).await
    }

    async fn update_stats(&self, stats: &StatsPayload) -> Result<(), ClientError> {
        self.post(&self.stats_url, stats).await
    }
}
