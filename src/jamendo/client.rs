use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::jamendo::models::{JamendoResponse, Track};
use crate::resolver::{SearchPass, TrackCatalog};

const JAMENDO_API_BASE: &str = "https://api.jamendo.com/v3.0";

pub struct JamendoClient {
    http_client: Client,
    client_id: Option<String>,
    api_base: String,
}

impl JamendoClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            http_client,
            client_id: config.jamendo_client_id.clone(),
            api_base: JAMENDO_API_BASE.to_string(),
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn search_url(&self, client_id: &str, pass: &SearchPass) -> Result<Url> {
        let base = format!("{}/tracks/", self.api_base.trim_end_matches('/'));
        let limit = pass.result_limit.to_string();

        let mut params = vec![
            ("client_id", client_id),
            ("format", "json"),
            ("limit", limit.as_str()),
            (pass.tag_match.query_param(), pass.tag_expression.as_str()),
            ("order", pass.order_by.as_str()),
        ];
        if let Some(boost) = pass.boost {
            params.push(("boost", boost.as_str()));
        }

        Url::parse_with_params(&base, &params)
            .map_err(|e| AppError::Config(format!("Invalid Jamendo API base: {}", e)))
    }
}

#[async_trait]
impl TrackCatalog for JamendoClient {
    async fn search(&self, pass: &SearchPass) -> Result<Vec<Track>> {
        let client_id = self
            .client_id
            .as_deref()
            .ok_or_else(|| AppError::Config("JAMENDO_CLIENT_ID not set".into()))?;

        let url = self.search_url(client_id, pass)?;
        debug!("Jamendo search: {}", pass);

        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::CatalogApi(format!("HTTP {}: {}", status, error_text)));
        }

        let body: JamendoResponse = response.json().await?;

        if let Some(headers) = &body.headers {
            if !headers.status.is_empty() && headers.status != "success" {
                warn!("Jamendo reported {}: {}", headers.status, headers.error_message);
                return Err(AppError::CatalogApi(headers.error_message.clone()));
            }
            debug!("Jamendo returned {} results", headers.results_count);
        }

        Ok(body.results.into_iter().map(Track::from).collect())
    }
}
