// Submit a family to the calculation service and print the shares

use std::path::PathBuf;

use tracing::info;
use veraset_config::{AppConfig, ServiceConfig};
use veraset_domain::{CalculationResponse, TreeBuilder};
use veraset_http::{CalculationClient, HttpConfig};
use veraset_sessions::CalculationSession;

use super::Command;
use crate::error::{CliError, CliResult};
use crate::family_file::FamilyFile;
use crate::output::OutputStyle;

/// Build the HTTP client settings from the `[service]` section
pub fn http_config(service: &ServiceConfig) -> HttpConfig {
    let mut config = HttpConfig::new()
        .with_timeout(service.timeout())
        .with_connect_timeout(service.connect_timeout());
    if let Some(user_agent) = &service.user_agent {
        config = config.with_user_agent(user_agent.clone());
    }
    if let Some(proxy) = &service.proxy {
        config = config.with_proxy(proxy.clone());
    }
    config
}

/// Replay a family file into a session, submit it once and render the result
pub struct CalculateCommand {
    file: PathBuf,
    estate: Option<f64>,
    service_url: Option<String>,
    json: bool,
    config: AppConfig,
}

impl CalculateCommand {
    pub fn new(file: impl Into<PathBuf>, config: AppConfig) -> Self {
        Self {
            file: file.into(),
            estate: None,
            service_url: None,
            json: false,
            config,
        }
    }

    /// Estate value overriding the one in the family file
    pub fn with_estate(mut self, estate: Option<f64>) -> Self {
        self.estate = estate;
        self
    }

    /// Base URL overriding `service.base_url`
    pub fn with_service_url(mut self, url: Option<String>) -> Self {
        self.service_url = url;
        self
    }

    /// Print result rows as JSON instead of a table
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Run the submission and return the service response
    pub async fn submit(&self) -> CliResult<CalculationResponse> {
        let family = FamilyFile::load(&self.file)?;
        let deceased_name = family
            .deceased_name
            .as_deref()
            .unwrap_or(&self.config.defaults.deceased_name);
        let mut session =
            CalculationSession::with_builder(TreeBuilder::new().with_deceased_name(deceased_name));

        family.apply(session.relatives_mut()?)?;
        if let Some(value) = self.estate.or(family.estate_value) {
            session.set_estate_value(value)?;
        }

        let base_url = self
            .service_url
            .as_deref()
            .unwrap_or(&self.config.service.base_url);
        let client = CalculationClient::new(
            base_url,
            &self.config.service.endpoint,
            http_config(&self.config.service),
        )?;
        info!(session_id = %session.id(), url = %client.url(), "Submitting calculation");

        Ok(session.submit(&client).await?)
    }

    /// Render the result without printing it
    pub async fn render(&self, style: &OutputStyle) -> CliResult<String> {
        let response = self.submit().await?;
        let rows = response.rows();
        if self.json {
            return Ok(serde_json::to_string_pretty(&rows)?);
        }
        if rows.is_empty() {
            return Err(CliError::Internal(
                "The service answered without any heirs".to_string(),
            ));
        }
        Ok(style.result_table(&rows, response.total_distributed))
    }
}

#[async_trait::async_trait]
impl Command for CalculateCommand {
    async fn execute(&self) -> CliResult<()> {
        println!("{}", self.render(&OutputStyle::default()).await?);
        Ok(())
    }
}
