//! HTTP client for the NationStates API.

use crate::error::{NsClientError, Result};
use crate::xml::extract_field;
use anyhow::Result as AnyResult;
use async_trait::async_trait;
use sources::{EligibilityChecker, RecruitmentStatus, RosterSource};
use std::time::Duration;
use store::{NationName, normalize_name};
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://www.nationstates.net";

/// Per-request timeout. Pacing is the scanner's job, not the client's.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the NationStates API.
///
/// Every request carries the configured `User-Agent`, which the API
/// requires to identify the operator.
#[derive(Debug, Clone)]
pub struct NsClient {
    http: reqwest::Client,
    base_url: String,
    recruiting_region: Option<String>,
}

impl NsClient {
    /// Create a client against the public API.
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_base_url(user_agent, DEFAULT_BASE_URL)
    }

    /// Create a client against another host (used by tests).
    pub fn with_base_url(user_agent: &str, base_url: impl Into<String>) -> Result<Self> {
        if user_agent.trim().is_empty() {
            return Err(NsClientError::EmptyUserAgent);
        }

        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            recruiting_region: None,
        })
    }

    /// Evaluate recruitment flags relative to `region`.
    ///
    /// The API answers `tgcanrecruit` differently depending on who is
    /// asking; without this the answer is the region-independent one.
    pub fn recruiting_from(mut self, region: &str) -> Self {
        let region = normalize_name(region);
        self.recruiting_region = (!region.is_empty()).then_some(region);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn region_url(&self, region: &str) -> String {
        format!("{}/cgi-bin/api.cgi?region={}&q=nations", self.base_url, region)
    }

    fn nation_url(&self, nation: &NationName) -> String {
        match &self.recruiting_region {
            Some(from) => format!(
                "{}/cgi-bin/api.cgi?nation={}&q=region+tgcanrecruit;from={}",
                self.base_url, nation, from
            ),
            None => format!(
                "{}/cgi-bin/api.cgi?nation={}&q=region+tgcanrecruit",
                self.base_url, nation
            ),
        }
    }

    async fn get_xml(&self, url: &str) -> Result<String> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| NsClientError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NsClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| NsClientError::Request {
            url: url.to_string(),
            source,
        })
    }

    /// Retrieve the list of all nations in `region`.
    ///
    /// The API returns them colon-separated in a single `NATIONS` element.
    /// Empty segments are dropped.
    pub async fn region_nations(&self, region: &str) -> Result<Vec<NationName>> {
        let url = self.region_url(&normalize_name(region));
        let body = self.get_xml(&url).await?;

        let nations = extract_field(&body, "NATIONS")?.ok_or_else(|| NsClientError::MissingField {
            field: "NATIONS",
            url: url.clone(),
        })?;

        Ok(nations
            .split(':')
            .filter(|segment| !segment.trim().is_empty())
            .filter_map(|segment| match NationName::new(segment) {
                Ok(name) => Some(name),
                Err(e) => {
                    warn!("Skipping roster entry: {}", e);
                    None
                }
            })
            .collect())
    }

    /// Fetch the recruitment flag and current region of `nation`.
    pub async fn recruitment_status(&self, nation: &NationName) -> Result<RecruitmentStatus> {
        let url = self.nation_url(nation);
        let body = self.get_xml(&url).await?;

        let flag = extract_field(&body, "TGCANRECRUIT")?.ok_or_else(|| NsClientError::MissingField {
            field: "TGCANRECRUIT",
            url: url.clone(),
        })?;
        let region = extract_field(&body, "REGION")?.map(|r| normalize_name(&r));

        Ok(RecruitmentStatus {
            nation: nation.clone(),
            region,
            can_recruit: flag.trim() == "1",
        })
    }
}

#[async_trait]
impl RosterSource for NsClient {
    fn name(&self) -> &str {
        "nationstates"
    }

    async fn nations(&self, region: &str) -> AnyResult<Vec<NationName>> {
        Ok(self.region_nations(region).await?)
    }
}

#[async_trait]
impl EligibilityChecker for NsClient {
    async fn is_eligible(&self, nation: &NationName) -> AnyResult<bool> {
        let status = self.recruitment_status(nation).await?;
        debug!(
            "{} in {}: tgcanrecruit={}",
            status.nation,
            status.region.as_deref().unwrap_or("unknown region"),
            status.can_recruit
        );
        Ok(status.can_recruit)
    }
}
