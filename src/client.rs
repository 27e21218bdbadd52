use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ApiConfig;
use crate::models::{
    AtRiskSites, BreakdownFilters, IngestAck, Inspection, ResolveAck, SignalBreakdown, Site,
    SiteHistory, WorkOrder,
};

/// REST client for the risk backend. Built once from config and passed to
/// whatever needs it.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        Self::from_parts(&config.base_url, http)
    }

    pub fn from_parts(base_url: &str, http: reqwest::Client) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid API base URL {base_url}"))?;
        if base_url.cannot_be_a_base() {
            bail!("API base URL {base_url} cannot carry a path");
        }
        Ok(Self { http, base_url })
    }

    /// Appends path segments to the base URL, escaping each one.
    pub fn endpoint(&self, segments: &[&str]) -> anyhow::Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("API base URL {} cannot carry a path", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn at_risk_sites(&self, min_score: f64, limit: usize) -> anyhow::Result<AtRiskSites> {
        let url = self.endpoint(&["api", "sites", "at-risk"])?;
        let request = self.http.get(url.clone()).query(&[
            ("min_score", min_score.to_string()),
            ("limit", limit.to_string()),
        ]);
        self.send(Method::GET, &url, request).await
    }

    pub async fn site(&self, site_id: &str) -> anyhow::Result<Site> {
        let url = self.endpoint(&["api", "sites", site_id])?;
        let request = self.http.get(url.clone());
        self.send(Method::GET, &url, request).await
    }

    pub async fn site_history(&self, site_id: &str) -> anyhow::Result<SiteHistory> {
        let url = self.endpoint(&["api", "sites", site_id, "history"])?;
        let request = self.http.get(url.clone());
        self.send(Method::GET, &url, request).await
    }

    pub async fn signals_breakdown(
        &self,
        filters: &BreakdownFilters,
    ) -> anyhow::Result<SignalBreakdown> {
        let url = self.endpoint(&["api", "signals", "breakdown"])?;
        let pairs = filters.query_pairs();
        let mut request = self.http.get(url.clone());
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }
        self.send(Method::GET, &url, request).await
    }

    pub async fn resolve_signal(&self, signal_id: &str) -> anyhow::Result<ResolveAck> {
        let url = self.endpoint(&["api", "signals", signal_id, "resolve"])?;
        let request = self.http.patch(url.clone());
        self.send(Method::PATCH, &url, request).await
    }

    pub async fn ingest_inspection(&self, inspection: &Inspection) -> anyhow::Result<IngestAck> {
        self.post_json(&["api", "inspections", "ingest"], inspection)
            .await
    }

    pub async fn ingest_work_order(&self, work_order: &WorkOrder) -> anyhow::Result<IngestAck> {
        self.post_json(&["api", "work-orders", "ingest"], work_order)
            .await
    }

    async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> anyhow::Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let request = self.http.post(url.clone()).json(body);
        self.send(Method::POST, &url, request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &Url,
        request: RequestBuilder,
    ) -> anyhow::Result<T> {
        debug!(%method, %url, "api request");
        let response = request
            .send()
            .await
            .with_context(|| format!("{method} {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("API error: {status} from {method} {url}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("invalid JSON from {method} {url}"))
    }
}
