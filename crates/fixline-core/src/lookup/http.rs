// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use super::{LatLon, LookupError, LookupService};
use crate::config::FixlineConfig;
use fixline_grammar::ProcedureKind;
use log::{debug, warn};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ProcedureResponse {
    waypoints: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct AirwayResponse {
    segment: Option<Vec<String>>,
}

/// Lookup service backed by the IDS REST API.
pub struct HttpLookup {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLookup {
    pub fn new(config: &FixlineConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LookupError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.lookup_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, LookupError> {
        let raw = format!("{}/{}", self.base_url, path);
        Url::parse_with_params(&raw, params).map_err(|e| LookupError::InvalidUrl(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, LookupError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))
    }
}

fn non_empty(list: Option<Vec<String>>, what: &str) -> Result<Vec<String>, LookupError> {
    match list {
        Some(items) if !items.is_empty() => {
            Ok(items.into_iter().map(|s| s.trim().to_uppercase()).collect())
        }
        _ => Err(LookupError::NotFound(what.to_string())),
    }
}

impl LookupService for HttpLookup {
    async fn lookup_procedure(
        &self,
        kind: ProcedureKind,
        code: &str,
    ) -> Result<Vec<String>, LookupError> {
        let url = self.endpoint(kind.as_str(), &[("code", code)])?;
        let body: ProcedureResponse = self.get_json(url).await?;
        non_empty(body.waypoints, code)
    }

    async fn lookup_airway_segment(
        &self,
        airway: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<String>, LookupError> {
        let url = self.endpoint("airway", &[("id", airway), ("from", from), ("to", to)])?;
        let body: AirwayResponse = self.get_json(url).await?;
        non_empty(body.segment, &format!("{} {}..{}", airway, from, to))
    }

    async fn lookup_fixes(&self, ids: &[String]) -> Result<HashMap<String, LatLon>, LookupError> {
        let joined = ids.join(",");
        let url = self.endpoint("fix", &[("fixes", joined.as_str())])?;
        let body: HashMap<String, serde_json::Value> = self.get_json(url).await?;

        let mut positions = HashMap::with_capacity(body.len());
        for (id, value) in body {
            match serde_json::from_value::<LatLon>(value) {
                Ok(pos) => {
                    positions.insert(id.to_uppercase(), pos);
                }
                Err(e) => warn!("Skipping malformed fix entry — id={} error={}", id, e),
            }
        }
        Ok(positions)
    }
}
