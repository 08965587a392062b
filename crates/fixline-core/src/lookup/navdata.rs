// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use super::{LatLon, LookupError, LookupService};
use fixline_grammar::ProcedureKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavDataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid navdata file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Offline navigation database.
///
/// ```json
/// {
///   "fixes":   { "JHW": { "lat": 42.18, "lon": -79.12 } },
///   "sids":    { "HHOWE4.LNCON": ["HHOWE", "LNCON"] },
///   "stars":   { "PONCT.JFUND2": ["PONCT", "JFUND"] },
///   "airways": { "Q82": ["JHW", "MEMMS", "PONCT"] }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavData {
    #[serde(default)]
    pub fixes: HashMap<String, LatLon>,
    #[serde(default)]
    pub sids: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub stars: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub airways: HashMap<String, Vec<String>>,
}

fn upper_keys<V>(map: HashMap<String, V>) -> HashMap<String, V> {
    map.into_iter().map(|(k, v)| (k.to_uppercase(), v)).collect()
}

fn upper_list(list: Vec<String>) -> Vec<String> {
    list.into_iter().map(|s| s.to_uppercase()).collect()
}

impl NavData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, NavDataError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self, NavDataError> {
        let raw: NavData = serde_json::from_str(json)?;
        let data = Self {
            fixes: upper_keys(raw.fixes),
            sids: upper_keys(raw.sids)
                .into_iter()
                .map(|(k, v)| (k, upper_list(v)))
                .collect(),
            stars: upper_keys(raw.stars)
                .into_iter()
                .map(|(k, v)| (k, upper_list(v)))
                .collect(),
            airways: upper_keys(raw.airways)
                .into_iter()
                .map(|(k, v)| (k, upper_list(v)))
                .collect(),
        };
        log::debug!(
            "Loaded navdata — fixes={} sids={} stars={} airways={}",
            data.fixes.len(),
            data.sids.len(),
            data.stars.len(),
            data.airways.len()
        );
        Ok(data)
    }

    pub fn with_fix(mut self, id: &str, lat: f64, lon: f64) -> Self {
        self.fixes.insert(id.to_uppercase(), LatLon::new(lat, lon));
        self
    }

    pub fn with_procedure(mut self, kind: ProcedureKind, code: &str, waypoints: &[&str]) -> Self {
        let list = waypoints.iter().map(|s| s.to_uppercase()).collect();
        match kind {
            ProcedureKind::Departure => self.sids.insert(code.to_uppercase(), list),
            ProcedureKind::Arrival => self.stars.insert(code.to_uppercase(), list),
        };
        self
    }

    pub fn with_airway(mut self, id: &str, fixes: &[&str]) -> Self {
        self.airways.insert(
            id.to_uppercase(),
            fixes.iter().map(|s| s.to_uppercase()).collect(),
        );
        self
    }

    /// Fixes along `airway` between `from` and `to`, both included. The
    /// slice is reversed when the route flies the airway backwards.
    pub fn airway_segment(&self, airway: &str, from: &str, to: &str) -> Option<Vec<String>> {
        let fixes = self.airways.get(&airway.to_uppercase())?;
        let start = fixes.iter().position(|f| f.eq_ignore_ascii_case(from))?;
        let end = fixes.iter().position(|f| f.eq_ignore_ascii_case(to))?;

        if start <= end {
            Some(fixes[start..=end].to_vec())
        } else {
            Some(fixes[end..=start].iter().rev().cloned().collect())
        }
    }
}

impl LookupService for NavData {
    async fn lookup_procedure(
        &self,
        kind: ProcedureKind,
        code: &str,
    ) -> Result<Vec<String>, LookupError> {
        let table = match kind {
            ProcedureKind::Departure => &self.sids,
            ProcedureKind::Arrival => &self.stars,
        };
        table
            .get(&code.to_uppercase())
            .filter(|wps| !wps.is_empty())
            .cloned()
            .ok_or_else(|| LookupError::NotFound(format!("{} {}", kind.as_str(), code)))
    }

    async fn lookup_airway_segment(
        &self,
        airway: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<String>, LookupError> {
        self.airway_segment(airway, from, to)
            .ok_or_else(|| LookupError::NotFound(format!("{} {}..{}", airway, from, to)))
    }

    async fn lookup_fixes(&self, ids: &[String]) -> Result<HashMap<String, LatLon>, LookupError> {
        Ok(ids
            .iter()
            .filter_map(|id| {
                let key = id.to_uppercase();
                self.fixes.get(&key).map(|pos| (key, *pos))
            })
            .collect())
    }
}
