// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Navigation data lookups.
//!
//! The engine only talks to [`LookupService`]. [`http::HttpLookup`] is the
//! online implementation; [`navdata::NavData`] serves the same queries from
//! a local JSON file.

pub mod http;
pub mod navdata;

use fixline_grammar::ProcedureKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub use http::HttpLookup;
pub use navdata::{NavData, NavDataError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid response: {0}")]
    Decode(String),
    #[error("Invalid lookup URL: {0}")]
    InvalidUrl(String),
}

/// Read-only source of procedures, airways and fix positions.
///
/// Every call may fail; callers degrade rather than propagate.
#[allow(async_fn_in_trait)]
pub trait LookupService {
    /// Ordered waypoints of a SID or STAR keyed by its full code.
    async fn lookup_procedure(
        &self,
        kind: ProcedureKind,
        code: &str,
    ) -> Result<Vec<String>, LookupError>;

    /// Ordered fixes along `airway` from `from` to `to`, endpoints included.
    async fn lookup_airway_segment(
        &self,
        airway: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<String>, LookupError>;

    /// Positions for every known id in `ids`. Unknown ids are simply absent.
    async fn lookup_fixes(&self, ids: &[String]) -> Result<HashMap<String, LatLon>, LookupError>;
}

impl<T: LookupService + ?Sized> LookupService for &T {
    async fn lookup_procedure(
        &self,
        kind: ProcedureKind,
        code: &str,
    ) -> Result<Vec<String>, LookupError> {
        (**self).lookup_procedure(kind, code).await
    }

    async fn lookup_airway_segment(
        &self,
        airway: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<String>, LookupError> {
        (**self).lookup_airway_segment(airway, from, to).await
    }

    async fn lookup_fixes(&self, ids: &[String]) -> Result<HashMap<String, LatLon>, LookupError> {
        (**self).lookup_fixes(ids).await
    }
}
