// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

#![allow(dead_code)]

use fixline_core::lookup::NavData;
use fixline_core::{LatLon, LookupError, LookupService};
use fixline_grammar::ProcedureKind;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Behaviour of the batched fix call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixMode {
    Answer,
    Fail,
    Hang,
}

/// NavData-backed lookup that counts calls and can fail or stall on demand.
pub struct TestLookup {
    pub nav: NavData,
    pub fix_mode: FixMode,
    /// Returned for every airway query instead of slicing `nav`.
    pub fixed_segment: Option<Vec<String>>,
    pub procedure_calls: AtomicUsize,
    pub airway_calls: AtomicUsize,
    pub fix_calls: AtomicUsize,
}

impl TestLookup {
    pub fn new(nav: NavData) -> Self {
        Self {
            nav,
            fix_mode: FixMode::Answer,
            fixed_segment: None,
            procedure_calls: AtomicUsize::new(0),
            airway_calls: AtomicUsize::new(0),
            fix_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_fix_mode(mut self, mode: FixMode) -> Self {
        self.fix_mode = mode;
        self
    }

    pub fn with_fixed_segment(mut self, segment: &[&str]) -> Self {
        self.fixed_segment = Some(segment.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn fix_calls(&self) -> usize {
        self.fix_calls.load(Ordering::SeqCst)
    }

    pub fn airway_calls(&self) -> usize {
        self.airway_calls.load(Ordering::SeqCst)
    }
}

impl LookupService for TestLookup {
    async fn lookup_procedure(
        &self,
        kind: ProcedureKind,
        code: &str,
    ) -> Result<Vec<String>, LookupError> {
        self.procedure_calls.fetch_add(1, Ordering::SeqCst);
        self.nav.lookup_procedure(kind, code).await
    }

    async fn lookup_airway_segment(
        &self,
        airway: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<String>, LookupError> {
        self.airway_calls.fetch_add(1, Ordering::SeqCst);
        match &self.fixed_segment {
            Some(segment) => Ok(segment.clone()),
            None => self.nav.lookup_airway_segment(airway, from, to).await,
        }
    }

    async fn lookup_fixes(&self, ids: &[String]) -> Result<HashMap<String, LatLon>, LookupError> {
        self.fix_calls.fetch_add(1, Ordering::SeqCst);
        match self.fix_mode {
            FixMode::Answer => self.nav.lookup_fixes(ids).await,
            FixMode::Fail => Err(LookupError::Network("connection refused".to_string())),
            FixMode::Hang => std::future::pending().await,
        }
    }
}

/// Small slice of the Cleveland/Buffalo area.
pub fn cle_navdata() -> NavData {
    NavData::new()
        .with_fix("JFK", 40.63, -73.77)
        .with_fix("ALB", 42.75, -73.80)
        .with_fix("AAAA", 41.00, -81.00)
        .with_fix("BBBB", 42.00, -80.00)
        .with_fix("JHW", 42.19, -79.12)
        .with_fix("MEMMS", 42.10, -78.40)
        .with_fix("WOZEE", 42.05, -77.60)
        .with_fix("PONCT", 42.00, -76.90)
        .with_fix("LNCON", 41.90, -81.10)
        .with_fix("SIKKS", 42.05, -80.20)
        .with_fix("GAYEL", 41.60, -76.20)
        .with_fix("JFUND", 41.10, -75.40)
        .with_airway("Q82", &["JHW", "MEMMS", "WOZEE", "PONCT"])
        .with_procedure(
            ProcedureKind::Departure,
            "HHOWE4.LNCON",
            &["LNCON", "SIKKS", "JHW"],
        )
        .with_procedure(
            ProcedureKind::Arrival,
            "PONCT.JFUND2",
            &["PONCT", "GAYEL", "JFUND"],
        )
}

pub fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
