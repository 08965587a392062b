// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Route plotting: raw string in, overlay out.
//!
//! `expand -> resolve -> add`. Everything before `add` is async and touches
//! no shared state; `add` runs under the store lock after the last await,
//! so a cancelled request never leaves handles behind.

use crate::expand::expand_route;
use crate::lookup::{LookupError, LookupService};
use crate::overlay::{OverlayError, OverlayStore, RouteId};
use crate::render::Renderer;
use crate::resolve::{collapse_adjacent, resolve_fixes, ResolvedFix};
use crate::status::{
    missing_fixes_message, StatusSink, STATUS_CANCELLED, STATUS_FETCH_FAILED, STATUS_LOADING,
};
use log::{error, info, warn};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Fix lookup failed: {0}")]
    Lookup(#[from] LookupError),
    #[error("Route request cancelled")]
    Cancelled,
    #[error(transparent)]
    Overlay(#[from] OverlayError),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotReport {
    /// Set when a route was stored.
    pub route_id: Option<RouteId>,
    pub label: String,
    pub candidates: Vec<String>,
    /// Resolved fixes after adjacent duplicates were collapsed.
    pub resolved: Vec<ResolvedFix>,
    pub missing: Vec<String>,
}

pub type SharedOverlayStore<R> = Arc<Mutex<OverlayStore<R>>>;

pub struct RoutePlotter<L, R: Renderer, S> {
    lookup: L,
    store: SharedOverlayStore<R>,
    status: S,
}

impl<L, R, S> RoutePlotter<L, R, S>
where
    L: LookupService,
    R: Renderer,
    S: StatusSink,
{
    pub fn new(lookup: L, store: SharedOverlayStore<R>, status: S) -> Self {
        Self {
            lookup,
            store,
            status,
        }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn store(&self) -> &SharedOverlayStore<R> {
        &self.store
    }

    /// Locks the store. A poisoned lock is recovered; the route map is only
    /// written after every renderer call for that route has returned.
    pub fn lock_store(&self) -> MutexGuard<'_, OverlayStore<R>> {
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub async fn plot(&self, raw: &str, color: &str) -> Result<PlotReport, PlotError> {
        self.plot_cancellable(raw, color, &CancellationToken::new())
            .await
    }

    pub async fn plot_cancellable(
        &self,
        raw: &str,
        color: &str,
        cancel: &CancellationToken,
    ) -> Result<PlotReport, PlotError> {
        let label = raw.trim().to_uppercase();
        if label.is_empty() {
            return Ok(PlotReport::default());
        }

        self.status.set(STATUS_LOADING);

        let candidates = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(self.cancelled(&label)),
            candidates = expand_route(&self.lookup, &label) => candidates,
        };

        let resolution = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(self.cancelled(&label)),
            resolution = resolve_fixes(&self.lookup, &candidates) => resolution,
        };
        let resolution = match resolution {
            Ok(r) => r,
            Err(e) => {
                error!("Error fetching fixes — route=\"{}\" error={}", label, e);
                self.status.set(STATUS_FETCH_FAILED);
                return Err(e.into());
            }
        };

        if cancel.is_cancelled() {
            return Err(self.cancelled(&label));
        }

        let path = collapse_adjacent(&resolution.resolved);
        let route_id = if path.len() >= 2 {
            Some(self.lock_store().add(&label, color, &path)?)
        } else {
            warn!(
                "Not enough resolved fixes to draw — route=\"{}\" resolved={}",
                label,
                path.len()
            );
            None
        };

        if resolution.missing.is_empty() {
            self.status.clear();
        } else {
            self.status.set(&missing_fixes_message(&resolution.missing));
        }

        Ok(PlotReport {
            route_id,
            label,
            candidates,
            resolved: path,
            missing: resolution.missing,
        })
    }

    pub fn recolor(&self, id: RouteId, color: &str) -> bool {
        self.lock_store().recolor(id, color)
    }

    pub fn remove(&self, id: RouteId) -> bool {
        self.lock_store().remove(id)
    }

    fn cancelled(&self, label: &str) -> PlotError {
        info!("Route request cancelled — route=\"{}\"", label);
        self.status.set(STATUS_CANCELLED);
        PlotError::Cancelled
    }
}
