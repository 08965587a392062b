// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Plotted route overlays.
//!
//! The store is the only owner of the render handles it creates. A route
//! goes `absent -> live` on [`OverlayStore::add`], stays live across
//! [`OverlayStore::recolor`], and ends on [`OverlayStore::remove`] or when
//! the whole store is cleared or dropped.

use crate::lookup::LatLon;
use crate::render::Renderer;
use crate::resolve::ResolvedFix;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum OverlayError {
    #[error("A route needs at least 2 resolved fixes, got {0}")]
    TooFewPoints(usize),
}

/// Opaque, never reused identifier of a plotted route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RouteId(u64);

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "route-{}", self.0)
    }
}

#[derive(Debug)]
pub struct RenderHandles<H> {
    pub path: H,
    pub markers: Vec<H>,
}

#[derive(Debug)]
pub struct PlottedRoute<H> {
    pub id: RouteId,
    /// Raw route input, upper-cased.
    pub label: String,
    pub color: String,
    /// Fix identifiers, one per coordinate.
    pub fixes: Vec<String>,
    pub coordinates: Vec<LatLon>,
    pub plotted_at: DateTime<Utc>,
    handles: RenderHandles<H>,
}

impl<H> PlottedRoute<H> {
    pub fn handles(&self) -> &RenderHandles<H> {
        &self.handles
    }
}

pub struct OverlayStore<R: Renderer> {
    renderer: R,
    routes: BTreeMap<RouteId, PlottedRoute<R::Handle>>,
    next_id: u64,
}

impl<R: Renderer> OverlayStore<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            routes: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Draws a path through `fixes` plus one marker per fix and stores it.
    pub fn add(
        &mut self,
        label: &str,
        color: &str,
        fixes: &[ResolvedFix],
    ) -> Result<RouteId, OverlayError> {
        if fixes.len() < 2 {
            return Err(OverlayError::TooFewPoints(fixes.len()));
        }

        self.next_id += 1;
        let id = RouteId(self.next_id);

        let coordinates: Vec<LatLon> = fixes.iter().map(ResolvedFix::position).collect();
        let path = self.renderer.create_path(&coordinates, color);
        let markers = fixes
            .iter()
            .map(|fix| self.renderer.create_marker(fix.position(), color, &fix.id))
            .collect();

        self.routes.insert(
            id,
            PlottedRoute {
                id,
                label: label.to_string(),
                color: color.to_string(),
                fixes: fixes.iter().map(|f| f.id.clone()).collect(),
                coordinates,
                plotted_at: Utc::now(),
                handles: RenderHandles { path, markers },
            },
        );
        info!(
            "Plotted route — id={} label=\"{}\" fixes={} color={}",
            id,
            label,
            fixes.len(),
            color
        );
        Ok(id)
    }

    /// Recolors the route's existing handles in place. Returns false when
    /// `id` is unknown.
    pub fn recolor(&mut self, id: RouteId, color: &str) -> bool {
        let Some(route) = self.routes.get_mut(&id) else {
            return false;
        };
        self.renderer.set_color(&route.handles.path, color);
        for marker in &route.handles.markers {
            self.renderer.set_color(marker, color);
        }
        route.color = color.to_string();
        debug!("Recolored route — id={} color={}", id, color);
        true
    }

    /// Releases every handle of the route and forgets it. Returns false when
    /// `id` is unknown.
    ///
    /// The entry leaves the map before its handles are destroyed; the handles
    /// move into `destroy`, so a released handle is never reachable from the
    /// store.
    pub fn remove(&mut self, id: RouteId) -> bool {
        let Some(route) = self.routes.remove(&id) else {
            return false;
        };
        let marker_count = route.handles.markers.len();
        release(&mut self.renderer, route.handles);
        info!("Removed route — id={} markers={}", id, marker_count);
        true
    }

    /// Removes every route (map teardown).
    pub fn clear(&mut self) {
        let routes = std::mem::take(&mut self.routes);
        let count = routes.len();
        for (_, route) in routes {
            release(&mut self.renderer, route.handles);
        }
        if count > 0 {
            info!("Cleared overlay store — routes={}", count);
        }
    }

    pub fn get(&self, id: RouteId) -> Option<&PlottedRoute<R::Handle>> {
        self.routes.get(&id)
    }

    /// Live routes in plotting order.
    pub fn iter(&self) -> impl Iterator<Item = &PlottedRoute<R::Handle>> {
        self.routes.values()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn release<R: Renderer>(renderer: &mut R, handles: RenderHandles<R::Handle>) {
    renderer.destroy(handles.path);
    for marker in handles.markers {
        renderer.destroy(marker);
    }
}

impl<R: Renderer> Drop for OverlayStore<R> {
    fn drop(&mut self) {
        self.clear();
    }
}
