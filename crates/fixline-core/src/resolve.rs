// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::lookup::{LatLon, LookupError, LookupService};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFix {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
}

impl ResolvedFix {
    pub fn position(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }
}

/// Outcome of one batched fix lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Known fixes, in candidate order (duplicates kept).
    pub resolved: Vec<ResolvedFix>,
    /// Unknown identifiers, each once, in first-seen order.
    pub missing: Vec<String>,
}

/// Resolves every candidate with a single batched lookup.
///
/// A transport failure fails the whole call. Identifiers the service does
/// not know are reported in `missing`, never as an error.
pub async fn resolve_fixes<L: LookupService + ?Sized>(
    lookup: &L,
    ids: &[String],
) -> Result<Resolution, LookupError> {
    if ids.is_empty() {
        return Ok(Resolution::default());
    }

    let positions = lookup.lookup_fixes(ids).await?;

    let mut resolution = Resolution::default();
    let mut seen_missing = HashSet::new();
    for id in ids {
        match positions.get(id) {
            Some(pos) => resolution.resolved.push(ResolvedFix {
                id: id.clone(),
                lat: pos.lat,
                lon: pos.lon,
            }),
            None => {
                if seen_missing.insert(id.as_str()) {
                    resolution.missing.push(id.clone());
                }
            }
        }
    }

    if !resolution.missing.is_empty() {
        warn!("Unresolved fixes — missing={}", resolution.missing.join(","));
    }
    debug!(
        "Resolved fixes — requested={} resolved={} missing={}",
        ids.len(),
        resolution.resolved.len(),
        resolution.missing.len()
    );
    Ok(resolution)
}

/// Drops a fix when it repeats the one right before it.
pub fn collapse_adjacent(fixes: &[ResolvedFix]) -> Vec<ResolvedFix> {
    let mut path: Vec<ResolvedFix> = Vec::with_capacity(fixes.len());
    for fix in fixes {
        if path.last().map(|last| last.id == fix.id).unwrap_or(false) {
            continue;
        }
        path.push(fix.clone());
    }
    path
}
