// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::lookup::LatLon;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Map layer that draws route overlays.
///
/// Handles are moved into [`Renderer::destroy`], so a handle can be
/// released at most once.
pub trait Renderer {
    type Handle;

    fn create_path(&mut self, coords: &[LatLon], color: &str) -> Self::Handle;
    fn create_marker(&mut self, coord: LatLon, color: &str, tooltip: &str) -> Self::Handle;
    fn set_color(&mut self, handle: &Self::Handle, color: &str);
    fn destroy(&mut self, handle: Self::Handle);
}

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct FeatureHandle(u64);

#[derive(Debug, Clone)]
enum Geometry {
    Path(Vec<LatLon>),
    Marker(LatLon),
}

#[derive(Debug, Clone)]
struct Feature {
    geometry: Geometry,
    color: String,
    tooltip: Option<String>,
}

/// In-memory renderer that keeps live features and exports them as GeoJSON.
#[derive(Debug, Default)]
pub struct FeatureCanvas {
    features: BTreeMap<u64, Feature>,
    next_id: u64,
    created: usize,
    destroyed: usize,
    recolored: usize,
}

impl FeatureCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, feature: Feature) -> FeatureHandle {
        self.next_id += 1;
        self.created += 1;
        self.features.insert(self.next_id, feature);
        FeatureHandle(self.next_id)
    }

    pub fn live_count(&self) -> usize {
        self.features.len()
    }

    pub fn created_count(&self) -> usize {
        self.created
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    pub fn recolor_count(&self) -> usize {
        self.recolored
    }

    pub fn color_of(&self, handle: &FeatureHandle) -> Option<&str> {
        self.features.get(&handle.0).map(|f| f.color.as_str())
    }

    pub fn is_live(&self, handle: &FeatureHandle) -> bool {
        self.features.contains_key(&handle.0)
    }

    /// Live features as a GeoJSON `FeatureCollection` (lon/lat order).
    pub fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self
            .features
            .values()
            .map(|f| {
                let geometry = match &f.geometry {
                    Geometry::Path(coords) => json!({
                        "type": "LineString",
                        "coordinates": coords.iter().map(|c| [c.lon, c.lat]).collect::<Vec<_>>(),
                    }),
                    Geometry::Marker(c) => json!({
                        "type": "Point",
                        "coordinates": [c.lon, c.lat],
                    }),
                };
                let mut properties = json!({ "color": f.color });
                if let Some(tooltip) = &f.tooltip {
                    properties["tooltip"] = json!(tooltip);
                }
                json!({
                    "type": "Feature",
                    "geometry": geometry,
                    "properties": properties,
                })
            })
            .collect();

        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }
}

impl Renderer for FeatureCanvas {
    type Handle = FeatureHandle;

    fn create_path(&mut self, coords: &[LatLon], color: &str) -> FeatureHandle {
        self.insert(Feature {
            geometry: Geometry::Path(coords.to_vec()),
            color: color.to_string(),
            tooltip: None,
        })
    }

    fn create_marker(&mut self, coord: LatLon, color: &str, tooltip: &str) -> FeatureHandle {
        self.insert(Feature {
            geometry: Geometry::Marker(coord),
            color: color.to_string(),
            tooltip: Some(tooltip.to_string()),
        })
    }

    fn set_color(&mut self, handle: &FeatureHandle, color: &str) {
        match self.features.get_mut(&handle.0) {
            Some(feature) => {
                feature.color = color.to_string();
                self.recolored += 1;
            }
            None => log::warn!("set_color on unknown feature — handle={}", handle.0),
        }
    }

    fn destroy(&mut self, handle: FeatureHandle) {
        if self.features.remove(&handle.0).is_some() {
            self.destroyed += 1;
        } else {
            log::warn!("destroy on unknown feature — handle={}", handle.0);
        }
    }
}
