// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod config;
pub mod expand;
pub mod lookup;
pub mod overlay;
pub mod plot;
pub mod render;
pub mod resolve;
pub mod status;

use std::path::PathBuf;

pub use config::{ConfigError, FixlineConfig};
pub use expand::expand_route;
pub use lookup::{LatLon, LookupError, LookupService};
pub use overlay::{OverlayError, OverlayStore, PlottedRoute, RouteId};
pub use plot::{PlotError, PlotReport, RoutePlotter};
pub use render::{FeatureCanvas, Renderer};
pub use resolve::{resolve_fixes, Resolution, ResolvedFix};
pub use status::{StatusLine, StatusSink};

/// Per-user configuration directory. Falls back to the working directory
/// when the platform has no home directory.
pub fn get_config_root() -> PathBuf {
    directories::ProjectDirs::from("org", "fixline", "fixline")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
