// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz
//
// End-to-end plotting: expansion, one batched fix call, overlay store
// updates and status line messages.

mod common;

use common::{cle_navdata, strings, FixMode, TestLookup};
use fixline_core::overlay::OverlayStore;
use fixline_core::{FeatureCanvas, PlotError, RoutePlotter, StatusLine};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

const CYAN: &str = "#00ffff";

fn plotter(lookup: TestLookup) -> (RoutePlotter<TestLookup, FeatureCanvas, StatusLine>, StatusLine) {
    let status = StatusLine::new();
    let store = Arc::new(Mutex::new(OverlayStore::new(FeatureCanvas::new())));
    (RoutePlotter::new(lookup, store, status.clone()), status)
}

#[tokio::test]
async fn test_two_fix_route_is_plotted() {
    let (plotter, status) = plotter(TestLookup::new(cle_navdata()));

    let report = plotter.plot("aaaa bbbb", CYAN).await.unwrap();
    let id = report.route_id.expect("route should be stored");

    let store = plotter.lock_store();
    assert_eq!(store.len(), 1);
    let route = store.get(id).unwrap();
    assert_eq!(route.label, "AAAA BBBB");
    assert_eq!(route.color, CYAN);
    assert_eq!(route.coordinates.len(), 2);
    assert_eq!(route.handles().markers.len(), 2);
    assert_eq!(status.text(), "");
}

#[tokio::test]
async fn test_failed_airway_still_plots_endpoints() {
    let (plotter, status) = plotter(TestLookup::new(cle_navdata()));

    // Q82 does not join JFK and ALB, so the airway lookup fails.
    let report = plotter.plot("JFK Q82 ALB", CYAN).await.unwrap();
    assert_eq!(report.candidates, strings(&["JFK", "ALB"]));
    assert!(report.missing.is_empty());

    let store = plotter.lock_store();
    assert_eq!(store.len(), 1);
    let route = store.get(report.route_id.unwrap()).unwrap();
    assert_eq!(route.handles().markers.len(), 2);
    assert_eq!(status.text(), "");
}

#[tokio::test]
async fn test_single_unknown_fix_reports_missing() {
    let (plotter, status) = plotter(TestLookup::new(cle_navdata()));

    let report = plotter.plot("XXXX", CYAN).await.unwrap();
    assert_eq!(report.route_id, None);
    assert_eq!(report.missing, strings(&["XXXX"]));
    assert!(report.resolved.is_empty());
    assert!(plotter.lock_store().is_empty());
    assert_eq!(status.text(), "⚠️ Missing fixes: XXXX");
}

#[tokio::test]
async fn test_partial_resolution_plots_and_warns() {
    let (plotter, status) = plotter(TestLookup::new(cle_navdata()));

    let report = plotter.plot("JHW XXXX PONCT YYYY", CYAN).await.unwrap();
    assert!(report.route_id.is_some());
    assert_eq!(report.missing, strings(&["XXXX", "YYYY"]));
    assert_eq!(status.text(), "⚠️ Missing fixes: XXXX, YYYY");
    assert_eq!(plotter.lock_store().renderer().live_count(), 3);
}

#[tokio::test]
async fn test_one_resolved_fix_is_not_plotted() {
    let (plotter, status) = plotter(TestLookup::new(cle_navdata()));

    let report = plotter.plot("JHW", CYAN).await.unwrap();
    assert_eq!(report.route_id, None);
    assert_eq!(report.resolved.len(), 1);
    assert!(plotter.lock_store().is_empty());
    assert_eq!(plotter.lock_store().renderer().created_count(), 0);
    assert_eq!(status.text(), "");
}

#[tokio::test]
async fn test_fixes_resolved_in_one_call() {
    let (plotter, _) = plotter(TestLookup::new(cle_navdata()));

    let report = plotter
        .plot("HHOWE4.LNCON JHW Q82 PONCT.JFUND2", CYAN)
        .await
        .unwrap();
    assert_eq!(plotter.lookup().fix_calls(), 1);

    // JHW from the SID and the airway start collapses into one point.
    let ids: Vec<&str> = report.resolved.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["LNCON", "SIKKS", "JHW", "MEMMS", "WOZEE", "PONCT", "GAYEL", "JFUND"]
    );
    let store = plotter.lock_store();
    let route = store.get(report.route_id.unwrap()).unwrap();
    assert_eq!(route.coordinates.len(), 8);
    assert_eq!(route.handles().markers.len(), 8);
}

#[tokio::test]
async fn test_repeated_adjacent_fix_collapses() {
    let (plotter, _) = plotter(TestLookup::new(cle_navdata()));

    let report = plotter.plot("JHW JHW JHW", CYAN).await.unwrap();
    assert_eq!(report.candidates.len(), 3);
    assert_eq!(report.route_id, None);
    assert!(plotter.lock_store().is_empty());
}

#[tokio::test]
async fn test_transport_failure_leaves_store_untouched() {
    let lookup = TestLookup::new(cle_navdata()).with_fix_mode(FixMode::Fail);
    let (plotter, status) = plotter(lookup);

    let result = plotter.plot("AAAA BBBB", CYAN).await;
    assert!(matches!(result, Err(PlotError::Lookup(_))));
    assert!(plotter.lock_store().is_empty());
    assert_eq!(plotter.lock_store().renderer().created_count(), 0);
    assert_eq!(status.text(), "An error occurred while fetching route data.");
}

#[tokio::test]
async fn test_blank_input_is_noop() {
    let (plotter, status) = plotter(TestLookup::new(cle_navdata()));

    let report = plotter.plot("   ", CYAN).await.unwrap();
    assert_eq!(report.route_id, None);
    assert_eq!(plotter.lookup().fix_calls(), 0);
    assert_eq!(status.text(), "");
}

#[tokio::test]
async fn test_cancel_in_flight_request() {
    let lookup = TestLookup::new(cle_navdata()).with_fix_mode(FixMode::Hang);
    let (plotter, status) = plotter(lookup);
    let token = CancellationToken::new();

    let (result, _) = tokio::join!(plotter.plot_cancellable("AAAA BBBB", CYAN, &token), async {
        tokio::task::yield_now().await;
        token.cancel();
    });

    assert!(matches!(result, Err(PlotError::Cancelled)));
    assert_eq!(plotter.lookup().fix_calls(), 1);
    assert!(plotter.lock_store().is_empty());
    assert_eq!(plotter.lock_store().renderer().created_count(), 0);
    assert_eq!(status.text(), "Route request cancelled.");
}

#[tokio::test]
async fn test_precancelled_request_does_no_lookups() {
    let (plotter, _) = plotter(TestLookup::new(cle_navdata()));
    let token = CancellationToken::new();
    token.cancel();

    let result = plotter.plot_cancellable("JHW Q82 PONCT", CYAN, &token).await;
    assert!(matches!(result, Err(PlotError::Cancelled)));
    assert_eq!(plotter.lookup().airway_calls(), 0);
    assert_eq!(plotter.lookup().fix_calls(), 0);
}

#[tokio::test]
async fn test_concurrent_plots_get_distinct_ids() {
    let (plotter, _) = plotter(TestLookup::new(cle_navdata()));

    let results = futures::future::join_all(
        ["AAAA BBBB", "JHW Q82 PONCT", "JFK ALB"]
            .iter()
            .map(|route| plotter.plot(route, CYAN)),
    )
    .await;

    let mut ids: Vec<_> = results
        .into_iter()
        .map(|r| r.unwrap().route_id.unwrap())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    assert_eq!(plotter.lock_store().len(), 3);
}

#[tokio::test]
async fn test_recolor_and_remove_through_plotter() {
    let (plotter, _) = plotter(TestLookup::new(cle_navdata()));
    let id = plotter.plot("JHW Q82 PONCT", CYAN).await.unwrap().route_id.unwrap();

    assert!(plotter.recolor(id, "#ff8800"));
    assert_eq!(plotter.lock_store().get(id).unwrap().color, "#ff8800");

    let created = plotter.lock_store().renderer().created_count();
    assert!(plotter.remove(id));
    assert!(!plotter.remove(id));
    assert!(!plotter.recolor(id, "#000000"));

    let store = plotter.lock_store();
    assert!(store.is_empty());
    assert_eq!(store.renderer().destroyed_count(), created);
    assert_eq!(store.renderer().live_count(), 0);
}

#[tokio::test]
async fn test_poisoned_store_lock_is_recovered() {
    let (plotter, _) = plotter(TestLookup::new(cle_navdata()));
    let first = plotter.plot("JHW PONCT", CYAN).await.unwrap().route_id.unwrap();

    let shared = plotter.store().clone();
    let poisoner = std::thread::spawn(move || {
        let _guard = shared.lock().unwrap();
        panic!("panic while holding the store lock");
    });
    assert!(poisoner.join().is_err());
    assert!(plotter.store().is_poisoned());

    // Routes added before the panic are still intact and owned
    assert_eq!(plotter.lock_store().len(), 1);
    assert!(plotter.lock_store().get(first).is_some());

    let second = plotter.plot("AAAA BBBB", CYAN).await.unwrap().route_id.unwrap();
    assert_ne!(first, second);
    let store = plotter.lock_store();
    assert_eq!(store.len(), 2);
    assert_eq!(store.renderer().live_count(), 2 * 3);
}
