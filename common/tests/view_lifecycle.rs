use std::cell::Cell;
use std::rc::Rc;

use jitterplot_common::{
    parse_csv, Error, LoadPhase, ManualHost, Point, PlotConfig, ScatterPlotView,
};
use pretty_assertions::assert_eq;

struct Harness {
    host: Rc<ManualHost>,
    changes: Rc<Cell<usize>>,
    view: ScatterPlotView<ManualHost>,
}

fn mount_with(offset: f64) -> Harness {
    let host = Rc::new(ManualHost::new());
    let changes = Rc::new(Cell::new(0));
    let view = {
        let changes = Rc::clone(&changes);
        ScatterPlotView::mount(
            PlotConfig::default(),
            Rc::clone(&host),
            Box::new(move || offset),
            move || changes.set(changes.get() + 1),
        )
        .unwrap()
    };
    Harness {
        host,
        changes,
        view,
    }
}

const CSV: &str = "\
name,mpg,cyl,hp
B,25,4,200
Zero,0,4,0
Broken,n/a,8,150
";

#[test]
fn load_enters_one_marker_per_row() {
    let h = mount_with(3.2);
    assert_eq!(h.view.phase(), LoadPhase::Loading);
    assert!(h.view.markers().is_empty());

    h.view.load(parse_csv(CSV));

    assert_eq!(h.view.phase(), LoadPhase::Ready);
    assert_eq!(h.changes.get(), 1);
    let markers = h.view.markers();
    assert_eq!(
        markers.markers().iter().map(|m| m.name()).collect::<Vec<_>>(),
        ["B", "Zero", "Broken"]
    );
    assert_eq!(
        markers.markers()[0].position_at(0.0).translate().as_deref(),
        Some("translate(405,195)")
    );
    assert_eq!(markers.markers()[2].position_at(0.0).translate(), None);
    assert!(!markers.is_animating(h.view.now_ms()));
}

#[test]
fn tick_perturbs_and_animates_markers() {
    let h = mount_with(3.2);
    h.view.load(parse_csv(CSV));

    h.host.advance(1500.0);
    assert_eq!(h.view.scheduler().ticks(), 1);
    assert_eq!(h.changes.get(), 2);

    let data = h.view.dataset();
    assert!((data[0].x - 28.2).abs() < 1e-9);
    assert!((data[0].y - 203.2).abs() < 1e-9);
    assert_eq!(data[1], Point::new("Zero", 0.0, 0.0));
    assert!(data[2].x.is_nan());
    assert_eq!(data[2].y, 150.0);
    assert_eq!(data.len(), 3);

    let scales = *h.view.scales();
    let markers = h.view.markers();
    let marker = &markers.markers()[0];
    let start = scales.project(&Point::new("B", 25.0, 200.0));
    let end = scales.project(&data[0]);
    assert_eq!(marker.position_at(1500.0), start);
    assert!(markers.is_animating(1750.0));
    assert_eq!(marker.position_at(2000.0), end);
    assert!(!markers.is_animating(2000.0));
}

#[test]
fn empty_dataset_renders_axes_and_no_markers() {
    let h = mount_with(3.2);
    h.view.load(Ok(Vec::new()));

    assert_eq!(h.view.axes().bottom.ticks.len(), 11);
    assert_eq!(h.view.axes().left.ticks.len(), 9);

    h.host.advance(1500.0 * 3.0);
    assert_eq!(h.view.scheduler().ticks(), 3);
    assert!(h.view.markers().is_empty());
    assert!(h.view.dataset().is_empty());
}

#[test]
fn unmount_with_pending_timer_stops_all_updates() {
    let h = mount_with(3.2);
    h.view.load(parse_csv(CSV));
    h.host.advance(700.0);
    assert_eq!(h.host.pending(), 1);

    let before = (*h.view.dataset()).clone();
    let changes = h.changes.get();
    h.view.unmount();

    assert_eq!(h.host.pending(), 0);
    h.host.advance(10_000.0);
    assert_eq!(*h.view.dataset(), before);
    assert_eq!(h.changes.get(), changes);
    assert!(!h.view.is_mounted());
}

#[test]
fn late_load_after_unmount_is_ignored() {
    let h = mount_with(3.2);
    h.view.unmount();
    h.view.load(parse_csv(CSV));

    assert_eq!(h.view.phase(), LoadPhase::Loading);
    assert!(h.view.dataset().is_empty());
    assert_eq!(h.changes.get(), 0);
}

#[test]
fn failed_load_surfaces_error_and_stops_loop() {
    let h = mount_with(3.2);
    h.view.load(Err(Error::status(404, "https://example.invalid/mtcars.csv")));

    assert_eq!(
        h.view.phase(),
        LoadPhase::Failed("https://example.invalid/mtcars.csv answered with HTTP 404".to_owned())
    );
    assert_eq!(h.changes.get(), 1);
    assert!(h.view.scheduler().is_stopped());
    assert_eq!(h.host.pending(), 0);

    h.host.advance(5000.0);
    assert!(h.view.markers().is_empty());
}

#[test]
fn dropping_view_cancels_timer() {
    let h = mount_with(3.2);
    let host = Rc::clone(&h.host);
    drop(h);
    assert_eq!(host.pending(), 0);
}

#[test]
fn invalid_config_is_rejected() {
    let config = PlotConfig {
        interval_ms: 0,
        ..PlotConfig::default()
    };
    let result = ScatterPlotView::mount(
        config,
        Rc::new(ManualHost::new()),
        Box::new(|| 0.0),
        || {},
    );
    assert!(result.is_err());
}
