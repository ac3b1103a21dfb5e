use foldline_connector_core::{
    AnchorPoint, Connector, ConnectorConfig, ConnectorState, LayoutProvider, LayoutSnapshot,
    RenderUpdate, Signal, Track,
};
use foldline_test_fixtures::layouts;

fn load(name: &str) -> LayoutSnapshot {
    layouts().load(name).expect("layout fixture")
}

#[derive(Default)]
struct Recorder {
    paths: Vec<(Track, String)>,
    dashes: Vec<(f64, f64)>,
    clears: usize,
}

impl foldline_connector_core::RenderSink for Recorder {
    fn set_path(&mut self, track: Track, descriptor: &str) {
        self.paths.push((track, descriptor.to_string()));
    }
    fn set_dash(&mut self, dash: foldline_connector_core::DashState) {
        self.dashes.push((dash.total_length, dash.hidden_length));
    }
    fn clear(&mut self) {
        self.clears += 1;
    }
}

#[test]
fn fixture_anchors_are_container_relative() {
    let snap = load("three-mockups");
    let ids = ConnectorConfig::default().anchor_ids;
    let anchors: Vec<_> = snap.measure_anchors(&ids).into_iter().map(Option::unwrap).collect();
    assert_eq!(
        anchors,
        vec![
            AnchorPoint::new(220.0, 340.0),
            AnchorPoint::new(740.0, 790.0),
            AnchorPoint::new(220.0, 1240.0),
        ]
    );
}

#[test]
fn all_three_tracks_receive_identical_descriptor() {
    let mut c = Connector::new(ConnectorConfig::default()).unwrap();
    let mut rec = Recorder::default();
    c.handle(Signal::Activated, &load("three-mockups"), &mut rec);

    assert_eq!(rec.paths.len(), 3);
    let tracks: Vec<Track> = rec.paths.iter().map(|(t, _)| *t).collect();
    assert_eq!(tracks, Track::ALL.to_vec());
    assert!(rec.paths.iter().all(|(_, d)| d == &rec.paths[0].1));
    // Initial fully-hidden mask, then the reveal.
    assert_eq!(rec.dashes.len(), 2);
    assert_eq!(rec.dashes[0].0, rec.dashes[0].1);
}

#[test]
fn reveal_fraction_for_fixture() {
    let mut c = Connector::new(ConnectorConfig::default()).unwrap();
    let f = c
        .handle(Signal::Activated, &load("three-mockups"), &mut RenderUpdate::default())
        .unwrap();
    // (1000 * 0.8 - 400) / 1500
    assert!((f - 400.0 / 1500.0).abs() < 1e-12);
}

#[test]
fn scrolled_past_clamps_to_ceiling() {
    let mut c = Connector::new(ConnectorConfig::default()).unwrap();
    let mut out = RenderUpdate::default();
    let f = c.handle(Signal::Activated, &load("scrolled-past"), &mut out).unwrap();
    assert_eq!(f, 1.05);
    let dash = out.dash.unwrap();
    assert!(dash.hidden_length < 0.0);
}

#[test]
fn hidden_mockup_draws_nothing() {
    let mut c = Connector::new(ConnectorConfig::default()).unwrap();
    let mut rec = Recorder::default();
    let f = c.handle(Signal::Activated, &load("hidden-mockup"), &mut rec).unwrap();
    assert_eq!(f, 0.0);
    assert!(rec.paths.is_empty());
    assert!(rec.dashes.is_empty());
    assert_eq!(rec.clears, 0);
    assert_eq!(c.state(), ConnectorState::Uninitialized);

    // Self-heals once the mockup is laid out.
    let f = c.handle(Signal::Scroll, &load("three-mockups"), &mut rec).unwrap();
    assert!(f > 0.0);
    assert_eq!(rec.paths.len(), 3);
}

#[test]
fn missing_container_draws_nothing() {
    let mut c = Connector::new(ConnectorConfig::default()).unwrap();
    let mut out = RenderUpdate::default();
    assert_eq!(c.handle(Signal::Activated, &load("no-container"), &mut out), Some(0.0));
    assert!(out.is_empty());
}

#[test]
fn mockup_vanishing_mid_scroll_keeps_strokes() {
    let mut c = Connector::new(ConnectorConfig::default()).unwrap();
    let mut rec = Recorder::default();
    c.handle(Signal::Activated, &load("three-mockups"), &mut rec);
    let (paths, dashes) = (rec.paths.len(), rec.dashes.len());

    let mut snap = load("three-mockups");
    snap.anchors.remove("mockup-3");
    assert_eq!(c.handle(Signal::Scroll, &snap, &mut rec), Some(0.0));
    assert_eq!(rec.paths.len(), paths);
    assert_eq!(rec.dashes.len(), dashes);
    assert_eq!(rec.clears, 0);
    assert_eq!(c.state(), ConnectorState::Uninitialized);
    assert!(c.path().is_none());
}

#[test]
fn deactivation_clears_strokes() {
    let mut c = Connector::new(ConnectorConfig::default()).unwrap();
    let mut rec = Recorder::default();
    c.handle(Signal::Activated, &load("three-mockups"), &mut rec);
    c.handle(Signal::Deactivated, &load("three-mockups"), &mut rec);
    assert_eq!(rec.clears, 1);
}

#[test]
fn scrolling_through_fixture_is_monotonic_without_rebuilds() {
    let base = load("three-mockups");
    let mut c = Connector::new(ConnectorConfig::default()).unwrap();
    c.handle(Signal::Activated, &base, &mut RenderUpdate::default());

    let mut prev = 0.0;
    for step in 0..40 {
        let snap = base.scrolled_by(step as f64 * 60.0);
        let mut out = RenderUpdate::default();
        let f = c.handle(Signal::Scroll, &snap, &mut out).unwrap();
        assert!(out.path.is_none(), "step {step} rebuilt the path");
        assert!(f >= prev);
        prev = f;
    }
    assert_eq!(prev, 1.05);
}
