use spendpie_core::{
    ChartConfig, ChartRenderer, ChangeEvent, ChangeReducer, Expense, ExpenseId, Rgb,
    SegmentPhase, Span, SET2,
};
use std::f64::consts::TAU;
use std::time::Duration;

const TOLERANCE: f64 = 1e-9;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn expense(id: &str, cost: f64) -> Expense {
    Expense::with_id(ExpenseId::new(id), id.to_uppercase(), cost).unwrap()
}

fn id(value: &str) -> ExpenseId {
    ExpenseId::new(value)
}

fn fraction(renderer: &mut ChartRenderer, at: Duration, key: &str) -> f64 {
    let frame = renderer.frame(at);
    frame.segment(&id(key)).unwrap().span.fraction()
}

struct Harness {
    reducer: ChangeReducer,
    renderer: ChartRenderer,
}

impl Harness {
    fn new() -> Self {
        Self {
            reducer: ChangeReducer::new(),
            renderer: ChartRenderer::new(&ChartConfig::default()),
        }
    }

    fn push(&mut self, events: Vec<ChangeEvent>, now: Duration) {
        self.reducer.apply_batch(events);
        self.renderer.render(self.reducer.expenses(), now);
    }
}

#[test]
fn single_record_fills_the_circle() {
    let mut h = Harness::new();
    h.push(vec![ChangeEvent::added(expense("coffee", 5.0))], ms(0));

    let frame = h.renderer.frame(ms(800));
    assert_eq!(frame.segments.len(), 1);
    let segment = &frame.segments[0];
    assert_eq!(segment.span, Span::new(0.0, TAU));
    assert_eq!(segment.phase, SegmentPhase::Settled);
    assert!(segment.path.starts_with("M0,-150A150,150,0,1,1,0,150"));
}

#[test]
fn enter_grows_from_a_collapsed_end_boundary() {
    let mut h = Harness::new();
    h.push(
        vec![
            ChangeEvent::added(expense("a", 10.0)),
            ChangeEvent::added(expense("b", 30.0)),
        ],
        ms(0),
    );

    let start = h.renderer.frame(ms(0));
    let a = start.segment(&id("a")).unwrap();
    assert_eq!(a.phase, SegmentPhase::Entering);
    assert_eq!(a.span.width(), 0.0);
    assert!((a.span.end - TAU * 0.25).abs() < TOLERANCE);

    let halfway = h.renderer.frame(ms(400));
    let a = halfway.segment(&id("a")).unwrap();
    assert!((a.span.end - TAU * 0.25).abs() < TOLERANCE);
    assert!(a.span.start > 0.0 && a.span.start < a.span.end);

    assert!((fraction(&mut h.renderer, ms(800), "a") - 0.25).abs() < TOLERANCE);
    assert!((fraction(&mut h.renderer, ms(800), "b") - 0.75).abs() < TOLERANCE);
}

#[test]
fn modify_interpolates_from_prior_angles() {
    let mut h = Harness::new();
    h.push(
        vec![
            ChangeEvent::added(expense("a", 10.0)),
            ChangeEvent::added(expense("b", 30.0)),
        ],
        ms(0),
    );
    h.renderer.frame(ms(1000));

    h.push(vec![ChangeEvent::modified(expense("a", 40.0))], ms(1000));
    let old_end = TAU * 0.25;
    let new_end = TAU * 40.0 / 70.0;

    let at_start = h.renderer.frame(ms(1000));
    assert!((at_start.segment(&id("a")).unwrap().span.end - old_end).abs() < TOLERANCE);
    assert_eq!(
        at_start.segment(&id("a")).unwrap().phase,
        SegmentPhase::Updating
    );

    let midway = h.renderer.frame(ms(1400));
    let a_end = midway.segment(&id("a")).unwrap().span.end;
    assert!((a_end - (old_end + new_end) / 2.0).abs() < TOLERANCE);
    assert_eq!(midway.segment(&id("b")).unwrap().span.start, a_end);

    assert!((fraction(&mut h.renderer, ms(1800), "a") - 40.0 / 70.0).abs() < TOLERANCE);
    assert!((fraction(&mut h.renderer, ms(1800), "b") - 30.0 / 70.0).abs() < TOLERANCE);
}

#[test]
fn remove_collapses_before_dropping_the_segment() {
    let mut h = Harness::new();
    h.push(
        vec![
            ChangeEvent::added(expense("a", 40.0)),
            ChangeEvent::added(expense("b", 30.0)),
        ],
        ms(0),
    );
    h.renderer.frame(ms(1000));

    h.push(vec![ChangeEvent::removed(expense("b", 30.0))], ms(1000));

    let midway = h.renderer.frame(ms(1400));
    let b = midway.segment(&id("b")).unwrap();
    assert_eq!(b.phase, SegmentPhase::Exiting);
    assert!((b.span.start - TAU * 40.0 / 70.0).abs() < TOLERANCE);
    assert!(b.span.width() > 0.0 && b.span.width() < TAU * 30.0 / 70.0);

    let done = h.renderer.frame(ms(1800));
    assert!(done.segment(&id("b")).is_none());
    assert_eq!(done.segment(&id("a")).unwrap().span, Span::new(0.0, TAU));
    assert_eq!(h.renderer.segment_ids(), &[id("a")]);
    assert_eq!(h.renderer.current_span(&id("b")), None);
}

#[test]
fn render_mid_transition_retargets_from_displayed_span() {
    let mut h = Harness::new();
    h.push(
        vec![
            ChangeEvent::added(expense("a", 10.0)),
            ChangeEvent::added(expense("b", 30.0)),
        ],
        ms(0),
    );
    let displayed = h.renderer.frame(ms(400)).segment(&id("a")).unwrap().span;

    h.push(vec![ChangeEvent::modified(expense("a", 30.0))], ms(400));
    assert_eq!(h.renderer.current_span(&id("a")), Some(displayed));
    assert_eq!(h.renderer.frame(ms(400)).segment(&id("a")).unwrap().span, displayed);
    let target = h.renderer.target_span(&id("a")).unwrap();
    assert_eq!(target.start, 0.0);
    assert!((target.end - TAU / 2.0).abs() < TOLERANCE);
}

#[test]
fn segments_are_proportional_to_cost() {
    let costs = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
    let total: f64 = costs.iter().sum();
    let mut h = Harness::new();
    let events = costs
        .iter()
        .enumerate()
        .map(|(i, cost)| ChangeEvent::added(expense(&format!("e{i}"), *cost)))
        .collect();
    h.push(events, ms(0));

    let frame = h.renderer.frame(ms(800));
    for (i, cost) in costs.iter().enumerate() {
        let span = frame.segment(&id(&format!("e{i}"))).unwrap().span;
        assert!((span.fraction() - cost / total).abs() < TOLERANCE);
    }
}

#[test]
fn colors_are_stable_across_renders_and_removals() {
    let mut h = Harness::new();
    h.push(
        vec![
            ChangeEvent::added(expense("a", 1.0)),
            ChangeEvent::added(expense("b", 1.0)),
        ],
        ms(0),
    );
    let first = h.renderer.legend().clone();
    h.renderer.render(h.reducer.expenses(), ms(100));
    assert_eq!(h.renderer.legend(), &first);

    h.push(vec![ChangeEvent::removed(expense("a", 1.0))], ms(200));
    h.push(vec![ChangeEvent::added(expense("c", 1.0))], ms(300));
    assert_eq!(h.renderer.color_of("A"), Rgb::parse(SET2[0]));
    assert_eq!(h.renderer.color_of("B"), Rgb::parse(SET2[1]));
    assert_eq!(h.renderer.color_of("C"), Rgb::parse(SET2[2]));

    let legend_names: Vec<&str> = h.renderer.legend().names().collect();
    assert_eq!(legend_names, vec!["B", "C"]);
    assert_eq!(h.renderer.legend().text_color, Rgb::WHITE);
}

#[test]
fn hover_highlights_and_restores_fill() {
    let mut h = Harness::new();
    h.push(vec![ChangeEvent::added(expense("a", 5.0))], ms(0));
    let category = h.renderer.color_of("A").unwrap();
    let highlight = Rgb::parse("#333").unwrap();

    let tooltip = h.renderer.hover_enter(&id("a"), ms(1000)).unwrap();
    assert_eq!(
        tooltip.to_html(),
        "<p>A<br/>$5</p><small>Click to delete</small>"
    );
    let mid = h.renderer.frame(ms(1150)).segments[0].fill;
    assert_ne!(mid, category);
    assert_ne!(mid, highlight);
    assert_eq!(h.renderer.frame(ms(1300)).segments[0].fill, highlight);
    assert!(h.renderer.frame(ms(1300)).tooltip.is_some());

    h.renderer.hover_exit(&id("a"), ms(2000));
    assert_eq!(h.renderer.frame(ms(2300)).segments[0].fill, category);
    assert!(h.renderer.tooltip().is_none());
}

#[test]
fn click_requests_delete_without_removing() {
    let mut h = Harness::new();
    h.push(vec![ChangeEvent::added(expense("a", 5.0))], ms(0));

    let request = h.renderer.click(&id("a")).unwrap();
    assert_eq!(request.id, id("a"));
    assert_eq!(h.renderer.frame(ms(900)).segments.len(), 1);
    assert!(h.renderer.click(&id("missing")).is_none());
}

#[test]
fn empty_collection_renders_nothing() {
    let mut h = Harness::new();
    let pass = h.renderer.render(&[], ms(0));
    assert!(pass.diff.is_empty());
    assert!(h.renderer.frame(ms(0)).segments.is_empty());
    assert!(!h.renderer.is_animating(ms(0)));
}

#[test]
fn svg_places_chart_and_legend() {
    let config = ChartConfig::default();
    let mut h = Harness::new();
    h.push(
        vec![
            ChangeEvent::added(expense("a", 1.0)),
            ChangeEvent::added(expense("b", 3.0)),
        ],
        ms(0),
    );

    let svg = h.renderer.frame(ms(800)).to_svg(&config);
    assert!(svg.contains(r#"width="450" height="450""#));
    assert!(svg.contains(r#"<g transform="translate(155,155)">"#));
    assert!(svg.contains(r#"transform="translate(330,10)""#));
    assert_eq!(svg.matches(r#"class="arc""#).count(), 2);
    assert!(svg.contains(r##"stroke="#ffffff" stroke-width="3""##));
    assert!(svg.contains(&format!(r#"fill="{}""#, SET2[0])));
    assert!(svg.contains(r##"fill="#ffffff">B</text>"##));
}
