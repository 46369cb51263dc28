//! Chart renderer: keyed enter/update/exit transitions over pie segments.
//!
//! # Responsibility
//! - Turn the full expense collection into target segments on every pass.
//! - Animate segments from their last displayed geometry to the new target.
//! - Map hover and click interactions to fill changes and delete requests.
//!
//! # Invariants
//! - `current` holds the last displayed span of every segment on screen; it is
//!   refreshed before any tween is (re)started.
//! - A segment is dropped only after its exit tween has finished.
//! - Clicks never remove a segment; removal waits for the change stream.

use crate::chart::arc::ArcGenerator;
use crate::chart::color::{OrdinalColorScale, Rgb};
use crate::chart::diff::KeyedDiff;
use crate::chart::legend::{Legend, LegendEntry};
use crate::chart::pie::{pie_layout, Span};
use crate::chart::tooltip::Tooltip;
use crate::chart::transition::Tween;
use crate::config::ChartConfig;
use crate::model::expense::{Expense, ExpenseId};
use log::{debug, trace};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

const FALLBACK_HIGHLIGHT: Rgb = Rgb::new(0x33, 0x33, 0x33);

/// Lifecycle stage of one on-screen segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentPhase {
    Entering,
    Updating,
    Settled,
    Exiting,
}

/// Outbound request produced by clicking a segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub id: ExpenseId,
}

/// What one `render` call changed.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPass {
    pub diff: KeyedDiff,
    /// Target span per id in the new layout, in layout order.
    pub targets: Vec<(ExpenseId, Span)>,
}

/// One drawable segment sampled at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentFrame {
    pub id: ExpenseId,
    pub name: String,
    pub cost: f64,
    pub span: Span,
    pub path: String,
    pub fill: Rgb,
    pub phase: SegmentPhase,
}

/// Full chart state sampled at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub at: Duration,
    pub segments: Vec<SegmentFrame>,
    pub legend: Legend,
    pub tooltip: Option<Tooltip>,
}

impl ChartFrame {
    pub fn segment(&self, id: &ExpenseId) -> Option<&SegmentFrame> {
        self.segments.iter().find(|segment| &segment.id == id)
    }
}

#[derive(Debug, Clone)]
struct SegmentView {
    expense: Expense,
    phase: SegmentPhase,
    geometry: Tween<Span>,
    category: Rgb,
    fill: Tween<Rgb>,
}

/// Stateful donut renderer.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    arc: ArcGenerator,
    transition: Duration,
    hover_transition: Duration,
    highlight: Rgb,
    legend_text_color: Rgb,
    colors: OrdinalColorScale,
    order: Vec<ExpenseId>,
    segments: HashMap<ExpenseId, SegmentView>,
    current: HashMap<ExpenseId, Span>,
    legend: Legend,
    hovered: Option<ExpenseId>,
    passes: u64,
}

impl ChartRenderer {
    pub fn new(config: &ChartConfig) -> Self {
        let legend_text_color = Rgb::parse(&config.legend_text_color).unwrap_or(Rgb::WHITE);
        Self {
            arc: ArcGenerator::new(config.inner_radius(), config.radius),
            transition: config.transition(),
            hover_transition: config.hover_transition(),
            highlight: Rgb::parse(&config.highlight_color).unwrap_or(FALLBACK_HIGHLIGHT),
            legend_text_color,
            colors: OrdinalColorScale::new(config.palette.as_slice()),
            order: Vec::new(),
            segments: HashMap::new(),
            current: HashMap::new(),
            legend: Legend {
                entries: Vec::new(),
                text_color: legend_text_color,
            },
            hovered: None,
            passes: 0,
        }
    }

    /// Re-targets the chart at `expenses` as of `now`.
    pub fn render(&mut self, expenses: &[Expense], now: Duration) -> RenderPass {
        self.refresh(now);

        let slices = pie_layout(expenses);
        self.colors
            .extend(slices.iter().map(|slice| slice.expense.name.as_str()));

        let diff = KeyedDiff::between(&self.order, slices.iter().map(|slice| &slice.expense.id));

        for slice in &slices {
            let id = &slice.expense.id;
            let category = self.colors.color(&slice.expense.name);
            let hovered = self.hovered.as_ref() == Some(id);
            let fill_target = if hovered { self.highlight } else { category };

            match self.segments.get_mut(id) {
                Some(view) => {
                    let from = self.current.get(id).copied().unwrap_or(slice.span);
                    if view.phase == SegmentPhase::Exiting || from != slice.span {
                        view.geometry = Tween::new(from, slice.span, now, self.transition);
                        view.phase = SegmentPhase::Updating;
                    } else if view.geometry.to != slice.span {
                        // Already displayed at the target; stop the stale tween.
                        view.geometry = Tween::settled(slice.span, now);
                        view.phase = SegmentPhase::Settled;
                    }
                    view.expense = slice.expense.clone();
                    if view.category != category {
                        view.fill = view.fill.retarget(fill_target, now, self.transition);
                    }
                    view.category = category;
                }
                None => {
                    let from = Span::collapsed_at(slice.span.end);
                    self.segments.insert(
                        id.clone(),
                        SegmentView {
                            expense: slice.expense.clone(),
                            phase: SegmentPhase::Entering,
                            geometry: Tween::new(from, slice.span, now, self.transition),
                            category,
                            fill: Tween::settled(category, now),
                        },
                    );
                    self.current.insert(id.clone(), from);
                }
            }
        }

        for id in &diff.exit {
            let Some(view) = self.segments.get_mut(id) else {
                continue;
            };
            if view.phase == SegmentPhase::Exiting {
                continue;
            }
            let from = self.current.get(id).copied().unwrap_or(view.geometry.to);
            view.geometry = Tween::new(from, Span::collapsed_at(from.start), now, self.transition);
            view.phase = SegmentPhase::Exiting;
            if self.hovered.as_ref() == Some(id) {
                self.hovered = None;
            }
        }

        let live: HashSet<&ExpenseId> = slices.iter().map(|slice| &slice.expense.id).collect();
        let exiting: Vec<ExpenseId> = self
            .order
            .iter()
            .filter(|id| !live.contains(id))
            .cloned()
            .collect();
        self.order = slices
            .iter()
            .map(|slice| slice.expense.id.clone())
            .chain(exiting)
            .collect();

        self.rebuild_legend(expenses);
        self.passes += 1;
        debug!(
            "event=chart_render module=chart status=ok pass={} enter={} update={} exit={}",
            self.passes,
            diff.enter.len(),
            diff.update.len(),
            diff.exit.len()
        );

        RenderPass {
            diff,
            targets: slices
                .into_iter()
                .map(|slice| (slice.expense.id, slice.span))
                .collect(),
        }
    }

    /// Samples every segment at `now` and drops finished exits.
    pub fn frame(&mut self, now: Duration) -> ChartFrame {
        self.refresh(now);

        let segments = self
            .order
            .iter()
            .filter_map(|id| {
                let view = self.segments.get(id)?;
                let span = self.current.get(id).copied()?;
                Some(SegmentFrame {
                    id: id.clone(),
                    name: view.expense.name.clone(),
                    cost: view.expense.cost,
                    span,
                    path: self.arc.path(span),
                    fill: view.fill.sample(now),
                    phase: view.phase,
                })
            })
            .collect();

        ChartFrame {
            at: now,
            segments,
            legend: self.legend.clone(),
            tooltip: self.tooltip(),
        }
    }

    /// Highlights a segment and returns its tooltip.
    pub fn hover_enter(&mut self, id: &ExpenseId, now: Duration) -> Option<Tooltip> {
        let view = self.segments.get_mut(id)?;
        if view.phase == SegmentPhase::Exiting {
            return None;
        }
        view.fill = view.fill.retarget(self.highlight, now, self.hover_transition);
        self.hovered = Some(id.clone());
        trace!("event=chart_hover module=chart status=enter id={id}");
        self.tooltip()
    }

    /// Restores a segment's category color and hides its tooltip.
    pub fn hover_exit(&mut self, id: &ExpenseId, now: Duration) {
        if let Some(view) = self.segments.get_mut(id) {
            view.fill = view.fill.retarget(view.category, now, self.hover_transition);
        }
        if self.hovered.as_ref() == Some(id) {
            self.hovered = None;
        }
        trace!("event=chart_hover module=chart status=exit id={id}");
    }

    /// Turns a click on a live segment into a delete request.
    pub fn click(&self, id: &ExpenseId) -> Option<DeleteRequest> {
        let view = self.segments.get(id)?;
        if view.phase == SegmentPhase::Exiting {
            return None;
        }
        Some(DeleteRequest { id: id.clone() })
    }

    /// Tooltip of the hovered segment, if any.
    pub fn tooltip(&self) -> Option<Tooltip> {
        let id = self.hovered.as_ref()?;
        let view = self.segments.get(id)?;
        let span = self.current.get(id).copied().unwrap_or(view.geometry.to);
        Some(Tooltip::for_expense(&view.expense, self.arc.centroid(span)))
    }

    /// Last displayed span of a segment.
    pub fn current_span(&self, id: &ExpenseId) -> Option<Span> {
        self.current.get(id).copied()
    }

    /// Span a segment is heading toward.
    pub fn target_span(&self, id: &ExpenseId) -> Option<Span> {
        self.segments.get(id).map(|view| view.geometry.to)
    }

    pub fn phase(&self, id: &ExpenseId) -> Option<SegmentPhase> {
        self.segments.get(id).map(|view| view.phase)
    }

    /// Category color of a name already seen by the chart.
    pub fn color_of(&self, name: &str) -> Option<Rgb> {
        self.colors.peek(name)
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Ids on screen, in draw order.
    pub fn segment_ids(&self) -> &[ExpenseId] {
        &self.order
    }

    pub fn render_passes(&self) -> u64 {
        self.passes
    }

    pub fn is_animating(&self, now: Duration) -> bool {
        self.segments
            .values()
            .any(|view| !view.geometry.is_finished(now) || !view.fill.is_finished(now))
    }

    /// Samples tweens into `current`, settles finished ones, drops finished exits.
    fn refresh(&mut self, now: Duration) {
        let mut finished_exits = Vec::new();
        for (id, view) in &mut self.segments {
            self.current.insert(id.clone(), view.geometry.sample(now));
            if !view.geometry.is_finished(now) {
                continue;
            }
            match view.phase {
                SegmentPhase::Exiting => finished_exits.push(id.clone()),
                SegmentPhase::Entering | SegmentPhase::Updating => {
                    view.phase = SegmentPhase::Settled;
                }
                SegmentPhase::Settled => {}
            }
        }

        if finished_exits.is_empty() {
            return;
        }
        for id in &finished_exits {
            self.segments.remove(id);
            self.current.remove(id);
            trace!("event=chart_exit module=chart status=removed id={id}");
        }
        let removed: HashSet<&ExpenseId> = finished_exits.iter().collect();
        self.order.retain(|id| !removed.contains(id));
    }

    fn rebuild_legend(&mut self, expenses: &[Expense]) {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for expense in expenses {
            if !seen.insert(expense.name.as_str()) {
                continue;
            }
            entries.push(LegendEntry {
                name: expense.name.clone(),
                color: self.colors.color(&expense.name),
            });
        }
        self.legend = Legend {
            entries,
            text_color: self.legend_text_color,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartRenderer, SegmentPhase};
    use crate::config::ChartConfig;
    use crate::model::expense::{Expense, ExpenseId};
    use std::time::Duration;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn expense(id: &str, cost: f64) -> Expense {
        Expense::with_id(ExpenseId::new(id), id, cost).unwrap()
    }

    #[test]
    fn re_added_segment_is_revived_from_its_exit_position() {
        let mut renderer = ChartRenderer::new(&ChartConfig::default());
        let a = expense("a", 1.0);
        let b = expense("b", 1.0);
        renderer.render(&[a.clone(), b.clone()], ms(0));
        renderer.frame(ms(800));

        renderer.render(&[a.clone()], ms(1000));
        let shrinking = renderer.frame(ms(1400)).segment(&b.id).unwrap().span;

        let pass = renderer.render(&[a, b.clone()], ms(1400));
        assert!(pass.diff.enter.is_empty());
        assert_eq!(renderer.phase(&b.id), Some(SegmentPhase::Updating));
        assert_eq!(renderer.current_span(&b.id), Some(shrinking));
        assert_eq!(renderer.segment_ids().len(), 2);
    }

    #[test]
    fn unchanged_layout_does_not_restart_transitions() {
        let mut renderer = ChartRenderer::new(&ChartConfig::default());
        let a = expense("a", 10.0);
        let b = expense("b", 30.0);
        renderer.render(&[a.clone(), b.clone()], ms(0));
        renderer.frame(ms(800));
        assert!(!renderer.is_animating(ms(800)));

        let pass = renderer.render(&[a.clone(), b.clone()], ms(1000));
        assert_eq!(pass.diff.update.len(), 2);
        assert!(!renderer.is_animating(ms(1000)));
        assert_eq!(renderer.phase(&a.id), Some(SegmentPhase::Settled));
        assert_eq!(renderer.phase(&b.id), Some(SegmentPhase::Settled));

        let renamed = Expense::with_id(b.id.clone(), "b2", 30.0).unwrap();
        renderer.render(&[a, renamed], ms(1200));
        assert_eq!(renderer.phase(&b.id), Some(SegmentPhase::Settled));
        assert!(renderer.is_animating(ms(1200)));
    }

    #[test]
    fn exiting_segment_ignores_hover_and_click() {
        let mut renderer = ChartRenderer::new(&ChartConfig::default());
        let a = expense("a", 1.0);
        renderer.render(&[a.clone()], ms(0));
        renderer.hover_enter(&a.id, ms(10)).unwrap();

        renderer.render(&[], ms(100));
        assert!(renderer.tooltip().is_none());
        assert!(renderer.hover_enter(&a.id, ms(120)).is_none());
        assert!(renderer.click(&a.id).is_none());
        assert!(renderer.is_animating(ms(120)));
        assert!(renderer.frame(ms(900)).segments.is_empty());
    }
}
