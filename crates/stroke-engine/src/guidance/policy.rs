//! Escalating guidance: after repeated failures on a stroke, animate a
//! directional indicator along its reference path until the learner succeeds,
//! resets, or moves on.

use crate::api::config::TracerConfig;
use crate::core::session::SessionEvent;
use crate::core::time::{progress_index, AnimationClock};
use crate::model::{Point, ReferenceStroke};

/// Events emitted by the guidance policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidanceEvent {
    GuidanceActivated { stroke: usize },
    StrokeFailed { attempts: u32 },
    StrokeSuccess,
    CharacterCompleted,
}

/// One rendered frame of the guidance indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuidanceFrame {
    pub stroke: usize,
    /// Animation progress in [0, 1).
    pub progress: f32,
    /// Index of the guidance point the indicator sits on.
    pub point_index: usize,
    pub position: Point,
    /// Direction of travel along the path at `position`, in radians.
    pub heading: f32,
}

#[derive(Debug, Clone)]
struct GuidedStroke {
    index: usize,
    stroke: ReferenceStroke,
}

pub struct GuidancePolicy {
    max_failures: u32,
    guided: Option<GuidedStroke>,
    clock: AnimationClock,
    events: Vec<GuidanceEvent>,
}

impl GuidancePolicy {
    pub fn new(config: &TracerConfig) -> Self {
        Self {
            max_failures: config.max_failures,
            guided: None,
            clock: AnimationClock::new(config.guidance_duration_ms),
            events: Vec::with_capacity(config.max_events),
        }
    }

    /// React to a session event. `current` is the stroke the session is
    /// awaiting after the event was produced.
    pub fn observe(&mut self, event: &SessionEvent, current: Option<&ReferenceStroke>, now_ms: f64) {
        match *event {
            SessionEvent::StrokeCompleted { valid: true, .. } => {
                self.deactivate();
                self.events.push(GuidanceEvent::StrokeSuccess);
            }
            SessionEvent::StrokeCompleted { stroke, valid: false, failures } => {
                self.events.push(GuidanceEvent::StrokeFailed { attempts: failures });
                if failures >= self.max_failures && !self.is_active() {
                    if let Some(reference) = current {
                        self.activate(stroke, reference.clone(), now_ms);
                    }
                }
            }
            SessionEvent::CharacterCompleted { .. } => {
                self.deactivate();
                self.events.push(GuidanceEvent::CharacterCompleted);
            }
            SessionEvent::StrokeStarted { .. } | SessionEvent::StrokeProgress { .. } => {}
        }
    }

    fn activate(&mut self, index: usize, stroke: ReferenceStroke, now_ms: f64) {
        log::info!("showing guidance for stroke {} (id {})", index, stroke.id);
        self.guided = Some(GuidedStroke { index, stroke });
        self.clock.start(now_ms);
        self.events.push(GuidanceEvent::GuidanceActivated { stroke: index });
    }

    /// Hide guidance and stop the animation.
    pub fn deactivate(&mut self) {
        if self.guided.take().is_some() {
            log::debug!("guidance hidden");
        }
        self.clock.stop();
    }

    pub fn is_active(&self) -> bool {
        self.guided.is_some()
    }

    pub fn guided_stroke(&self) -> Option<&ReferenceStroke> {
        self.guided.as_ref().map(|g| &g.stroke)
    }

    pub fn max_failures(&self) -> u32 {
        self.max_failures
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// Advance the animation and locate the indicator.
    /// `None` when guidance is inactive or the stroke has no points.
    pub fn sample(&mut self, now_ms: f64) -> Option<GuidanceFrame> {
        let guided = self.guided.as_ref()?;
        let points = &guided.stroke.guidance_points;
        if points.is_empty() {
            return None;
        }
        let progress = self.clock.sample(now_ms);
        let point_index = progress_index(progress, points.len());
        Some(GuidanceFrame {
            stroke: guided.index,
            progress,
            point_index,
            position: points[point_index],
            heading: heading_at(points, point_index),
        })
    }

    pub fn drain_events(&mut self) -> Vec<GuidanceEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Heading of the segment leaving `index`, or of the one arriving at it for
/// the last point. 0 when the stroke has a single point.
fn heading_at(points: &[Point], index: usize) -> f32 {
    let (from, to) = if index + 1 < points.len() {
        (points[index], points[index + 1])
    } else if index > 0 {
        (points[index - 1], points[index])
    } else {
        return 0.0;
    };
    if from == to {
        return 0.0;
    }
    let dir = to.to_vec2() - from.to_vec2();
    dir.y.atan2(dir.x)
}
