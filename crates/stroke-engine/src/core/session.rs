//! Per-character tracing state machine.
//!
//! `Idle` until a character is set, then `AwaitingStroke(i)` for each stroke
//! in order, then `Complete`. Pointer input drives one attempt at a time; the
//! session emits [`SessionEvent`]s into an outbox the owner drains.

use crate::api::config::TracerConfig;
use crate::core::validator::{CoverageTracker, StrokeScore, StrokeValidator};
use crate::model::{Character, Point, ReferenceStroke};

/// Where the session is in tracing the current character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No character set.
    Idle,
    /// Waiting for (or capturing) an attempt at stroke `i`.
    AwaitingStroke(usize),
    /// Every stroke has been traced.
    Complete,
}

/// Lifecycle events emitted by the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    StrokeStarted { stroke: usize },
    /// Cheap running estimate in [0, 1] for the in-progress attempt.
    StrokeProgress { stroke: usize, estimate: f32 },
    /// `failures` is the consecutive-failure count after this attempt.
    StrokeCompleted { stroke: usize, valid: bool, failures: u32 },
    CharacterCompleted { character: u32 },
}

/// The attempt currently being drawn.
#[derive(Debug)]
struct Capture {
    points: Vec<Point>,
    tracker: CoverageTracker,
}

pub struct TracingSession {
    character: Option<Character>,
    stroke_index: usize,
    capture: Option<Capture>,
    /// Set when a reset or character change dropped a live capture; the next
    /// pointer up belongs to that abandoned attempt.
    abandoned_capture: bool,
    failures: u32,
    /// Advanced on every reset / character change to invalidate stale input.
    generation: u64,
    validator: StrokeValidator,
    min_motion: f32,
    last_score: Option<StrokeScore>,
    events: Vec<SessionEvent>,
}

impl TracingSession {
    pub fn new(config: &TracerConfig) -> Self {
        Self {
            character: None,
            stroke_index: 0,
            capture: None,
            abandoned_capture: false,
            failures: 0,
            generation: 0,
            validator: StrokeValidator::from_config(config),
            min_motion: config.min_motion,
            last_score: None,
            events: Vec::with_capacity(config.max_events),
        }
    }

    /// Start tracing `character` from its first stroke.
    pub fn set_character(&mut self, character: Character) {
        log::info!(
            "tracing '{}' ({} strokes)",
            character.romanized_name,
            character.stroke_count()
        );
        if character.strokes.is_empty() {
            log::warn!("character {} has no strokes", character.id);
        }
        self.character = Some(character);
        self.stroke_index = 0;
        self.abandon_attempt();
    }

    /// Retry the current stroke: clears failures and any partial attempt.
    pub fn reset(&mut self) {
        self.abandon_attempt();
    }

    fn abandon_attempt(&mut self) {
        self.abandoned_capture = self.capture.take().is_some();
        self.failures = 0;
        self.last_score = None;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Begin a new attempt at the current stroke. Ignored unless awaiting one.
    pub fn pointer_down(&mut self, pos: Point) {
        let SessionState::AwaitingStroke(stroke) = self.state() else {
            log::debug!("pointer down ignored in {:?}", self.state());
            return;
        };
        let Some(reference) = self.current_stroke() else {
            return;
        };
        let mut tracker = CoverageTracker::new(reference, self.validator.tolerance);
        tracker.add(pos);
        let mut points = Vec::with_capacity(128);
        points.push(pos);
        self.capture = Some(Capture { points, tracker });
        self.abandoned_capture = false;
        self.events.push(SessionEvent::StrokeStarted { stroke });
    }

    /// Record a sample if it moved far enough from the last accepted one.
    pub fn pointer_move(&mut self, pos: Point) {
        let stroke = self.stroke_index;
        let min_motion = self.min_motion;
        let Some(capture) = self.capture.as_mut() else {
            return;
        };
        if let Some(&last) = capture.points.last() {
            if last.distance(pos) <= min_motion {
                return;
            }
        }
        capture.points.push(pos);
        let estimate = capture.tracker.add(pos);
        self.events.push(SessionEvent::StrokeProgress { stroke, estimate });
    }

    /// Finish the attempt and judge it.
    ///
    /// An up with no capture scores an empty attempt (a failure), unless it is
    /// the release of an attempt dropped by `reset` or `set_character`.
    pub fn pointer_up(&mut self) {
        let SessionState::AwaitingStroke(stroke) = self.state() else {
            log::debug!("pointer up ignored in {:?}", self.state());
            return;
        };
        let points = match self.capture.take() {
            Some(capture) => capture.points,
            None if std::mem::take(&mut self.abandoned_capture) => {
                log::debug!("pointer up of an abandoned attempt ignored");
                return;
            }
            None => Vec::new(),
        };
        let Some(reference) = self.current_stroke() else {
            return;
        };

        let score = self.validator.evaluate(&points, reference);
        log::debug!(
            "stroke {} scored: coverage {:.2} over {} samples -> {}",
            stroke,
            score.coverage,
            score.samples,
            if score.valid { "valid" } else { "invalid" }
        );
        self.last_score = Some(score);

        if score.valid {
            self.failures = 0;
            self.stroke_index += 1;
            self.events.push(SessionEvent::StrokeCompleted { stroke, valid: true, failures: 0 });
            if self.state() == SessionState::Complete {
                let character = self.character.as_ref().map_or(0, |c| c.id);
                log::info!("character {} complete", character);
                self.events.push(SessionEvent::CharacterCompleted { character });
            }
        } else {
            self.failures += 1;
            self.events.push(SessionEvent::StrokeCompleted {
                stroke,
                valid: false,
                failures: self.failures,
            });
        }
    }

    pub fn state(&self) -> SessionState {
        match &self.character {
            None => SessionState::Idle,
            Some(c) if self.stroke_index >= c.stroke_count() => SessionState::Complete,
            Some(_) => SessionState::AwaitingStroke(self.stroke_index),
        }
    }

    pub fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    /// The stroke currently awaiting input, if any.
    pub fn current_stroke(&self) -> Option<&ReferenceStroke> {
        self.character.as_ref()?.stroke(self.stroke_index)
    }

    pub fn stroke_index(&self) -> usize {
        self.stroke_index
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    /// Samples of the in-progress attempt (empty when not capturing).
    pub fn user_points(&self) -> &[Point] {
        match &self.capture {
            Some(capture) => &capture.points,
            None => &[],
        }
    }

    /// Score of the most recent completed attempt.
    pub fn last_score(&self) -> Option<StrokeScore> {
        self.last_score
    }

    /// Take all pending events.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}
