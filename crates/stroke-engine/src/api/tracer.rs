use crate::api::config::TracerConfig;
use crate::api::listener::{GuidanceListener, SessionListener};
use crate::api::types::TracerEvent;
use crate::core::session::{SessionState, TracingSession};
use crate::guidance::{GuidanceFrame, GuidancePolicy};
use crate::input::queue::{InputEvent, InputQueue};
use crate::model::{Character, Point};

/// One tracing surface: a session, its guidance policy and a shared event outbox.
///
/// Owned by a single UI surface. All calls are synchronous; the host samples
/// [`Tracer::guidance_frame`] once per render frame.
pub struct Tracer {
    config: TracerConfig,
    session: TracingSession,
    guidance: GuidancePolicy,
    input: InputQueue,
    events: Vec<TracerEvent>,
}

impl Tracer {
    pub fn new(config: TracerConfig) -> Self {
        let config = config.validated();
        Self {
            session: TracingSession::new(&config),
            guidance: GuidancePolicy::new(&config),
            input: InputQueue::new(),
            events: Vec::with_capacity(config.max_events),
            config,
        }
    }

    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    pub fn session(&self) -> &TracingSession {
        &self.session
    }

    pub fn guidance(&self) -> &GuidancePolicy {
        &self.guidance
    }

    /// Switch to a new character. Hides guidance and drops pending input and
    /// undelivered events of the previous character.
    pub fn set_character(&mut self, character: Character) {
        self.session.set_character(character);
        self.guidance.deactivate();
        self.input.drain();
        self.session.drain_events();
        self.guidance.drain_events();
        self.events.clear();
    }

    /// Fresh attempt at the current stroke: hides guidance, zeroes failures.
    pub fn reset(&mut self) {
        self.session.reset();
        self.guidance.deactivate();
    }

    pub fn pointer_down(&mut self, pos: Point, now_ms: f64) {
        self.session.pointer_down(pos);
        self.pump(now_ms);
    }

    pub fn pointer_move(&mut self, pos: Point, now_ms: f64) {
        self.session.pointer_move(pos);
        self.pump(now_ms);
    }

    pub fn pointer_up(&mut self, now_ms: f64) {
        self.session.pointer_up();
        self.pump(now_ms);
    }

    /// Queue input for the next [`Tracer::process`], tagged with the current generation.
    pub fn queue_input(&mut self, event: InputEvent) {
        self.input.push(event, self.session.generation());
    }

    /// Apply queued input. Events queued before the last reset or character
    /// change are dropped.
    pub fn process(&mut self, now_ms: f64) {
        for queued in self.input.drain() {
            if queued.generation != self.session.generation() {
                log::debug!("dropping stale input {:?}", queued.event);
                continue;
            }
            match queued.event {
                InputEvent::PointerDown { x, y } => self.session.pointer_down(Point::new(x, y)),
                InputEvent::PointerMove { x, y } => self.session.pointer_move(Point::new(x, y)),
                InputEvent::PointerUp => self.session.pointer_up(),
            }
            self.pump(now_ms);
        }
    }

    /// Route fresh session events through the guidance policy. Each session
    /// event is followed in the outbox by the guidance events it caused.
    fn pump(&mut self, now_ms: f64) {
        for event in self.session.drain_events() {
            self.events.push(TracerEvent::Session(event));
            self.guidance.observe(&event, self.session.current_stroke(), now_ms);
            self.events
                .extend(self.guidance.drain_events().into_iter().map(TracerEvent::Guidance));
        }
    }

    /// Advance the guidance animation and return where to draw the indicator.
    pub fn guidance_frame(&mut self, now_ms: f64) -> Option<GuidanceFrame> {
        self.guidance.sample(now_ms)
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Take every pending event, in emission order.
    pub fn drain_events(&mut self) -> Vec<TracerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drain the outbox into listener callbacks, in emission order.
    pub fn dispatch<S, G>(&mut self, session: &mut S, guidance: &mut G)
    where
        S: SessionListener + ?Sized,
        G: GuidanceListener + ?Sized,
    {
        for event in self.drain_events() {
            match event {
                TracerEvent::Session(event) => event.dispatch(session),
                TracerEvent::Guidance(event) => event.dispatch(guidance),
            }
        }
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::new(TracerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::SessionEvent;
    use crate::guidance::GuidanceEvent;
    use crate::model::{CharacterCategory, ReferenceStroke};

    fn line(y: f32) -> Vec<Point> {
        (0..12).map(|i| Point::new(100.0 + i as f32 * 10.0, y)).collect()
    }

    fn two_strokes() -> Character {
        Character::new(
            1,
            "অ",
            "o",
            CharacterCategory::Vowel,
            vec![
                ReferenceStroke::from_points(1, 1, line(100.0)),
                ReferenceStroke::from_points(2, 2, line(200.0)),
            ],
        )
    }

    fn trace(t: &mut Tracer, points: &[Point], now_ms: f64) {
        t.pointer_down(points[0], now_ms);
        for p in &points[1..] {
            t.pointer_move(*p, now_ms);
        }
        t.pointer_up(now_ms);
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl SessionListener for Recorder {
        fn on_stroke_completed(&mut self, valid: bool) {
            self.calls.push(format!("stroke_completed({valid})"));
        }
        fn on_character_completed(&mut self) {
            self.calls.push("character_completed".into());
        }
    }

    impl GuidanceListener for Recorder {
        fn on_guidance_activated(&mut self) {
            self.calls.push("guidance_activated".into());
        }
        fn on_stroke_failed(&mut self, attempts: u32) {
            self.calls.push(format!("stroke_failed({attempts})"));
        }
    }

    #[test]
    fn two_stroke_scenario() {
        let mut t = Tracer::default();
        t.set_character(two_strokes());

        let mut session = Recorder::default();
        let mut guidance = Recorder::default();

        trace(&mut t, &line(100.0), 0.0);
        t.dispatch(&mut session, &mut guidance);
        assert_eq!(session.calls, vec!["stroke_completed(true)"]);
        assert_eq!(t.session().stroke_index(), 1);
        session.calls.clear();

        for _ in 0..3 {
            trace(&mut t, &line(700.0), 0.0);
        }
        t.dispatch(&mut session, &mut guidance);
        assert_eq!(session.calls, vec!["stroke_completed(false)"; 3]);
        assert_eq!(
            guidance.calls,
            vec!["stroke_failed(1)", "stroke_failed(2)", "stroke_failed(3)", "guidance_activated"]
        );
        assert!(t.guidance().is_active());
        session.calls.clear();

        trace(&mut t, &line(200.0), 0.0);
        t.dispatch(&mut session, &mut guidance);
        assert_eq!(session.calls, vec!["stroke_completed(true)", "character_completed"]);
        assert_eq!(t.state(), SessionState::Complete);
        assert!(!t.guidance().is_active());
    }

    #[test]
    fn fourth_failure_reports_count_without_reactivating() {
        let mut t = Tracer::default();
        t.set_character(two_strokes());
        for _ in 0..4 {
            trace(&mut t, &line(700.0), 0.0);
        }
        let events: Vec<GuidanceEvent> =
            t.drain_events().iter().filter_map(TracerEvent::as_guidance).copied().collect();
        let activations = events
            .iter()
            .filter(|e| matches!(e, GuidanceEvent::GuidanceActivated { .. }))
            .count();
        assert_eq!(activations, 1);
        assert_eq!(events.last(), Some(&GuidanceEvent::StrokeFailed { attempts: 4 }));
    }

    #[test]
    fn reset_after_guidance_restores_a_clean_attempt() {
        let mut t = Tracer::default();
        t.set_character(two_strokes());
        trace(&mut t, &line(100.0), 0.0);
        for _ in 0..3 {
            trace(&mut t, &line(700.0), 0.0);
        }
        assert!(t.guidance().is_active());

        t.reset();
        assert!(!t.guidance().is_active());
        assert_eq!(t.session().failures(), 0);
        assert_eq!(t.session().stroke_index(), 1);
        assert!(t.guidance_frame(100.0).is_none());

        // Guidance needs another full run of failures to come back.
        t.drain_events();
        trace(&mut t, &line(700.0), 0.0);
        assert!(!t.guidance().is_active());
    }

    #[test]
    fn guidance_animates_along_the_failed_stroke() {
        let mut t = Tracer::default();
        t.set_character(two_strokes());
        for _ in 0..3 {
            trace(&mut t, &line(700.0), 1_000.0);
        }
        let frame = t.guidance_frame(1_500.0).unwrap();
        assert_eq!(frame.stroke, 0);
        assert!((frame.progress - 0.25).abs() < 1e-6);
        assert_eq!(frame.point_index, 2);
        assert_eq!(frame.position, Point::new(120.0, 100.0));
    }

    #[test]
    fn set_character_hides_guidance() {
        let mut t = Tracer::default();
        t.set_character(two_strokes());
        for _ in 0..3 {
            trace(&mut t, &line(700.0), 0.0);
        }
        t.set_character(two_strokes());
        assert!(!t.guidance().is_active());
        assert_eq!(t.state(), SessionState::AwaitingStroke(0));
    }

    #[test]
    fn queued_input_is_processed_in_order() {
        let mut t = Tracer::default();
        t.set_character(two_strokes());
        let points = line(100.0);
        t.queue_input(InputEvent::PointerDown { x: points[0].x, y: points[0].y });
        for p in &points[1..] {
            t.queue_input(InputEvent::PointerMove { x: p.x, y: p.y });
        }
        t.queue_input(InputEvent::PointerUp);
        t.process(0.0);
        assert_eq!(t.session().stroke_index(), 1);
    }

    #[test]
    fn stale_queued_input_is_dropped_after_reset() {
        let mut t = Tracer::default();
        t.set_character(two_strokes());
        t.queue_input(InputEvent::PointerDown { x: 100.0, y: 100.0 });
        t.queue_input(InputEvent::PointerUp);
        t.reset();
        t.process(0.0);
        assert_eq!(t.session().failures(), 0);
        assert!(t.drain_events().is_empty());
    }

    #[test]
    fn input_without_character_is_ignored() {
        let mut t = Tracer::default();
        trace(&mut t, &line(100.0), 0.0);
        assert_eq!(t.state(), SessionState::Idle);
        assert!(t.drain_events().is_empty());
    }

    #[test]
    fn guidance_events_follow_the_failure_that_caused_them() {
        let mut t = Tracer::default();
        t.set_character(two_strokes());
        for _ in 0..3 {
            trace(&mut t, &line(700.0), 0.0);
        }
        let tail: Vec<TracerEvent> = t
            .drain_events()
            .into_iter()
            .filter(|e| !matches!(e, TracerEvent::Session(SessionEvent::StrokeProgress { .. })))
            .skip(6)
            .collect();
        assert_eq!(
            tail,
            vec![
                TracerEvent::Session(SessionEvent::StrokeStarted { stroke: 0 }),
                TracerEvent::Session(SessionEvent::StrokeCompleted { stroke: 0, valid: false, failures: 3 }),
                TracerEvent::Guidance(GuidanceEvent::StrokeFailed { attempts: 3 }),
                TracerEvent::Guidance(GuidanceEvent::GuidanceActivated { stroke: 0 }),
            ]
        );
    }

    #[test]
    fn set_character_discards_undelivered_events() {
        let mut t = Tracer::default();
        t.set_character(two_strokes());
        for _ in 0..3 {
            trace(&mut t, &line(700.0), 0.0);
        }
        t.set_character(two_strokes());
        assert!(t.drain_events().is_empty());

        trace(&mut t, &line(100.0), 0.0);
        let completed = t
            .drain_events()
            .iter()
            .filter_map(TracerEvent::as_session)
            .filter(|e| matches!(e, SessionEvent::StrokeCompleted { .. }))
            .count();
        assert_eq!(completed, 1);
    }
}
