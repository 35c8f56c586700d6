use stroke_engine::{
    CatalogError, CharacterCatalog, EventRecord, GuidanceFrame, InputEvent, SessionState,
    Tracer, TracerConfig,
};

/// Wires a tracer, its character catalog and the flat event buffer together.
///
/// Each concrete app creates a `thread_local!` TracerRunner and exports free
/// functions via `#[wasm_bindgen]` (see `export_tracer!`).
pub struct TracerRunner {
    tracer: Tracer,
    catalog: CharacterCatalog,
    /// Every event produced during the last tick, in order, read by the host
    /// as flat f32s.
    event_buffer: Vec<EventRecord>,
    /// Guidance indicator sampled during the last tick.
    frame: Option<GuidanceFrame>,
}

impl TracerRunner {
    pub fn new(config: TracerConfig) -> Self {
        let event_buffer = Vec::with_capacity(config.max_events);
        Self {
            tracer: Tracer::new(config),
            catalog: CharacterCatalog::default(),
            event_buffer,
            frame: None,
        }
    }

    /// Replace the character catalog. The current character is kept. Strokes
    /// need at least `min_samples` guidance points.
    pub fn load_catalog(&mut self, json: &str) -> Result<usize, CatalogError> {
        let min_points = self.tracer.config().min_samples;
        self.catalog = CharacterCatalog::from_json_with_min(json, min_points)?;
        Ok(self.catalog.len())
    }

    /// Start tracing the character with `id`. Returns false if unknown.
    pub fn select(&mut self, id: u32) -> bool {
        match self.catalog.get(id) {
            Some(character) => {
                self.tracer.set_character(character.clone());
                self.frame = None;
                true
            }
            None => {
                log::warn!("unknown character id {}", id);
                false
            }
        }
    }

    /// Start tracing the character at `index` in catalog order.
    pub fn select_index(&mut self, index: usize) -> bool {
        match self.catalog.at(index).map(|c| c.id) {
            Some(id) => self.select(id),
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.tracer.reset();
        self.frame = None;
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.tracer.queue_input(event);
    }

    /// Apply queued input, collect events and sample the guidance animation.
    pub fn tick(&mut self, now_ms: f64) {
        self.tracer.process(now_ms);

        self.event_buffer.clear();
        let events = self.tracer.drain_events();
        self.event_buffer.extend(events.iter().map(EventRecord::from));

        self.frame = self.tracer.guidance_frame(now_ms);
    }

    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    pub fn catalog(&self) -> &CharacterCatalog {
        &self.catalog
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.event_buffer
    }

    pub fn frame(&self) -> Option<&GuidanceFrame> {
        self.frame.as_ref()
    }

    // ---- Accessors read by the host via wasm_bindgen exports ----

    pub fn events_ptr(&self) -> *const f32 {
        self.event_buffer.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.event_buffer.len() as u32
    }

    /// 0 = idle, 1 = awaiting a stroke, 2 = complete.
    pub fn state_code(&self) -> u32 {
        match self.tracer.state() {
            SessionState::Idle => 0,
            SessionState::AwaitingStroke(_) => 1,
            SessionState::Complete => 2,
        }
    }

    pub fn stroke_index(&self) -> u32 {
        self.tracer.session().stroke_index() as u32
    }

    pub fn stroke_count(&self) -> u32 {
        self.tracer
            .session()
            .character()
            .map_or(0, |c| c.stroke_count() as u32)
    }

    pub fn failures(&self) -> u32 {
        self.tracer.session().failures()
    }

    pub fn character_id(&self) -> i32 {
        self.tracer
            .session()
            .character()
            .map_or(-1, |c| c.id as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {
            "id": 7, "glyph": "ক", "romanizedName": "ka", "displayName": "ক",
            "category": "CONSONANT",
            "strokes": [{
                "id": 1, "order": 1,
                "startPoint": { "x": 100, "y": 100 }, "endPoint": { "x": 210, "y": 100 },
                "guidancePoints": [
                    { "x": 100, "y": 100 }, { "x": 110, "y": 100 }, { "x": 120, "y": 100 },
                    { "x": 130, "y": 100 }, { "x": 140, "y": 100 }, { "x": 150, "y": 100 },
                    { "x": 160, "y": 100 }, { "x": 170, "y": 100 }, { "x": 180, "y": 100 },
                    { "x": 190, "y": 100 }, { "x": 200, "y": 100 }, { "x": 210, "y": 100 }
                ]
            }]
        }
    ]"#;

    fn runner() -> TracerRunner {
        let mut r = TracerRunner::new(TracerConfig::default());
        assert_eq!(r.load_catalog(CATALOG).unwrap(), 1);
        r
    }

    fn queue_line(r: &mut TracerRunner, y: f32) {
        r.push_input(InputEvent::PointerDown { x: 100.0, y });
        for i in 1..12 {
            r.push_input(InputEvent::PointerMove { x: 100.0 + i as f32 * 10.0, y });
        }
        r.push_input(InputEvent::PointerUp);
    }

    #[test]
    fn select_unknown_character_fails() {
        let mut r = runner();
        assert!(!r.select(99));
        assert!(!r.select_index(3));
        assert_eq!(r.state_code(), 0);
        assert_eq!(r.character_id(), -1);
    }

    #[test]
    fn tick_packs_events() {
        let mut r = runner();
        assert!(r.select_index(0));
        queue_line(&mut r, 100.0);
        r.tick(0.0);

        let kinds: Vec<f32> = r.events().iter().map(|e| e.kind).collect();
        assert_eq!(kinds.first(), Some(&1.0));
        assert!(kinds.contains(&3.0));
        assert!(kinds.contains(&4.0));
        assert_eq!(r.state_code(), 2);
        assert_eq!(r.stroke_index(), 1);
        assert_eq!(r.stroke_count(), 1);
    }

    #[test]
    fn guidance_frame_after_repeated_failures() {
        let mut r = runner();
        r.select(7);
        for _ in 0..3 {
            queue_line(&mut r, 600.0);
        }
        r.tick(1_000.0);
        assert_eq!(r.failures(), 3);
        assert!(r.frame().is_some());
        let kinds: Vec<f32> = r.events().iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&10.0));
        let last_failure = kinds.iter().rposition(|k| *k == 3.0).unwrap();
        assert_eq!(&kinds[last_failure..], &[3.0, 11.0, 10.0]);

        r.reset();
        r.tick(1_100.0);
        assert!(r.frame().is_none());
        assert_eq!(r.failures(), 0);
    }

    #[test]
    fn busy_ticks_keep_every_event() {
        let config = TracerConfig { max_events: 4, ..TracerConfig::default() };
        let mut r = TracerRunner::new(config);
        r.load_catalog(CATALOG).unwrap();
        r.select(7);
        for _ in 0..3 {
            queue_line(&mut r, 600.0);
        }
        r.tick(0.0);
        let count = |kind: f32| r.events().iter().filter(|e| e.kind == kind).count();
        assert_eq!(count(3.0), 3);
        assert_eq!(count(11.0), 3);
        assert_eq!(count(10.0), 1);
        assert_eq!(r.events_len() as usize, r.events().len());
    }

    #[test]
    fn short_strokes_are_rejected_at_load() {
        let mut r = TracerRunner::new(TracerConfig::default());
        let short = r#"[{
            "id": 1, "glyph": "অ", "romanizedName": "o", "displayName": "অ",
            "category": "VOWEL",
            "strokes": [{
                "id": 1, "order": 1,
                "startPoint": { "x": 0, "y": 0 }, "endPoint": { "x": 60, "y": 0 },
                "guidancePoints": [{ "x": 0, "y": 0 }, { "x": 60, "y": 0 }]
            }]
        }]"#;
        assert!(matches!(
            r.load_catalog(short),
            Err(CatalogError::TooFewGuidancePoints { count: 2, min: 10, .. })
        ));
        assert!(r.catalog().is_empty());
    }
}
