pub mod runner;

pub use runner::TracerRunner;

/// Generate all `#[wasm_bindgen]` exports for a tracing app.
///
/// Generates:
/// - `thread_local!` storage for the TracerRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (init, catalog loading, input handlers, tick, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use stroke_engine::*;
///
/// stroke_web::export_tracer!(include_str!("../data/characters.json"), "my-tracer");
/// ```
///
/// # Arguments
///
/// - `$catalog`: An expression yielding the bundled character catalog JSON (`&str`)
/// - `$app_name`: A string literal used in log messages
#[macro_export]
macro_rules! export_tracer {
    ($catalog:expr, $app_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::TracerRunner>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::TracerRunner) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Tracer not initialized. Call tracer_init() first.");
                f(runner)
            })
        }

        /// Initialize with an optional JSON config (empty string for defaults).
        #[wasm_bindgen]
        pub fn tracer_init(config_json: &str) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let config = if config_json.trim().is_empty() {
                TracerConfig::default()
            } else {
                TracerConfig::from_json(config_json).unwrap_or_else(|e| {
                    log::warn!("{}: bad config ({}), using defaults", $app_name, e);
                    TracerConfig::default()
                })
            };
            let mut runner = $crate::TracerRunner::new(config);
            if let Err(e) = runner.load_catalog($catalog) {
                log::error!("{}: bundled catalog rejected: {}", $app_name, e);
            }

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized", $app_name);
        }

        /// Replace the catalog. Returns the number of characters, or -1 on error.
        #[wasm_bindgen]
        pub fn tracer_load_catalog(json: &str) -> i32 {
            with_runner(|r| match r.load_catalog(json) {
                Ok(n) => n as i32,
                Err(e) => {
                    log::error!("{}: catalog rejected: {}", $app_name, e);
                    -1
                }
            })
        }

        #[wasm_bindgen]
        pub fn tracer_select(id: u32) -> bool {
            with_runner(|r| r.select(id))
        }

        #[wasm_bindgen]
        pub fn tracer_select_index(index: u32) -> bool {
            with_runner(|r| r.select_index(index as usize))
        }

        #[wasm_bindgen]
        pub fn tracer_reset() {
            with_runner(|r| r.reset());
        }

        #[wasm_bindgen]
        pub fn tracer_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn tracer_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn tracer_pointer_up() {
            with_runner(|r| r.push_input(InputEvent::PointerUp));
        }

        #[wasm_bindgen]
        pub fn tracer_tick(now_ms: f64) {
            with_runner(|r| r.tick(now_ms));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_events_ptr() -> *const f32 {
            with_runner(|r| r.events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_events_len() -> u32 {
            with_runner(|r| r.events_len())
        }

        #[wasm_bindgen]
        pub fn get_state() -> u32 {
            with_runner(|r| r.state_code())
        }

        #[wasm_bindgen]
        pub fn get_character_id() -> i32 {
            with_runner(|r| r.character_id())
        }

        #[wasm_bindgen]
        pub fn get_character_count() -> u32 {
            with_runner(|r| r.catalog().len() as u32)
        }

        #[wasm_bindgen]
        pub fn get_stroke_index() -> u32 {
            with_runner(|r| r.stroke_index())
        }

        #[wasm_bindgen]
        pub fn get_stroke_count() -> u32 {
            with_runner(|r| r.stroke_count())
        }

        #[wasm_bindgen]
        pub fn get_failures() -> u32 {
            with_runner(|r| r.failures())
        }

        // ---- Guidance accessors ----

        #[wasm_bindgen]
        pub fn get_guidance_active() -> bool {
            with_runner(|r| r.frame().is_some())
        }

        #[wasm_bindgen]
        pub fn get_guidance_progress() -> f32 {
            with_runner(|r| r.frame().map_or(0.0, |f| f.progress))
        }

        #[wasm_bindgen]
        pub fn get_guidance_point_index() -> u32 {
            with_runner(|r| r.frame().map_or(0, |f| f.point_index as u32))
        }

        #[wasm_bindgen]
        pub fn get_guidance_x() -> f32 {
            with_runner(|r| r.frame().map_or(0.0, |f| f.position.x))
        }

        #[wasm_bindgen]
        pub fn get_guidance_y() -> f32 {
            with_runner(|r| r.frame().map_or(0.0, |f| f.position.y))
        }

        #[wasm_bindgen]
        pub fn get_guidance_heading() -> f32 {
            with_runner(|r| r.frame().map_or(0.0, |f| f.heading))
        }
    };
}
