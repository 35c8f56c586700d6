use wasm_bindgen::prelude::*;
use stroke_engine::*;

mod bundled;

stroke_web::export_tracer!(bundled::CHARACTERS_JSON, "bengali-tracer");
