//! Geometric primitives and character data traced by the engine.

pub mod point;
pub mod stroke;
pub mod character;

pub use point::Point;
pub use stroke::ReferenceStroke;
pub use character::{Character, CharacterCategory};
