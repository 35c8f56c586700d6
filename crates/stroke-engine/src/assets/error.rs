/// Errors raised while loading character data.
///
/// The tracing core itself never fails; malformed data is rejected here,
/// before a character can reach a session.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid character JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("character {character} has no strokes")]
    NoStrokes { character: u32 },

    #[error("stroke {stroke} of character {character} has {count} guidance points (need at least {min})")]
    TooFewGuidancePoints { character: u32, stroke: u32, count: usize, min: usize },

    #[error("character {character}: expected stroke order {expected}, found {found}")]
    StrokeOrder { character: u32, expected: u32, found: u32 },

    #[error("duplicate character id {0}")]
    DuplicateCharacter(u32),
}
