use std::collections::HashSet;
use crate::api::config::TracerConfig;
use crate::assets::error::CatalogError;
use crate::model::{Character, CharacterCategory};

/// A validated set of traceable characters, in authoring order.
/// Loaded from a JSON array at runtime.
#[derive(Debug, Clone, Default)]
pub struct CharacterCatalog {
    characters: Vec<Character>,
}

impl CharacterCatalog {
    /// Parse and validate a JSON array of characters against the default
    /// sample floor.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::from_json_with_min(json, TracerConfig::default().min_samples)
    }

    /// Parse and validate, requiring at least `min_points` guidance points per
    /// stroke. Pass the tracer's `min_samples` so every stroke can be retraced.
    pub fn from_json_with_min(json: &str, min_points: usize) -> Result<Self, CatalogError> {
        let characters: Vec<Character> = serde_json::from_str(json)?;
        Self::from_characters_with_min(characters, min_points)
    }

    pub fn from_characters(characters: Vec<Character>) -> Result<Self, CatalogError> {
        Self::from_characters_with_min(characters, TracerConfig::default().min_samples)
    }

    /// Validate characters and sort each one's strokes by order.
    pub fn from_characters_with_min(
        mut characters: Vec<Character>,
        min_points: usize,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(characters.len());
        for character in &mut characters {
            if !seen.insert(character.id) {
                return Err(CatalogError::DuplicateCharacter(character.id));
            }
            character.strokes.sort_by_key(|s| s.order);
            validate(character, min_points)?;
        }
        log::info!("loaded {} characters", characters.len());
        Ok(Self { characters })
    }

    pub fn get(&self, id: u32) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Character at a position in authoring order.
    pub fn at(&self, index: usize) -> Option<&Character> {
        self.characters.get(index)
    }

    pub fn by_category(&self, category: CharacterCategory) -> impl Iterator<Item = &Character> {
        self.characters.iter().filter(move |c| c.category == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

/// Check the structural invariants the tracer relies on. Strokes must already
/// be sorted by order. A stroke needs at least `min_points` guidance points
/// (never fewer than 2) so that an exact retrace clears the sample floor.
pub fn validate(character: &Character, min_points: usize) -> Result<(), CatalogError> {
    let min = min_points.max(2);
    if character.strokes.is_empty() {
        return Err(CatalogError::NoStrokes { character: character.id });
    }
    for (expected, stroke) in (1u32..).zip(&character.strokes) {
        if stroke.order != expected {
            return Err(CatalogError::StrokeOrder {
                character: character.id,
                expected,
                found: stroke.order,
            });
        }
        if stroke.guidance_points.len() < min {
            return Err(CatalogError::TooFewGuidancePoints {
                character: character.id,
                stroke: stroke.id,
                count: stroke.guidance_points.len(),
                min,
            });
        }
    }
    Ok(())
}
