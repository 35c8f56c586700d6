/// Characters shipped with the demo.
pub const CHARACTERS_JSON: &str = include_str!("../data/characters.json");
