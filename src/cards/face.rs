//! Tarot names for card values.

const MAJOR_ARCANA: [&str; 22] = [
    "The Magician",
    "The High Priestess",
    "The Empress",
    "The Emperor",
    "The Hierophant",
    "The Lovers",
    "The Chariot",
    "Strength",
    "The Hermit",
    "Wheel of Fortune",
    "Justice",
    "The Hanged Man",
    "Death",
    "Temperance",
    "The Devil",
    "The Tower",
    "The Star",
    "The Moon",
    "The Sun",
    "Judgement",
    "The World",
    "The Fool",
];

/// Major arcana shown on faces with this value, if any.
///
/// Value 1 is The Magician (I) through value 21, The World (XXI); the Fool
/// closes the deck at 22.
#[must_use]
pub fn arcana_name(value: u32) -> Option<&'static str> {
    let index = value.checked_sub(1)? as usize;
    MAJOR_ARCANA.get(index).copied()
}

/// Display label for a card value, falling back to a numbered arcanum.
#[must_use]
pub fn face_label(value: u32) -> String {
    match arcana_name(value) {
        Some(name) => name.to_string(),
        None => format!("Arcanum {value}"),
    }
}
