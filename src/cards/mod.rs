//! Cards, dealing and table layout.
//!
//! - `Card`: runtime state of one card (value, flipped, matched, position)
//! - `shuffle` / `generate_values`: pair values in random order
//! - `grid_layout` / `card_positions`: rows, columns and slot centres
//! - `Deal`: a complete level's worth of cards

pub mod card;
pub mod face;
pub mod factory;
pub mod layout;
pub mod shuffle;
pub mod values;

pub use card::{Card, Position};
pub use face::{arcana_name, face_label};
pub use factory::Deal;
pub use layout::{card_positions, grid_layout, GridLayout};
pub use shuffle::shuffle;
pub use values::generate_values;
