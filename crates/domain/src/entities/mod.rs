pub mod ability;
pub mod area;
pub mod character;
pub mod item;

pub use ability::Ability;
pub use area::{Area, LinkingPoint};
pub use character::{Character, Gender};
pub use item::{Item, ItemPlacement};
