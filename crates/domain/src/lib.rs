extern crate self as outbreak_domain;

pub mod entities;
pub mod error;
pub mod ids;
pub mod knowledge;
pub mod value_objects;
pub mod world;

pub use entities::{Ability, Area, Character, Gender, Item, LinkingPoint};
pub use error::DomainError;
pub use ids::{AbilityId, AreaId, CharacterId, EventId, ItemId, LinkingPointId, WorldId};
pub use world::World;
