//! `cv-fleet` — camels, their timing model, and their generation.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`camel_type`] | `CamelType` (speed/range bounds, drink time, capacity)    |
//! | [`camel`]      | `Camel` (sampled, fixed characteristics)                  |
//! | [`trip`]       | feasibility check, `TripPlan`, `TripStep`                 |
//! | [`factory`]    | `CamelFactory` (seeded sampling, ideal camels)            |
//! | [`builder`]    | `FleetBuilder` (fluent construction)                      |
//! | [`store`]      | `CamelStore` (arena indexed by `CamelId`)                 |
//! | [`fleet`]      | `Fleet` (factory + store, spawn and probe)                |
//! | [`error`]      | `FleetError`, `FleetResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `CamelType`, `Camel`. |

pub mod builder;
pub mod camel;
pub mod camel_type;
pub mod error;
pub mod factory;
pub mod fleet;
pub mod store;
pub mod trip;

#[cfg(test)]
mod tests;

pub use builder::FleetBuilder;
pub use camel::Camel;
pub use camel_type::CamelType;
pub use error::{FleetError, FleetResult};
pub use factory::CamelFactory;
pub use fleet::Fleet;
pub use store::CamelStore;
pub use trip::{TripPlan, TripStep};
