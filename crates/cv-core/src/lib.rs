//! `cv-core` — foundational types for the `rust_caravan` logistics simulator.
//!
//! This crate is a dependency of every other `cv-*` crate.  It intentionally
//! has no `cv-*` dependencies and minimal external ones (`rand`,
//! `rand_distr` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`, `WarehouseId`, `OasisId`, `CamelId`, `RequestId`, `CamelTypeId` |
//! | [`geo`]         | `Point`, planar air distance                               |
//! | [`time`]        | `SimTime` (continuous simulated clock)                     |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                           |
//! | [`config`]      | `SimConfig`, `PathHeuristic`                               |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{PathHeuristic, SimConfig};
pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::{CamelId, CamelTypeId, EdgeId, NodeId, OasisId, RequestId, WarehouseId};
pub use rng::SimRng;
pub use time::SimTime;
