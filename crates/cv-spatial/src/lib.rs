//! `cv-spatial` — oasis network, shortest paths, and warehouse indexing.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`network`]    | `Network` (CSR), `NetworkBuilder` with edge preprocessing  |
//! | [`path`]       | `PathDescriptor`                                           |
//! | [`calculator`] | `PathCalculator` trait; centre, Floyd–Warshall, Dijkstra, A* |
//! | [`select`]     | `TopologyStats`, `Strategy`, `StrategyKind`                |
//! | [`index`]      | `WarehouseIndex` (R-tree, nearest-first ordering)          |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Relaxes Floyd–Warshall rows with rayon.                   |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `PathDescriptor`, `TopologyStats`, `StrategyKind`. |

pub mod calculator;
pub mod error;
pub mod index;
pub mod network;
pub mod path;
pub mod select;


pub use calculator::{
    AStarCalculator, CentreCalculator, CentreDetection, DijkstraCalculator,
    FloydWarshallCalculator, PathCalculator,
};
pub use error::{SpatialError, SpatialResult};
pub use index::WarehouseIndex;
pub use network::{Network, NetworkBuilder};
pub use path::PathDescriptor;
pub use select::{Strategy, StrategyKind, TopologyStats};
