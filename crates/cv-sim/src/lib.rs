//! `cv-sim` — discrete-event kernel and allocation logic for the
//! rust_caravan logistics simulator.
//!
//! # Event loop
//!
//! ```text
//! loop:
//!   ① Pop      — the earliest event (time ascending, priority descending,
//!                then FIFO) leaves the queue.
//!   ② Clock    — `now` jumps to the event's time.
//!   ③ Process  — the event runs to completion; it may mutate warehouses,
//!                camels and requests and schedule further events.
//!   ④ Stop     — on Pause, on SimulationEnd, or on a fatal error (deadline
//!                breach, invariant violation), after which the Sim is
//!                halted for good.
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`event`]     | `Event` variants and their priorities                       |
//! | [`queue`]     | `EventQueue`, `EventId` (ordered, cancellable)              |
//! | [`warehouse`] | `Warehouse`, `WarehouseSpec`, `Commitment` (inventory, pools) |
//! | [`request`]   | `Request`, `RequestState`, `RequestManager` (retry set)     |
//! | [`dispatch`]  | `Dispatcher`; first attempt and refill retry                |
//! | [`sim`]       | `Sim`, `Step`, `RunOutcome`                                 |
//! | [`builder`]   | `SimBuilder` (validation, network + fleet assembly)         |
//! | [`scenario`]  | `Scenario`, `RequestSpec`, request CSV loader               |
//! | [`observer`]  | `SimObserver`, `TripRecord`, `RefillRecord`, `SimSummary`   |
//! | [`error`]     | `SimError`, `InvariantViolation`, `SimResult<T>`            |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Floyd–Warshall precompute relaxes rows on rayon.          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cv_sim::{NoopObserver, RunOutcome, Scenario};
//!
//! let scenario: Scenario = serde_json::from_reader(file)?;
//! let mut sim = scenario.into_builder().build()?;
//! if let RunOutcome::Finished(summary) = sim.run(&mut NoopObserver)? {
//!     println!("{summary}");
//! }
//! ```

pub mod builder;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod observer;
pub mod queue;
pub mod request;
pub mod scenario;
pub mod sim;
pub mod warehouse;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use dispatch::Dispatcher;
pub use error::{InvariantViolation, SimError, SimResult};
pub use event::Event;
pub use observer::{NoopObserver, RefillRecord, SimObserver, SimSummary, TripRecord};
pub use queue::{EventId, EventQueue};
pub use request::{Request, RequestManager, RequestState};
pub use scenario::{load_requests_csv, load_requests_reader, RequestSpec, Scenario};
pub use sim::{RunOutcome, Sim, Step};
pub use warehouse::{Commitment, Warehouse, WarehouseSpec};
