//! Event variants and their tie-break priorities.
//!
//! Each variant carries only what is needed to resume the step it stands
//! for.  When two events share a time, the higher priority runs first.
//!
//! | Variant            | Priority |
//! |--------------------|----------|
//! | `RequestFulfilled` | 100      |
//! | `Pause`            | 100      |
//! | `BasketRefill`     | 70       |
//! | `CamelDeliver`     | 60       |
//! | `CamelReturn`      | 50       |
//! | `RequestFail`      | 30       |
//! | `CamelPrepare`     | 20       |
//! | `RequestReceive`   | 10       |
//! | `CamelWalk`        | 1        |
//! | `CamelDrink`       | 1        |
//! | `SimulationEnd`    | 0        |

use std::fmt;
use std::sync::Arc;

use cv_core::{CamelId, NodeId, RequestId, WarehouseId};
use cv_spatial::PathDescriptor;

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A request becomes known to the dispatcher.
    RequestReceive { request: RequestId },
    /// The request's deadline passed before it was delivered.
    RequestFail { request: RequestId },
    /// Every basket of the request has arrived.
    RequestFulfilled { request: RequestId },
    /// A committed camel loads up and sets off along `path`.
    CamelPrepare { camel: CamelId, request: RequestId, path: Arc<PathDescriptor> },
    /// The camel starts drinking at `node`.
    CamelDrink { camel: CamelId, node: NodeId },
    /// The camel reaches `node`.
    CamelWalk { camel: CamelId, node: NodeId, notable: bool },
    /// The camel reaches the request's oasis.
    CamelDeliver { camel: CamelId, request: RequestId },
    /// The camel is back at its home warehouse.
    CamelReturn { camel: CamelId, request: RequestId },
    BasketRefill { warehouse: WarehouseId },
    Pause,
    SimulationEnd,
}

impl Event {
    pub fn priority(&self) -> i32 {
        match self {
            Event::RequestFulfilled { .. } => 100,
            Event::Pause                   => 100,
            Event::BasketRefill { .. }     => 70,
            Event::CamelDeliver { .. }     => 60,
            Event::CamelReturn { .. }      => 50,
            Event::RequestFail { .. }      => 30,
            Event::CamelPrepare { .. }     => 20,
            Event::RequestReceive { .. }   => 10,
            Event::CamelWalk { .. }        => 1,
            Event::CamelDrink { .. }       => 1,
            Event::SimulationEnd           => 0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Event::RequestReceive { .. }   => "request-receive",
            Event::RequestFail { .. }      => "request-fail",
            Event::RequestFulfilled { .. } => "request-fulfilled",
            Event::CamelPrepare { .. }     => "camel-prepare",
            Event::CamelDrink { .. }       => "camel-drink",
            Event::CamelWalk { .. }        => "camel-walk",
            Event::CamelDeliver { .. }     => "camel-deliver",
            Event::CamelReturn { .. }      => "camel-return",
            Event::BasketRefill { .. }     => "basket-refill",
            Event::Pause                   => "pause",
            Event::SimulationEnd           => "simulation-end",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
