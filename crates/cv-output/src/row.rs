//! Plain data row types written by output backends.

use cv_sim::{RefillRecord, Request, TripRecord};

/// One camel trip.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryRow {
    pub camel:       u32,
    pub camel_type:  u16,
    pub request:     u32,
    pub warehouse:   u32,
    pub oasis:       u32,
    pub load:        u32,
    pub departs_at:  f64,
    pub delivers_at: f64,
    pub returns_at:  f64,
    /// Round-trip distance.
    pub walked:      f64,
    /// Outbound node indices joined with `-`.
    pub path:        String,
}

impl DeliveryRow {
    pub fn from_trip(trip: &TripRecord) -> Self {
        let plan = &trip.plan;
        let path = plan.path.iter().map(|n| n.0.to_string()).collect::<Vec<_>>().join("-");
        Self {
            camel:       trip.camel.0,
            camel_type:  trip.kind.0,
            request:     trip.request.0,
            warehouse:   trip.warehouse.0,
            oasis:       trip.oasis.0,
            load:        plan.load,
            departs_at:  plan.departs_at.0,
            delivers_at: plan.delivers_at.0,
            returns_at:  plan.returns_at.0,
            walked:      plan.walked,
            path,
        }
    }
}

/// One drink stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrinkRow {
    pub camel:   u32,
    pub request: u32,
    pub node:    u32,
    pub time:    f64,
}

impl DrinkRow {
    /// Every drink stop of a trip, outbound first.
    pub fn from_trip(trip: &TripRecord) -> Vec<Self> {
        trip.plan
            .drinks()
            .map(|(at, node)| Self {
                camel:   trip.camel.0,
                request: trip.request.0,
                node:    node.0,
                time:    at.0,
            })
            .collect()
    }
}

/// One warehouse refill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefillRow {
    pub warehouse: u32,
    pub time:      f64,
    pub before:    u32,
    pub after:     u32,
}

impl From<&RefillRecord> for RefillRow {
    fn from(r: &RefillRecord) -> Self {
        Self { warehouse: r.warehouse.0, time: r.time.0, before: r.before, after: r.after }
    }
}

/// A request in its final state.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestRow {
    pub request:      u32,
    pub oasis:        u32,
    pub baskets:      u32,
    pub arrival:      f64,
    pub deadline:     f64,
    pub delivered:    u32,
    /// `None` unless every basket arrived.
    pub delivered_at: Option<f64>,
    pub state:        String,
    pub camels:       u32,
}

impl From<&Request> for RequestRow {
    fn from(r: &Request) -> Self {
        Self {
            request:      r.id.0,
            oasis:        r.oasis.0,
            baskets:      r.baskets,
            arrival:      r.arrival.0,
            deadline:     r.deadline,
            delivered:    r.delivered,
            delivered_at: r.delivered_at.map(|t| t.0),
            state:        r.state.to_string(),
            camels:       r.serving().count() as u32,
        }
    }
}
