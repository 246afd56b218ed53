//! Built-in scenario: three warehouses feeding six oases.
//!
//! ```text
//!            W2 (15,35)            O5 (45,30)
//!             │   ╲                  │   ╲
//!        O3 (5,25) O4 (20,15) ─ O2 (30,20) W1 (40,10)
//!             ╲    │                     ╱
//!   W0 (0,0) ─ O0 (10,5) ─── O1 (25,0) ─
//! ```

use std::io::Cursor;

use anyhow::Result;

use cv_core::{Point, SimConfig};
use cv_fleet::CamelType;
use cv_sim::{load_requests_reader, Scenario, WarehouseSpec};

const SEED: u64 = 42;

// 1-based oasis index, as in hand-written datasets.
const REQUESTS_CSV: &str = "\
arrival,oasis,baskets,deadline\n\
0,1,4,200\n\
2,3,6,220\n\
5,6,3,200\n\
8,5,10,260\n\
12,2,2,180\n\
20,4,7,240\n\
30,6,12,300\n\
45,1,5,220\n\
";

fn warehouse(x: f64, y: f64) -> WarehouseSpec {
    WarehouseSpec {
        position: Point::new(x, y),
        refill_count: 8,
        refill_interval: 60.0,
        manipulation_time: 0.25,
    }
}

pub fn built_in() -> Result<Scenario> {
    Ok(Scenario {
        config: SimConfig::with_seed(SEED),
        warehouses: vec![warehouse(0.0, 0.0), warehouse(40.0, 10.0), warehouse(15.0, 35.0)],
        oases: vec![
            Point::new(10.0, 5.0),
            Point::new(25.0, 0.0),
            Point::new(30.0, 20.0),
            Point::new(5.0, 25.0),
            Point::new(20.0, 15.0),
            Point::new(45.0, 30.0),
        ],
        // Warehouses are nodes 0..3, oases 3..9.
        edges: vec![
            (0, 3), (3, 4), (4, 1), (3, 7), (7, 5), (5, 1),
            (7, 2), (2, 6), (6, 3), (5, 8), (8, 1),
        ],
        camel_types: vec![
            CamelType {
                name: "dromedary".into(),
                min_speed: 2.0,
                max_speed: 4.0,
                min_range: 25.0,
                max_range: 40.0,
                drink_time: 1.0,
                max_load: 3,
                share: 0.7,
            },
            CamelType {
                name: "bactrian".into(),
                min_speed: 1.0,
                max_speed: 2.0,
                min_range: 40.0,
                max_range: 60.0,
                drink_time: 2.0,
                max_load: 5,
                share: 0.3,
            },
        ],
        requests: load_requests_reader(Cursor::new(REQUESTS_CSV))?,
        strategy: None,
    })
}
