use once_cell::sync::Lazy;

use super::{Graph, NodeId};
use crate::types::Transport::{self, Bus, Ferry, Taxi, Underground};

const DEMO_EDGES: &[(NodeId, NodeId, Transport)] = &[
    (1, 2, Taxi),
    (2, 3, Taxi),
    (3, 4, Taxi),
    (4, 5, Taxi),
    (5, 6, Taxi),
    (6, 7, Taxi),
    (7, 8, Taxi),
    (8, 9, Taxi),
    (9, 10, Taxi),
    (10, 11, Taxi),
    (11, 12, Taxi),
    (12, 13, Taxi),
    (13, 14, Taxi),
    (14, 15, Taxi),
    (15, 16, Taxi),
    (16, 17, Taxi),
    (17, 18, Taxi),
    (18, 19, Taxi),
    (19, 20, Taxi),
    (20, 1, Taxi),
    (1, 6, Taxi),
    (4, 9, Taxi),
    (8, 13, Taxi),
    (11, 16, Taxi),
    (14, 19, Taxi),
    (3, 18, Taxi),
    (1, 5, Bus),
    (5, 10, Bus),
    (10, 15, Bus),
    (15, 20, Bus),
    (2, 12, Bus),
    (7, 17, Bus),
    (1, 10, Underground),
    (10, 19, Underground),
    (5, 15, Underground),
    (3, 13, Ferry),
    (8, 18, Ferry),
];

static DEMO_MAP: Lazy<Graph> = Lazy::new(|| Graph::from_edges(DEMO_EDGES));

/// A 20 node map using every transport, for simulations without a map file.
pub fn demo_map() -> &'static Graph {
    &DEMO_MAP
}
