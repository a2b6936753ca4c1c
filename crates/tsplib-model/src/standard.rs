//! The standard TSPLIB95 problem schema.
//!
//! One field per keyword of the format specification: the scalar
//! metadata entries, the coordinate/display sections, the three edge
//! sections, depots, demands, and tours. Built once and shared; custom
//! dialects derive from it with [`Schema::extend`].

use std::sync::{Arc, LazyLock};
use tsplib_core::{Field, Schema};

static STANDARD: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Arc::new(
        Schema::builder()
            .field("name", Field::string("NAME"))
            .field("comment", Field::string("COMMENT"))
            .field("type", Field::string("TYPE"))
            .field("dimension", Field::integer("DIMENSION"))
            .field("capacity", Field::integer("CAPACITY"))
            .field("node_coord_type", Field::string("NODE_COORD_TYPE"))
            .field("edge_weight_type", Field::string("EDGE_WEIGHT_TYPE"))
            .field("display_data_type", Field::string("DISPLAY_DATA_TYPE"))
            .field("edge_weight_format", Field::string("EDGE_WEIGHT_FORMAT"))
            .field("edge_data_format", Field::string("EDGE_DATA_FORMAT"))
            .field(
                "node_coords",
                Field::indexed_coordinates("NODE_COORD_SECTION", Some(vec![2, 3])),
            )
            .field("edge_data", Field::edge_data("EDGE_DATA_SECTION"))
            .field("edge_weights", Field::matrix("EDGE_WEIGHT_SECTION"))
            .field(
                "display_data",
                Field::indexed_coordinates("DISPLAY_DATA_SECTION", Some(vec![2])),
            )
            .field("fixed_edges", Field::edge_list("FIXED_EDGES_SECTION"))
            .field("depots", Field::depots("DEPOT_SECTION"))
            .field("demands", Field::demands("DEMAND_SECTION"))
            .field("tours", Field::tours("TOUR_SECTION"))
            .build(),
    )
});

/// The shared standard schema.
pub fn standard_schema() -> Arc<Schema> {
    Arc::clone(&STANDARD)
}
