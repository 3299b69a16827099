pub mod visit;

pub use visit::{
    AttributionTuple, DIRECT_SOURCE, NOT_SET, UTM_PARAMS, VisitLedger, VisitRecord, json_schema,
};
