pub mod record;
pub mod resolve;
pub mod schema;
pub mod show;
