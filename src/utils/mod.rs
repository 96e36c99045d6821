pub mod query;
pub mod time;
