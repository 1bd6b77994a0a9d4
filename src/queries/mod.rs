pub mod roster_queries;
pub mod stats_queries;
