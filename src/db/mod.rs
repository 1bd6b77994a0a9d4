pub mod autosave;
pub mod kv_store;
pub mod roster_repo;
pub mod schema;
