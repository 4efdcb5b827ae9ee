//! Implementations that are useful accross the whole project
//!
//! Record definitions, the session store, aggregation and the advice rules

pub mod advice;
pub mod entry;
pub mod store;
pub mod summary;
