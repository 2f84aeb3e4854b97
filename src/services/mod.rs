pub mod client;
pub mod providers;
pub mod proxy;
pub mod query_builder;

pub use client::{SearchClient, SearchFailure, SearchOutcome, SearchSession};
pub use query_builder::build_query;
