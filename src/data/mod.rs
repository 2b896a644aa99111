//! Data module - CSV loading, schema and categorical clean-up

mod dataset;
mod loader;
mod processor;
mod schema;

pub use dataset::Dataset;
pub use loader::DataLoader;
pub use processor::DataProcessor;
pub use schema::columns;
