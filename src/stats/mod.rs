//! Stats module - summary tables for charting

mod aggregator;

pub use aggregator::{
    AggregateFn, AggregationError, Aggregator, SplitSummary, SummaryTable, MISSING_KEY,
};
