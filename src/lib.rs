pub mod config;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod pipeline;
pub mod pricing;
pub mod record;
pub mod report;
pub mod table;
