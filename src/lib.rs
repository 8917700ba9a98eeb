pub mod analyzer;
pub mod config;
pub mod error;
pub mod ingest;
pub mod pose;
pub mod render;
pub mod series;
