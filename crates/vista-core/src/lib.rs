pub mod config;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod guardrail;
pub mod ingest;
pub mod orientation;
pub mod raster;
pub mod viewport;
