// File: src/core/mod.rs
pub mod engine;
pub mod predict;
pub mod scoring;
pub mod seed;
pub mod store;
pub mod types;
