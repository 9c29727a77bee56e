pub mod collect;
pub mod config;
pub mod coursetable;
pub mod error;
pub mod export;
pub mod extract;
pub mod model;
pub mod pipeline;
pub mod rating;
pub mod report;
pub mod source;
