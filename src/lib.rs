pub mod analyzers;
pub mod charts;
pub mod config;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod stats;
