pub mod arena;
pub mod builder;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod render;
pub mod report;
pub mod sketch;
pub mod util;
