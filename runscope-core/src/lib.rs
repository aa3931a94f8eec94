pub mod analysis;
pub mod backend;
pub mod cli;
pub mod conf;
pub mod diagnose;
pub mod logging;
pub mod logs;
pub mod manifest;
