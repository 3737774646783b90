pub mod config;
pub mod parse;
pub mod report;
pub mod text;
