pub mod batch;
pub mod compare;
pub mod config;
pub mod input;
pub mod parse;
