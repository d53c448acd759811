//! Menu rendering split out of the main renderer

pub mod common;
pub mod prompt;
pub mod shop;
