// Library crate exposing modules for the binary and integration tests

pub mod cleaner;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod model;
pub mod scanner;
pub mod util;
pub mod view;
pub mod viewmodel;
pub mod worker;
