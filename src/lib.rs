pub mod models;
pub mod services;
pub mod presenters;
pub mod views;
pub mod cli;
pub mod utils;

pub use anyhow::{Error, Result};
