pub mod analyzers;
pub mod cli;
pub mod error;
pub mod models;
pub mod presentation;
pub mod processors;
pub mod provider;
pub mod settings;
pub mod utils;
pub mod writers;

pub use error::{DashboardError, Result};
