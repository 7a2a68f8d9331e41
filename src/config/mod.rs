mod defaults;
mod parser;
mod settings;
mod validation;

pub use settings::{AppConfig, BalanceConfig};
