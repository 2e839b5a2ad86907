pub mod args;
pub mod commands;
pub mod logging;
pub mod settings;

pub use args::{Cli, Commands};
pub use commands::run;
pub use logging::{init_logging, LogConfig, LogFormat};
pub use settings::Settings;
