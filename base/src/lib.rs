pub mod database;
pub mod setting;
pub mod util;

pub const CLI_NAME: &str = "fyyur";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// logging constants
pub const FYYUR_LOGLEVEL: &str = "FYYUR_LOGLEVEL";
