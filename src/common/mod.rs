pub mod config;
pub mod logging;
pub mod paths;
pub mod progress;
pub mod types;
pub mod utils;

pub use config::*;
pub use logging::*;
pub use paths::*;
pub use types::*;
pub use utils::*;

pub use progress::{create_count_progress_bar, create_spinner};
