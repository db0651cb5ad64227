//! Configuration loading for the trip paperwork engine.
//!
//! This module loads `paperwork.yaml` from a configuration directory: the
//! organization names printed on the forms, the font, the output directory,
//! the locations of the rate table and option lists, and the suggestion
//! lists offered to form clients.
//!
//! # Example
//!
//! ```no_run
//! use trip_paperwork::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Writing documents to {}", config.config().output_dir.display());
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader};
pub use types::{Organization, PaperworkConfig, ServerConfig};
