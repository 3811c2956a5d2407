pub mod types;
pub mod scene;
pub mod kinematics;
pub mod equipment;
pub mod control;
pub mod collision;
pub mod delivery;
pub mod config;
pub mod telemetry;
pub mod site;

pub use types::*;
pub use config::{ConfigError, SimulationConfig};
pub use site::{CraneSite, SiteSnapshot};
