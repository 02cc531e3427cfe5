pub mod config_service;
pub mod http_scenario_client;
pub mod json_dir_scenario_repository;
pub mod paths;

pub use crate::config_service::{ConfigService, ServerConfig};
pub use crate::http_scenario_client::HttpScenarioClient;
pub use crate::json_dir_scenario_repository::JsonDirScenarioRepository;
