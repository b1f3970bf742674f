pub mod config_cmd;
pub mod run;
pub mod scan;

pub use config_cmd::execute_config;
pub use run::execute_run;
pub use scan::execute_scan;
