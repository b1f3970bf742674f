use crate::config::{Config, config_file_path};
use crate::error::AppError;
use crate::path::display_path;

pub struct ConfigOptions {
    pub show_path: bool,
}

pub fn execute_config(options: ConfigOptions) -> Result<(), AppError> {
    let path = config_file_path()?;
    println!("Configuration file: {}", display_path(&path));

    if !options.show_path {
        let config = Config::load_from(&path)?;
        println!("marker    = {}", config.marker);
        println!("cache_dir = {}", config.cache_dir);
        for skip in &config.skip {
            println!("skip      = {skip}");
        }
    }

    Ok(())
}
