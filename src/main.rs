use parking_pricing::{config, pipeline};
use tracing::Level;

fn init_tracing(level: Level) {
    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let config = config::load_from_path(&config_path)?;
    init_tracing(config.log_level());
    tracing::info!(
        config_path = %config_path,
        app = %config.app.name,
        "parking-pricing starting"
    );

    let model = pipeline::select_model(&config);
    let summary = pipeline::run(&config, model.as_ref())?;

    if !summary.chart_spaces.is_empty() {
        tracing::info!(spaces = ?summary.chart_spaces, "Spaces selected for charting");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use parking_pricing::config;

    #[test]
    fn default_config_is_valid_toml() -> Result<(), Box<dyn std::error::Error>> {
        let _config = config::load_default()?;
        Ok(())
    }
}
