use crate::config::Config;
use crate::dataset::{self, DatasetOverview};
use crate::error::AppError;
use crate::pricing::PricingModel;
use crate::pricing::sequential::LinearModel;
use crate::report::{self, RunSummary};
use std::time::SystemTime;
use tracing::{info, warn};

/// Model named by the configured pricing file, or the default linear model.
pub fn select_model(config: &Config) -> Box<dyn PricingModel> {
    match config.pricing_path() {
        Some(path) => match crate::pricing::load_model_from_path(path) {
            Ok(model) => {
                info!(path = %path.display(), model = model.name(), "Pricing model loaded");
                model
            }
            Err(e) => {
                warn!(error = %e, "Failed to load pricing parameters, using default");
                Box::new(LinearModel::with_defaults())
            }
        },
        None => {
            info!("No pricing path configured, using default model");
            Box::new(LinearModel::with_defaults())
        }
    }
}

/// Load the dataset, price it with `model`, and persist the results.
pub fn run(config: &Config, model: &dyn PricingModel) -> Result<RunSummary, AppError> {
    let records = dataset::load_from_path(config.input_path())?;
    let overview = DatasetOverview::of(&records);
    info!(
        total_records = overview.total_records,
        unique_spaces = overview.unique_spaces,
        first_date = overview.first_date.as_deref().unwrap_or("-"),
        last_date = overview.last_date.as_deref().unwrap_or("-"),
        "Dataset loaded"
    );
    if records.is_empty() {
        return Err(AppError::EmptyDataset);
    }

    let output = model.run(&records);
    let summary = RunSummary::new(model.name(), &output, config.chart_spaces(), SystemTime::now())?;
    if let Some(stats) = &summary.stats {
        info!(
            model = model.name(),
            records = stats.records,
            average_price = stats.average_price,
            min_price = stats.min_price,
            max_price = stats.max_price,
            "Pricing complete"
        );
    }

    report::write_results(&output, config.output_path())?;
    info!(path = %config.output_path().display(), "Pricing results saved");
    if let Some(path) = config.summary_path() {
        report::write_summary(&summary, path)?;
        info!(path = %path.display(), "Run summary saved");
    }

    Ok(summary)
}
