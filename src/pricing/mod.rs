use crate::pricing::price::PriceBand;
use crate::record::Record;
use crate::table::PricingOutput;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub mod competitive;
pub mod demand;
pub mod demand_based;
pub mod encoders;
pub mod normalize;
pub mod price;
pub mod sequential;

use competitive::{CompetitiveModel, CompetitiveParams};
use demand_based::{DemandModel, DemandParams};
use sequential::{LinearModel, LinearParams};

const PROGRESS_EVERY: usize = 100;

/// A pricing strategy run over a full, materialized record batch.
///
/// Models are selected via the `model` field of the pricing parameter file.
pub trait PricingModel: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// Band every produced price is clamped to.
    fn band(&self) -> &PriceBand;

    /// Price every record. Output row order is model-specific but deterministic.
    fn run(&self, records: &[Record]) -> PricingOutput;
}

#[derive(Debug, Deserialize)]
pub struct PricingFile {
    pub model: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("failed to read pricing file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse pricing file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid pricing parameters: {0}")]
    Invalid(String),
}

// Model Factory
pub fn create_model(file: &PricingFile) -> Result<Box<dyn PricingModel>, ParamsError> {
    match file.model.as_str() {
        "linear" => {
            let params: LinearParams = params_or_default(&file.params)?;
            validate_band(&params.band)?;
            Ok(Box::new(LinearModel::new(params)))
        }
        "demand" => {
            let params: DemandParams = params_or_default(&file.params)?;
            validate_band(&params.band)?;
            Ok(Box::new(DemandModel::new(params)))
        }
        "competitive" => {
            let params: CompetitiveParams = params_or_default(&file.params)?;
            validate_band(&params.band)?;
            if !(params.distance_threshold_km >= 0.0) {
                return Err(ParamsError::Invalid(format!(
                    "distance_threshold_km must be non-negative, got {}",
                    params.distance_threshold_km
                )));
            }
            Ok(Box::new(CompetitiveModel::new(params)))
        }
        other => Err(ParamsError::Invalid(format!("unknown model: {other}"))),
    }
}

pub fn load_model_from_path(path: impl AsRef<Path>) -> Result<Box<dyn PricingModel>, ParamsError> {
    let contents = std::fs::read_to_string(path)?;
    let file: PricingFile = serde_json::from_str(&contents)?;
    create_model(&file)
}

fn params_or_default<T>(value: &serde_json::Value) -> Result<T, ParamsError>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if value.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value.clone())?)
}

fn validate_band(band: &PriceBand) -> Result<(), ParamsError> {
    if !(band.base_price.is_finite() && band.base_price > 0.0) {
        return Err(ParamsError::Invalid(format!(
            "base_price must be positive, got {}",
            band.base_price
        )));
    }
    if !(band.min_multiplier >= 0.0 && band.min_multiplier <= band.max_multiplier) {
        return Err(ParamsError::Invalid(format!(
            "multiplier range [{}, {}] is empty",
            band.min_multiplier, band.max_multiplier
        )));
    }
    Ok(())
}

pub(crate) fn log_progress(model: &str, index: usize) {
    if index % PROGRESS_EVERY == 0 {
        debug!(model, processed = index, "Pricing in progress");
    }
}
