use crate::config::ConfigError;
use crate::dataset::DatasetError;
use crate::pricing::ParamsError;
use crate::report::OutputError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Params(#[from] ParamsError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error("dataset contains no records")]
    EmptyDataset,
}
