use thiserror::Error;

use confit_schema::{BindReport, SchemaError};
use confit_toml::ParseError;

/// Everything that can go wrong between source text and a bound record.
///
/// Schema and parse failures are single and fatal; a bind failure
/// carries the full [`BindReport`] so every field error arrives in one
/// pass.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Bind(#[from] BindReport),
}
