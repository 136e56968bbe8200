use thiserror::Error;

use crate::ir::Dataset;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset is not valid JSON ({json}) nor JSON5 ({json5})")]
    Parse {
        json: serde_json::Error,
        json5: json5::Error,
    },
}

/// Parses a record snapshot. Strict JSON is tried first; JSON5 covers
/// hand-maintained files with comments or trailing commas.
pub fn parse_dataset(input: &str) -> Result<Dataset, DatasetError> {
    match serde_json::from_str(input) {
        Ok(dataset) => Ok(dataset),
        Err(json_err) => match json5::from_str(input) {
            Ok(dataset) => Ok(dataset),
            Err(json5_err) => Err(DatasetError::Parse {
                json: json_err,
                json5: json5_err,
            }),
        },
    }
}
