use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Malformed record at row {row}, column '{column}': {reason}")]
    MalformedRecord {
        /// 1-based index of the data row (the header row is not counted).
        row: usize,
        column: String,
        reason: String,
    },

    #[error("Input table is missing required column '{0}'")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
