use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// A raster row does not fit in 5 bits, or the row count is not 8.
    #[error("Raster invalide : {0}")]
    InvalidRaster(String),

    /// Unknown ROM variant label.
    #[error("Variante de ROM inconnue : {label}")]
    UnknownVariant {
        /// The label that could not be recognised.
        label: String,
    },
}
