use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("layer `{layer}` references undeclared mode `{mode}`")]
    UnknownMode { layer: String, mode: String },

    #[error("layer `{layer}` declares an empty mode list")]
    EmptyModeList { layer: String },

    #[error("layer `{name}` is already registered")]
    DuplicateLayer { name: String },

    #[error("invalid surface config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl ChartError {
    /// Returns `true` for errors caused by a bad mode/layer declaration.
    ///
    /// These are never retried; the caller has to fix the declaration.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownMode { .. }
                | Self::EmptyModeList { .. }
                | Self::DuplicateLayer { .. }
                | Self::InvalidConfig(_)
        )
    }
}
