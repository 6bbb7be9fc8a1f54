#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Engine(#[from] coerce_engine::EngineError),

    #[error("{0}")]
    Convert(#[from] coerce_api::ConvertError),
}
