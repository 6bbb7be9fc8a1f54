pub mod check;
pub mod convert;

use coerce_api::{TypeDesc, Value};
use coerce_engine::Dispatcher;
use coerce_engine::bootstrap::{build_dispatcher, default_dispatcher};
use coerce_engine::config::EngineConfig;
use coerce_engine::handlers::ConstructorTable;

use crate::config::ConvertArgs;
use crate::error::CliError;

/// Dispatcher, source value and destination parsed from the arguments.
pub(crate) struct Prepared {
    pub dispatcher: Dispatcher,
    pub value: Value,
    pub dest: TypeDesc,
}

pub(crate) fn prepare(args: &ConvertArgs) -> Result<Prepared, CliError> {
    let dispatcher = match &args.config {
        Some(path) => {
            tracing::info!(config = %path, "loading configuration");
            let config = EngineConfig::load(path)?;
            build_dispatcher(&config, ConstructorTable::new())?
        }
        None => default_dispatcher(),
    };

    let value = match serde_json::from_str::<serde_json::Value>(&args.value) {
        Ok(json) => Value::from_json(&json)?,
        Err(_) => Value::Str(args.value.clone()),
    };
    let dest: TypeDesc = args.to.parse()?;
    tracing::debug!(src = %value.class(), dest = %dest, "prepared request");

    Ok(Prepared {
        dispatcher,
        value,
        dest,
    })
}
