use crate::config::ConvertArgs;
use crate::error::CliError;

pub fn run(args: ConvertArgs) -> Result<(), CliError> {
    let p = super::prepare(&args)?;
    match p.dispatcher.convert_value_to_type(&p.value, &p.dest)? {
        Some(converted) => {
            tracing::debug!(class = %converted.class(), "converted");
            println!("{converted}");
        }
        None => println!("<none>"),
    }
    Ok(())
}
