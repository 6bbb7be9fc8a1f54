use crate::config::ConvertArgs;
use crate::error::CliError;

pub fn run(args: ConvertArgs) -> Result<(), CliError> {
    let p = super::prepare(&args)?;
    println!("{}", p.dispatcher.can_convert_value_to_type(&p.value, &p.dest));
    Ok(())
}
