use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "coerce", about = "Runtime value conversion")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a value and print the result
    Convert(ConvertArgs),
    /// Only report whether the conversion is possible
    Check(ConvertArgs),
}

#[derive(Args, Clone, Debug)]
pub struct ConvertArgs {
    /// Path to TOML engine config (handler order, named classes)
    #[arg(long, env = "COERCE_CONFIG")]
    pub config: Option<String>,

    /// Destination type descriptor, e.g. `int`, `String[]`, `set<long>`
    #[arg(long)]
    pub to: String,

    /// Source value as JSON; anything that is not valid JSON is taken as a string
    pub value: String,
}
