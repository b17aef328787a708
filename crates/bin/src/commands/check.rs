//! Check command - parses a script and reports its size.

use crate::cli::CheckArgs;
use crate::script;

/// Run the check command
pub fn run(args: &CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(&args.script)?;
    let lines = script::parse(&text)?;
    println!("ok: {} operations in {}", lines.len(), args.script.display());
    Ok(())
}
