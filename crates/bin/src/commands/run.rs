//! Run command - replays a script against a new content model.

use std::{io::Write, path::Path};

use scoped_model::{ContentModel, ModelConfig, Value, ValueError};

use crate::cli::RunArgs;
use crate::script;

/// Run the run command
pub fn run(args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ModelConfig::load(path)?,
        None => ModelConfig::default(),
    };
    if args.pretty {
        config.pretty_json = true;
    }

    let model = build_model(config, args.data.as_deref())?;
    let text = std::fs::read_to_string(&args.script)?;
    let lines = script::parse(&text)?;
    tracing::info!(script = %args.script.display(), operations = lines.len(), "Running script");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    script::execute(&model, &lines, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Creates the model, seeding the root scope from a JSON object file if given.
fn build_model(config: ModelConfig, data: Option<&Path>) -> Result<ContentModel, Box<dyn std::error::Error>> {
    let Some(path) = data else {
        return Ok(ContentModel::with_config(config, Default::default()));
    };

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    match Value::from(json) {
        Value::Map(root) => {
            tracing::debug!(path = %path.display(), keys = root.len(), "Loaded root data");
            Ok(ContentModel::with_config(config, root))
        }
        other => Err(scoped_model::Error::from(ValueError::NotAnObject {
            kind: other.kind().to_string(),
        })
        .into()),
    }
}
