//! Hands a generated [`Dataset`] to a Jinja-style template and writes the result out.  Templates
//! see the dataset as `generator`.
use std::fs;
use std::io::{
    self,
    Write,
};
use std::path::Path;

use anyhow::Result;
use minijinja::{
    context,
    path_loader,
    Environment,
    Value,
};
use ocp_core::errors::*;
use tracing::{
    debug,
    info,
};

use crate::errors::GenError;
use crate::model::Dataset;

/// The template context: the dataset bound as `generator`.
fn template_context(dataset: &Dataset) -> Value {
    context! { generator => Value::from_serialize(dataset) }
}

/// Wrap a minijinja failure, with its source chain, as a template error.
fn template_error(err: &minijinja::Error) -> anyhow::Error {
    GenError::template(&format!("{err:#}"))
}

/// Render the template file at `template_path`.  Templates can `include` or `extend` siblings in
/// the same directory.
pub fn render_template(template_path: &Path, dataset: &Dataset) -> Result<String> {
    if !template_path.exists() {
        return Err(GenError::missing_file(&template_path.display().to_string()));
    }

    let template_path = template_path.canonicalize()?;
    let (Some(dir), Some(name)) = (template_path.parent(), template_path.file_name().and_then(|n| n.to_str())) else {
        bail!("template path {} has no file name", template_path.display());
    };

    info!("Rendering template {}", template_path.display());
    let mut env = Environment::new();
    env.set_loader(path_loader(dir));
    let template = env.get_template(name).map_err(|e| template_error(&e))?;
    let output = template
        .render(template_context(dataset))
        .map_err(|e| template_error(&e))?;

    debug!("rendered {} bytes", output.len());
    Ok(output)
}

/// Render a template given as a string.
#[cfg(test)]
pub(crate) fn render_str(source: &str, dataset: &Dataset) -> Result<String> {
    let env = Environment::new();
    env.render_str(source, template_context(dataset))
        .map_err(|e| template_error(&e))
}

/// Write `text` to `output`, or to stdout when no path is given.
pub fn write_output(output: Option<&Path>, text: &str) -> EmptyResult {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            info!("Wrote output to {}", path.display());
        },
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        },
    }
    Ok(())
}
