use intersight_core::{Context, Error, Result};
use log::debug;

const PEM_PREFIX: &str = "-----BEGIN";

/// Resolve the configured private key into PEM content.
///
/// The value is used verbatim when it already is PEM, otherwise it is a path
/// (`~` expanded) read through the context.
pub async fn load_private_key(ctx: &Context, value: &str) -> Result<String> {
    if value.trim_start().starts_with(PEM_PREFIX) {
        return Ok(value.to_string());
    }

    let path = ctx
        .expand_home_dir(value)
        .ok_or_else(|| Error::config_invalid("failed to expand home directory"))?;
    debug!("loading private key from {path}");

    let content = ctx.file_read_as_string(&path).await.map_err(|e| {
        Error::config_invalid("failed to read private key file")
            .with_context("path", &path)
            .with_source(e)
    })?;
    if !content.trim_start().starts_with(PEM_PREFIX) {
        return Err(Error::credential_invalid("private key file is not PEM encoded")
            .with_context("path", &path));
    }

    Ok(content)
}
