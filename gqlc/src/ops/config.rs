//! Generator configuration from `gqlc.toml` and command-line flags.

use std::path::Path;

use eyre::{Context, Result, bail};
use gqlc_codegen::{GeneratorConfiguration, GeneratorOptions};

/// Options file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "gqlc.toml";

/// Read generator options from `explicit`, or from `gqlc.toml` in `dir`.
///
/// An explicit path must exist; a missing default file yields empty options.
pub fn load_options(explicit: Option<&Path>, dir: &Path) -> Result<GeneratorOptions> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = dir.join(DEFAULT_CONFIG_FILE);
            if !default.is_file() {
                return Ok(GeneratorOptions::default());
            }
            default
        }
    };

    tracing::debug!(path = %path.display(), "reading generator options");
    let content = std::fs::read_to_string(&path)
        .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
    GeneratorOptions::from_toml_str(&content)
        .wrap_err_with(|| format!("invalid options in '{}'", path.display()))
}

/// Layer command-line `overrides` over file options and validate the result.
pub fn resolve_configuration(
    file: GeneratorOptions,
    overrides: GeneratorOptions,
    require_namespace: bool,
) -> Result<GeneratorConfiguration> {
    let options = file.merge(overrides);
    if require_namespace && options.namespace.is_none() {
        bail!("a namespace is required: pass --namespace or set `namespace` in {DEFAULT_CONFIG_FILE}");
    }
    options
        .build()
        .wrap_err("invalid generator configuration")
}
