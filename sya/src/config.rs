#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

use crate::CompileOptions;

pub const CONFIG_FILE: &str = "sya.toml";

#[derive(Debug, Error, Diagnostic)]
#[error("config error: {message}")]
#[diagnostic(code(sya::config))]
#[allow(unused_assignments)]
pub struct ConfigError {
    pub message: String,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    codegen: Codegen,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Codegen {
    #[serde(default)]
    prefix: Option<String>,

    #[serde(default)]
    abort_routine: Option<String>,
}

/// Options after layering defaults, `sya.toml` and command-line overrides.
#[derive(Clone, Debug, Default)]
pub struct ResolvedConfig {
    pub config_path: Option<PathBuf>,
    pub options: CompileOptions,
}

impl ResolvedConfig {
    /// Command-line values win over the file.
    pub fn override_with(mut self, prefix: Option<String>, abort_routine: Option<String>) -> Self {
        if let Some(p) = prefix {
            self.options.prefix = p;
        }
        if let Some(a) = abort_routine {
            self.options.abort_routine = a;
        }
        self
    }
}

/// Walk up from `start` looking for `sya.toml`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut cur = if start.is_file() {
        start.parent()?.to_path_buf()
    } else {
        start.to_path_buf()
    };

    loop {
        let candidate = cur.join(CONFIG_FILE);
        if candidate.exists() {
            return Some(candidate);
        }
        cur = cur.parent()?.to_path_buf();
    }
}

pub fn parse_config(raw: &str) -> Result<CompileOptions, ConfigError> {
    let parsed: ConfigFile = toml::from_str(raw).map_err(|e| ConfigError {
        message: e.to_string(),
    })?;

    let mut options = CompileOptions::default();
    if let Some(prefix) = parsed.codegen.prefix {
        options.prefix = prefix;
    }
    if let Some(abort) = parsed.codegen.abort_routine {
        if abort.is_empty() {
            return Err(ConfigError {
                message: "`codegen.abort_routine` must not be empty".to_string(),
            });
        }
        options.abort_routine = abort;
    }
    Ok(options)
}

/// Load `explicit` if given, otherwise the nearest `sya.toml` above `start`.
/// No file at all means default options.
pub fn load_config(explicit: Option<&Path>, start: &Path) -> Result<ResolvedConfig, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match find_config(start) {
            Some(p) => p,
            None => return Ok(ResolvedConfig::default()),
        },
    };
    log::debug!("reading {}", path.display());

    let raw = fs::read_to_string(&path).map_err(|e| ConfigError {
        message: format!("failed to read {}: {e}", path.display()),
    })?;
    let options = parse_config(&raw).map_err(|e| ConfigError {
        message: format!("failed to parse {}: {}", path.display(), e.message),
    })?;

    Ok(ResolvedConfig {
        config_path: Some(path),
        options,
    })
}
