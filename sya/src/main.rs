#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{Diagnostic, IntoDiagnostic};
use thiserror::Error;

use sya::config::{self, ResolvedConfig};
use sya::{compile_kernel, demos, emit_runtime_h, CompileOptions, CATALOG};

#[derive(Debug, Error, Diagnostic)]
#[error("no demo named `{name}`")]
#[diagnostic(code(sya::cli), help("run `sya list` to see the available demos"))]
#[allow(unused_assignments)]
struct UnknownDemo {
    name: String,
}

#[derive(Parser, Debug)]
#[command(name = "sya", version, about = "Trace host functions into guarded C")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` also works.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a `sya.toml`. Defaults to the nearest one above the working directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Name prefix for generated functions. Overrides `sya.toml`.
    #[arg(long, global = true)]
    prefix: Option<String>,

    /// Routine called when a guard fails. Overrides `sya.toml`.
    #[arg(long = "abort-routine", global = true)]
    abort_routine: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List the bundled demo kernels.
    List,

    /// Print the C source generated for a demo kernel.
    Demo {
        name: Option<String>,

        /// Print every demo.
        #[arg(long, conflicts_with = "name")]
        all: bool,
    },

    /// Print the runtime header generated functions include.
    Header,

    /// List the parameter types with their C spelling and value range.
    Types,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn resolve_options(cli: &Cli) -> miette::Result<CompileOptions> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    let resolved: ResolvedConfig = config::load_config(cli.config.as_deref(), &cwd)?;
    if let Some(path) = &resolved.config_path {
        log::debug!("using {}", path.display());
    }
    Ok(resolved
        .override_with(cli.prefix.clone(), cli.abort_routine.clone())
        .options)
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.cmd {
        Cmd::List => {
            for k in demos::DEMOS {
                let params: Vec<String> = k.params().iter().map(|t| t.to_string()).collect();
                println!("{:<16} ({}) -> {}", k.name(), params.join(", "), k.returns());
            }
        }
        Cmd::Demo { name, all } => {
            let options = resolve_options(&cli)?;
            let selected: Vec<_> = match name {
                Some(name) => vec![demos::find(name).ok_or_else(|| UnknownDemo {
                    name: name.clone(),
                })?],
                None if *all => demos::DEMOS.to_vec(),
                None => {
                    return Err(miette::miette!(
                        help = "pass a demo name or `--all`",
                        "nothing to compile"
                    ))
                }
            };
            let mut first = true;
            for k in selected {
                if !first {
                    println!();
                }
                first = false;
                print!("{}", compile_kernel(&options, k)?);
            }
        }
        Cmd::Header => {
            let options = resolve_options(&cli)?;
            print!("{}", emit_runtime_h(&options));
        }
        Cmd::Types => {
            for (name, ty) in CATALOG.iter() {
                let range = ty
                    .representable_range()
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{name:<8} {:<12} {range}", ty.c_name());
            }
        }
    }
    Ok(())
}
