//! CLI for resolving values against a host fixture.
//!
//! Usage:
//!   value-source --host page.toml                           # every configured value
//!   value-source --host page.toml --config values.toml NAME # selected values
//!   value-source --host page.toml --source document.value --param '"#email"'

use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use value_source::error::ConfigError;
use value_source::host::fixture::HostFixture;
use value_source::host::HostWindow;
use value_source::registry::{SourceGetter, ValueRequest, ValuesConfig};
use value_source::value::Value;

#[derive(Parser, Debug)]
#[command(name = "value-source")]
#[command(about = "Resolve values from named sources against a host snapshot")]
struct Args {
    /// Host fixture (TOML)
    #[arg(long, value_name = "PATH")]
    host: PathBuf,

    /// Values configuration (TOML)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Source path for an inline request; repeat to add fallbacks
    #[arg(short, long = "source", value_name = "PATH")]
    sources: Vec<String>,

    /// Parameter for the inline request, as a TOML literal or a bare string
    #[arg(short, long = "param", value_name = "VALUE")]
    params: Vec<String>,

    /// Default for the inline request
    #[arg(short, long, value_name = "VALUE")]
    default: Option<String>,

    /// Configured values to resolve (all when omitted)
    names: Vec<String>,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(lines) => {
            for (name, value) in lines {
                println!("{} = {}", name, value.to_json());
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<Vec<(String, Value)>, ConfigError> {
    let host = HostFixture::load(&args.host)?.build()?;
    info!(path = %args.host.display(), url = %host.window.location(), "host fixture loaded");

    let mut getter = SourceGetter::with_builtins(host.window.as_window());

    let config = match &args.config {
        Some(path) => ValuesConfig::load(path)?,
        None => ValuesConfig::new(),
    };
    getter.apply_config(&config);
    if !config.sources.disabled.is_empty() {
        info!(disabled = ?config.sources.disabled, "sources removed");
    }

    let mut lines = Vec::new();

    if !args.sources.is_empty() {
        let mut request = ValueRequest::new(args.sources.clone())
            .with_parameters(args.params.iter().map(|p| parse_literal(p)).collect::<Vec<_>>());
        if let Some(default) = &args.default {
            request = request.with_default(parse_literal(default));
        }
        lines.push((args.sources.join("|"), getter.get_value(&request)));
    }

    let names: Vec<String> = if args.names.is_empty() && args.sources.is_empty() {
        config.names().cloned().collect()
    } else {
        args.names.clone()
    };
    for name in names {
        let value = getter
            .get_named_value(&config, &name)
            .ok_or_else(|| ConfigError::UnknownValue(name.clone()))?;
        lines.push((name, value));
    }

    Ok(lines)
}

/// `42`, `true`, `"quoted"`, `[1, 2]` parse as TOML; anything else is taken
/// as a plain string.
fn parse_literal(text: &str) -> Value {
    match toml::from_str::<toml::Table>(&format!("v = {}", text)) {
        Ok(mut table) => table.remove("v").map_or(Value::Undefined, Value::from),
        Err(_) => Value::from(text),
    }
}
