use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use multifield::{
    DocumentFormat, FieldValidator, MultiField, NumericValidator, RequestContext, WidgetDocument,
    parse_document_str,
};

#[derive(Debug, Parser)]
#[command(
    name = "multifield",
    version,
    about = "Render multifield widgets and decode their submissions"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the HTML and configuration script of a widget document
    Render {
        /// Widget spec: file path, inline JSON, or "-" for stdin
        #[arg(short = 'w', long = "widget", value_name = "SPEC")]
        widget: String,
    },
    /// Decode the rows a browser posted for a widget document
    Decode {
        /// Widget spec: file path, inline JSON, or "-" for stdin
        #[arg(short = 'w', long = "widget", value_name = "SPEC")]
        widget: String,

        /// application/x-www-form-urlencoded request body
        #[arg(short = 'b', long = "body", value_name = "BODY")]
        body: String,

        /// Emit compact JSON rather than pretty formatting
        #[arg(long = "no-pretty")]
        no_pretty: bool,
    },
    /// Check that a value is numeric
    CheckNumeric {
        /// Field label used in the error message
        #[arg(short = 'l', long = "label", default_value = "value")]
        label: String,

        value: String,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Render { widget } => {
            let mut widget = build_widget(&widget)?;
            let html = widget.render().wrap_err("failed to render widget")?;
            write_stdout(&html)
        }
        Command::Decode {
            widget,
            body,
            no_pretty,
        } => {
            let widget = build_widget(&widget)?;
            let request = RequestContext::from_urlencoded(&body);
            let rows: Vec<Value> = widget
                .post_data(&request)
                .iter()
                .map(|row| row.to_value())
                .collect();
            debug!(rows = rows.len(), "decoded submission");
            let payload = if no_pretty {
                serde_json::to_string(&rows)?
            } else {
                serde_json::to_string_pretty(&rows)?
            };
            write_stdout(&payload)
        }
        Command::CheckNumeric { label, value } => {
            NumericValidator::new()
                .validate(&label, &Value::String(value))
                .map_err(|err| eyre!(err))?;
            write_stdout("ok")
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_widget(spec: &str) -> Result<MultiField> {
    let value = load_value(spec)?;
    WidgetDocument::from_value(value)
        .and_then(|document| document.build())
        .map_err(|err| eyre!("{err:#}"))
}

fn load_value(spec: &str) -> Result<Value> {
    if spec == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .wrap_err("failed to read from stdin")?;
        return parse(&buffer, DocumentFormat::Json, "stdin");
    }

    let path = Path::new(spec);
    if path.is_file() {
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        return parse(&contents, DocumentFormat::from_path(path), spec);
    }
    parse(spec, DocumentFormat::Json, "inline widget")
}

fn parse(contents: &str, format: DocumentFormat, label: &str) -> Result<Value> {
    parse_document_str(contents, format).map_err(|err| eyre!("{label}: {err:#}"))
}

fn write_stdout(payload: &str) -> Result<()> {
    let mut stdout = io::stdout();
    stdout
        .write_all(payload.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
        .wrap_err("failed to write to stdout")
}
