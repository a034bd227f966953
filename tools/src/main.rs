use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use pbemit_tools::{
    encode_json, format_hex, signed_varint_bytes, tag_bytes, varint_bytes, EncodeLimits,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pbemit",
    version,
    about = "Protocol Buffers wire-format encoding tools"
)]
struct Cli {
    /// Log more (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a JSON message description.
    Encode {
        /// Path to the message description JSON.
        message: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Hex)]
        format: OutputFormat,
        /// Write output to a file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Maximum submessage nesting depth.
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// Show the varint bytes of a value.
    Varint {
        /// Integer value.
        #[arg(allow_negative_numbers = true)]
        value: String,
        /// ZigZag-encode the value first (sint32/sint64).
        #[arg(long)]
        signed: bool,
    },
    /// Show the tag bytes for a field number and wire type.
    Tag {
        /// Field number.
        #[arg(allow_negative_numbers = true)]
        field: i64,
        /// Wire type (0 VARINT, 1 I64, 2 LEN, 5 I32).
        wire_type: u8,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Hex,
    Binary,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Encode {
            message,
            format,
            out,
            max_depth,
        } => {
            let mut limits = EncodeLimits::default();
            if let Some(max_depth) = max_depth {
                limits.max_depth = max_depth;
            }
            let text = fs::read_to_string(&message)
                .with_context(|| format!("read message {}", message.display()))?;
            debug!(path = %message.display(), len = text.len(), "read message description");

            let bytes = encode_json(&text, &limits)
                .with_context(|| format!("encode message {}", message.display()))?;
            info!(len = bytes.len(), "encoded message");

            let output = match format {
                OutputFormat::Hex => format!("{}\n", format_hex(&bytes)).into_bytes(),
                OutputFormat::Binary => bytes,
            };
            write_output(out.as_deref(), &output)?;
        }
        Command::Varint { value, signed } => {
            let bytes = if signed {
                let value: i64 = value
                    .parse()
                    .with_context(|| format!("parse signed value {value}"))?;
                signed_varint_bytes(value)
            } else {
                let value: u64 = value
                    .parse()
                    .with_context(|| format!("parse unsigned value {value}"))?;
                varint_bytes(value)
            };
            println!("{} ({} bytes)", format_hex(&bytes), bytes.len());
        }
        Command::Tag { field, wire_type } => {
            let bytes = tag_bytes(field, wire_type).context("encode tag")?;
            println!("{} ({} bytes)", format_hex(&bytes), bytes.len());
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, bytes).with_context(|| format!("write output {}", path.display()))?;
            debug!(path = %path.display(), "wrote output");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes).context("write stdout")?;
            stdout.flush().context("flush stdout")?;
        }
    }
    Ok(())
}
