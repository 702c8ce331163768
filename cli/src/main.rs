//! Relay CLI binary: replay recorded agent runs and call the investigation tools.
//!
//! Subcommands: `replay` (predict or NDJSON stream), `tool` (list/show/call), `settings`.

mod log_format;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cli::{format_item, CliError, ReplayOptions, ToolShowFormat};

#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(about = "Relay: de-duplicated Responses output from agent graph runs")]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// Verbose: debug logs from the relay (node markers, echo handling) on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// When using --json, pretty-print (multi-line). Default: compact
    #[arg(long, global = true)]
    pretty: bool,

    /// Directory holding the project `.env` (default: current directory)
    #[arg(long, value_name = "DIR", global = true)]
    env_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded transcript through predict (or predict_stream with --stream)
    Replay(ReplayArgs),
    /// List, show or call the built-in tools
    Tool(ToolArgs),
    /// Show resolved deployment settings
    Settings,
}

#[derive(clap::Args, Debug)]
struct ReplayArgs {
    /// Transcript JSON file (input, custom_inputs, echo_input, batches)
    transcript: PathBuf,
    /// Stream events as NDJSON (one event per line, with response_id and sequence_number)
    #[arg(long)]
    stream: bool,
    /// Extra user message appended to the transcript input
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,
    /// JSON object passed through as custom_inputs / custom_outputs
    #[arg(long, value_name = "JSON")]
    custom_inputs: Option<String>,
    /// Response id stamped on streamed events
    #[arg(long, value_name = "ID")]
    response_id: Option<String>,
    /// Max chars of tool payloads in text output; 0 means no truncation
    #[arg(long, default_value_t = 200, env = "RELAY_MAX_DISPLAY_LEN")]
    max_len: usize,
}

#[derive(clap::Args, Debug)]
struct ToolArgs {
    #[command(subcommand)]
    sub: ToolCommand,
}

#[derive(Subcommand, Debug)]
enum ToolCommand {
    /// List all tools (name and description)
    List,
    /// Show full definition of one tool (name, description, input_schema)
    Show(ShowToolArgs),
    /// Call a tool with JSON arguments and print its result
    Call(CallToolArgs),
}

#[derive(clap::Args, Debug)]
struct ShowToolArgs {
    /// Tool name (e.g. check_ip_reputation)
    name: String,
    /// Output format: yaml (default) or json
    #[arg(long, value_name = "FORMAT", default_value = "yaml")]
    output: String,
}

#[derive(clap::Args, Debug)]
struct CallToolArgs {
    /// Tool name
    name: String,
    /// Arguments as a JSON object, e.g. '{"ip":"8.8.8.8"}'
    #[arg(long, value_name = "JSON", default_value = "{}")]
    args: String,
}

/// Writes one JSON value to stdout, compact or pretty.
fn print_json(value: &impl serde::Serialize, pretty: bool) -> Result<(), CliError> {
    let s = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", s);
    std::io::Write::flush(&mut std::io::stdout())?;
    Ok(())
}

async fn run(args: Args) -> Result<(), CliError> {
    match args.cmd {
        Command::Replay(r) => {
            let opts = ReplayOptions {
                transcript: r.transcript,
                message: r.message,
                custom_inputs: r.custom_inputs,
                response_id: r.response_id,
            };
            if r.stream {
                let pretty = args.pretty;
                let count = cli::replay_events(&opts, |event| print_json(&event, pretty)).await?;
                tracing::debug!(count, "events streamed");
            } else {
                let response = cli::replay(&opts).await?;
                if args.json {
                    print_json(&response, args.pretty)?;
                } else {
                    for item in &response.output {
                        println!("{}", format_item(item, r.max_len));
                    }
                }
            }
        }
        Command::Tool(t) => match t.sub {
            ToolCommand::List => {
                let tools = cli::list_tools().await?;
                if args.json {
                    print_json(&tools, args.pretty)?;
                } else {
                    for tool in tools {
                        println!("{}: {}", tool.name, tool.description.unwrap_or_default());
                    }
                }
            }
            ToolCommand::Show(s) => {
                let format = if args.json || s.output.eq_ignore_ascii_case("json") {
                    ToolShowFormat::Json
                } else {
                    ToolShowFormat::Yaml
                };
                let text = cli::show_tool(&s.name, format).await?;
                println!("{}", text.trim_end());
            }
            ToolCommand::Call(c) => {
                println!("{}", cli::call_tool(&c.name, &c.args).await?);
            }
        },
        Command::Settings => {
            let settings = config::load_settings(args.env_dir.as_deref())?;
            if args.json {
                print_json(&settings, args.pretty)?;
            } else {
                for line in cli::settings_lines(&settings) {
                    println!("{}", line);
                }
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    if let Err(e) = config::load_and_apply(config::APP_NAME, args.env_dir.as_deref()) {
        eprintln!("relay: config: {}", e);
    }
    logging::init(args.verbose)?;

    if let Err(e) = run(args).await {
        eprintln!("relay: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
