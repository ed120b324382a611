use glyphnet::model::Network;
use glyphnet::render::render_svg;
use glyphnet::{EscherExporter, EscherMap, import_map};
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Core(glyphnet::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<glyphnet::Error> for CliError {
    fn from(value: glyphnet::Error) -> Self {
        Self::Core(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Import,
    Export,
    Roundtrip,
    Render,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    with_diagnostics: bool,
    out: Option<String>,
}

fn usage() -> &'static str {
    "glyphnet-cli\n\
\n\
USAGE:\n\
  glyphnet-cli import [--pretty] [--diagnostics] [<path>|-]\n\
  glyphnet-cli export [--out <path>] [<path>|-]\n\
  glyphnet-cli roundtrip [<path>|-]\n\
  glyphnet-cli render [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - import reads an Escher map and prints the canonical network JSON;\n\
    --diagnostics wraps the output with the list of skipped items.\n\
  - export reads canonical network JSON and prints an Escher map;\n\
    --out writes a file instead (a .json suffix is appended if missing).\n\
  - roundtrip reads an Escher map and prints it re-exported (normalized).\n\
  - render reads an Escher map and prints an SVG document.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut command_seen = false;
    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "import" if !command_seen => {
                args.command = Command::Import;
                command_seen = true;
            }
            "export" if !command_seen => {
                args.command = Command::Export;
                command_seen = true;
            }
            "roundtrip" if !command_seen => {
                args.command = Command::Roundtrip;
                command_seen = true;
            }
            "render" if !command_seen => {
                args.command = Command::Render;
                command_seen = true;
            }
            "--pretty" => args.pretty = true,
            "--diagnostics" => args.with_diagnostics = true,
            "--out" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(path.clone());
            }
            other => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(other.to_string());
            }
        }
    }
    if !command_seen && args.input.is_none() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn run(argv: &[String]) -> Result<(), CliError> {
    let args = parse_args(argv)?;
    let text = read_input(args.input.as_deref())?;
    match args.command {
        Command::Import => {
            let import = glyphnet::import_json_str(&text)?;
            let value = if args.with_diagnostics {
                serde_json::json!({
                    "network": import.network,
                    "diagnostics": import.diagnostics,
                })
            } else {
                serde_json::to_value(&import.network)?
            };
            let rendered = if args.pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            println!("{rendered}");
        }
        Command::Export => {
            let network: Network = serde_json::from_str(&text)?;
            let map = EscherExporter::export_network(&network);
            match args.out.as_deref() {
                Some(path) => map.write_json_file(path)?,
                None => println!("{}", map.to_json_string()?),
            }
        }
        Command::Roundtrip => {
            let map = EscherMap::from_json_str(&text)?;
            let network = import_map(&map).network;
            let out = EscherExporter::export_network(&network);
            println!("{}", out.to_json_string()?);
        }
        Command::Render => {
            let import = glyphnet::import_json_str(&text)?;
            let svg = render_svg(&import.network);
            match args.out.as_deref() {
                Some(path) => std::fs::write(path, &svg)?,
                None => print!("{svg}"),
            }
        }
    }
    Ok(())
}

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    match run(&argv) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
