use futures::executor::block_on;
use sketchflow::{generate, GenerateOptions};
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Sketchflow(sketchflow::Error),
    /// Pre-formatted multi-line report (`--pretty-errors`).
    Report(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Sketchflow(err) => write!(f, "{err}"),
            CliError::Report(report) => write!(f, "{report}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<sketchflow::Error> for CliError {
    fn from(value: sketchflow::Error) -> Self {
        Self::Sketchflow(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Check,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    png: bool,
    scale: f32,
    out: Option<String>,
    pretty_errors: bool,
}

fn usage() -> &'static str {
    "sketchflow-cli\n\
\n\
USAGE:\n\
  sketchflow-cli [render] [--png] [--scale <n>] [--out <path>] [--pretty-errors] [<path>|-]\n\
  sketchflow-cli check [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the JSON diagram definition is read from stdin.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - --png writes PNG bytes (requires --out, or derives <input>.png).\n\
  - --pretty-errors reports generation failures as a multi-line block instead of one line.\n\
  - check validates the input against the schema and prints OK.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        scale: 2.0,
        ..Args::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "check" => args.command = Command::Check,
            "--png" => args.png = true,
            "--pretty-errors" => args.pretty_errors = true,
            "--scale" => {
                let Some(value) = it.next() else {
                    return Err(CliError::Usage("--scale requires a value"));
                };
                args.scale = value
                    .parse::<f32>()
                    .ok()
                    .filter(|s| s.is_finite() && *s > 0.0)
                    .ok_or(CliError::Usage("--scale must be a positive number"))?;
            }
            "--out" => {
                let Some(value) = it.next() else {
                    return Err(CliError::Usage("--out requires a value"));
                };
                args.out = Some(value.clone());
            }
            other if other.starts_with("--") => {
                return Err(CliError::Usage("unknown flag (see --help)"));
            }
            _ => {
                if args.input.is_some() {
                    return Err(CliError::Usage("multiple input paths given"));
                }
                args.input = Some(arg.clone());
            }
        }
    }

    Ok(args)
}

fn read_input(path: Option<&str>) -> Result<String, CliError> {
    match path {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn derived_png_path(input: Option<&str>) -> String {
    match input {
        None | Some("-") => "out.png".to_string(),
        Some(path) => {
            let mut p = std::path::PathBuf::from(path);
            p.set_extension("png");
            p.to_string_lossy().into_owned()
        }
    }
}

fn pretty_error(err: &sketchflow::Error) -> String {
    match err {
        sketchflow::Error::Schema(schema) => format!(
            "error: invalid diagram definition\n  at: {}\n  reason: {}",
            schema.path(),
            schema.message(),
        ),
        other => format!("error: diagram generation failed\n  reason: {other}"),
    }
}

fn run(argv: &[String]) -> Result<(), CliError> {
    let args = parse_args(argv)?;
    let text = read_input(args.input.as_deref())?;
    let value: serde_json::Value = serde_json::from_str(&text)?;

    match args.command {
        Command::Check => {
            sketchflow::parse(&value).map_err(sketchflow::Error::from)?;
            println!("OK");
            Ok(())
        }
        Command::Render => {
            let options = GenerateOptions {
                png: args.png,
                scale: args.scale,
            };
            let generated = match block_on(generate(&value, &options)) {
                Ok(generated) => generated,
                Err(err) if args.pretty_errors => {
                    return Err(CliError::Report(pretty_error(&err)));
                }
                Err(err) => return Err(err.into()),
            };

            if let Some(png) = generated.png {
                let out = args
                    .out
                    .unwrap_or_else(|| derived_png_path(args.input.as_deref()));
                std::fs::write(&out, png)?;
                eprintln!("wrote {out}");
                return Ok(());
            }

            match args.out {
                Some(out) => {
                    std::fs::write(&out, generated.svg)?;
                    eprintln!("wrote {out}");
                }
                None => println!("{}", generated.svg),
            }
            Ok(())
        }
    }
}

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    if let Err(err) = run(&argv) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
