use pinlay::geom::size;
use pinlay::{
    JsonIngredient, MixedBoxPolicy, PinLayoutConfig, Size, VerticalAnchor, generate_layout,
    layout_pass, overlay_items,
};
use serde::Serialize;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Pinlay(pinlay::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Pinlay(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<pinlay::Error> for CliError {
    fn from(value: pinlay::Error) -> Self {
        Self::Pinlay(value)
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
    Project,
    Layout,
    Overlay,
}

/// `<w>x<h>` in pixels, e.g. `1024x768`.
#[derive(Debug, Clone, Copy)]
struct SizeArg(Size);

impl FromStr for SizeArg {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or(())?;
        let w = w.trim().parse::<f64>().map_err(|_| ())?;
        let h = h.trim().parse::<f64>().map_err(|_| ())?;
        if w.is_finite() && h.is_finite() {
            Ok(Self(size(w, h)))
        } else {
            Err(())
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    image: Option<Size>,
    container: Option<Size>,
    config: Option<String>,
    policy: Option<MixedBoxPolicy>,
    anchor: Option<VerticalAnchor>,
    hide_pins: bool,
    version: bool,
}

const DEFAULT_CONTAINER: (f64, f64) = (390.0, 506.0);

fn usage() -> &'static str {
    "pinlay-cli\n\
\n\
USAGE:\n\
  pinlay-cli --version\n\
  pinlay-cli [project] [--pretty] [--image <w>x<h>] [--container <w>x<h>] [--config <path>] [--policy all-or-nothing|layout-missing] [--anchor top|center] [--hide-pins] [<path>|-]\n\
  pinlay-cli layout [--pretty] [--config <path>] [<path>|-]\n\
  pinlay-cli overlay [--pretty] --image <w>x<h> [<path>|-]\n\
\n\
NOTES:\n\
  - Input is a JSON array of ingredient objects; `bbox`/`box_2d` are [ymin, xmin, ymax, xmax] on a 0-1000 scale.\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - project prints pins in container percent plus the image layout style.\n\
  - layout prints generated positions, ignoring any detection boxes.\n\
  - The container defaults to 390x506 pixels.\n\
  - Set RUST_LOG (e.g. RUST_LOG=pinlay=debug) for diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--version" | "-V" => {
                args.version = true;
                return Ok(args);
            }
            "project" => args.command = Command::Project,
            "layout" => args.command = Command::Layout,
            "overlay" => args.command = Command::Overlay,
            "--pretty" => args.pretty = true,
            "--hide-pins" => args.hide_pins = true,
            "--image" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let SizeArg(s) = v.parse::<SizeArg>().map_err(|_| CliError::Usage(usage()))?;
                args.image = Some(s);
            }
            "--container" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let SizeArg(s) = v.parse::<SizeArg>().map_err(|_| CliError::Usage(usage()))?;
                args.container = Some(s);
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--policy" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.policy = Some(match v.as_str() {
                    "all-or-nothing" => MixedBoxPolicy::AllOrNothing,
                    "layout-missing" => MixedBoxPolicy::LayoutMissing,
                    _ => return Err(CliError::Usage(usage())),
                });
            }
            "--anchor" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.anchor = Some(match v.as_str() {
                    "top" => VerticalAnchor::Top,
                    "center" => VerticalAnchor::Center,
                    _ => return Err(CliError::Usage(usage())),
                });
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if matches!(args.command, Command::Overlay) && args.image.is_none() {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn load_config(args: &Args) -> Result<PinLayoutConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => {
            tracing::debug!(path, "loading config");
            PinLayoutConfig::from_json_str(&std::fs::read_to_string(path)?)?
        }
        None => PinLayoutConfig::default(),
    };
    if let Some(policy) = args.policy {
        config.projector.mixed_box_policy = policy;
    }
    if let Some(anchor) = args.anchor {
        config.projector.vertical_anchor = anchor;
    }
    Ok(config)
}

fn run(args: Args) -> Result<(), CliError> {
    if args.version {
        println!("pinlay-cli {}", pinlay::VERSION);
        return Ok(());
    }

    let config = load_config(&args)?;
    let text = read_input(args.input.as_deref())?;
    let ingredients: Vec<JsonIngredient> = pinlay::ingredients_from_json_str(&text)?;
    tracing::info!(count = ingredients.len(), "read ingredients");

    match args.command {
        Command::Project => {
            let container = args
                .container
                .unwrap_or_else(|| size(DEFAULT_CONTAINER.0, DEFAULT_CONTAINER.1));
            if args.image.is_none() {
                tracing::warn!("no --image size given, display coordinates equal image percent");
            }
            let pass = layout_pass(
                Some(ingredients),
                args.image,
                container,
                &config,
                !args.hide_pins,
            );
            write_json(&pass, args.pretty)
        }
        Command::Layout => {
            let pins = generate_layout(ingredients, &config.projector.generator);
            write_json(&pins, args.pretty)
        }
        Command::Overlay => {
            let Some(image) = args.image else {
                return Err(CliError::Usage(usage()));
            };
            write_json(&overlay_items(&ingredients, image), args.pretty)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
