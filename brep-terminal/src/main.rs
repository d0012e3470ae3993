/// BRep Terminal Viewer
///
/// Usage: brep-terminal [--merged | --per-face] [--seed N] [model.json]
///
/// Without a model file the built-in default model is shown.
/// Controls:
///   - WASD: Rotate the model
///   - Z/X: Roll the model
///   - Arrow Keys: Move the model
///   - +/-: Zoom
///   - R: Reset view
///   - C: Change colours
///   - M: Toggle multi-colour mode
///   - 0: Default model
///   - P: Toggle perspective/orthographic
///   - Q/ESC: Quit

use std::io;
use std::process::ExitCode;

use brep_core::{BuildMode, LoaderConfig};
use brep_terminal::{TerminalApp, ViewerConfig};

struct Args {
    loader: LoaderConfig,
    model: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut loader = LoaderConfig::new();
    let mut model = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--merged" => loader = loader.with_mode(BuildMode::Merged),
            "--per-face" => loader = loader.with_mode(BuildMode::PerFace),
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                let seed = value
                    .parse()
                    .map_err(|e| format!("invalid seed {value:?}: {e}"))?;
                loader = loader.with_seed(seed);
            }
            other if other.starts_with("--") => return Err(format!("unknown option {other}")),
            path => model = Some(path.to_string()),
        }
    }

    Ok(Args { loader, model })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brep_terminal=info,brep_core=warn".into()),
        )
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Usage: brep-terminal [--merged | --per-face] [--seed N] [model.json]");
            return ExitCode::FAILURE;
        }
    };

    let mut app = match TerminalApp::new(ViewerConfig::default(), args.loader) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("failed to start terminal: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &args.model {
        println!("Loading model: {path}");
        if let Err(e) = app.viewer_mut().load_file(path) {
            tracing::error!("failed to load model from file {path}: {e}");
            eprintln!("Failed to load model from file: {path}\n{e}");
            return ExitCode::FAILURE;
        }
    }

    if let Err(e) = app.run() {
        tracing::error!("terminal error: {e}");
        return ExitCode::FAILURE;
    }

    println!("Thank you for using the BRep Terminal Viewer!");
    ExitCode::SUCCESS
}
