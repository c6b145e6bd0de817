//! # Chequeprint CLI
//!
//! Command-line interface for cheque layout and printing.
//!
//! ## Usage
//!
//! ```bash
//! # List available templates
//! chequeprint templates
//!
//! # Write a print document for a template
//! chequeprint print --bank AAIB --model Standard --details details.json --out cheque.html
//!
//! # Same, on A4, opened in the browser's print dialog
//! chequeprint print --bank AAIB --model Standard --set check-no=123456 --crossed --a4 --open
//!
//! # Box outline preview
//! chequeprint preview --bank CIB --model Standard --png cib.png
//!
//! # Preferences
//! chequeprint prefs font-size check-amount 0.2
//! chequeprint prefs a4 on
//!
//! # Web UI
//! chequeprint serve --listen 0.0.0.0:8080
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use chequeprint::{
    ChequeError, ChequeField,
    format::{ChequeDetails, FieldFormatter},
    layout::{LayoutConfig, PrintMode},
    prefs::{DEFAULT_PREFS_FILE, JsonFileRepository, PreferenceRepository, PreferenceSession},
    preview,
    print::{FileSurfaceProvider, PrintComposer, PrintOutcome, PrintSession},
    server::{self, ServerConfig},
    template::TemplateStore,
};

/// Chequeprint - position and print cheque fields
#[derive(Parser, Debug)]
#[command(name = "chequeprint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Extra templates (JSON array); entries with a built-in key replace it
    #[arg(long, global = true, value_name = "FILE")]
    templates: Option<PathBuf>,

    /// Preferences file
    #[arg(long, global = true, value_name = "FILE")]
    prefs: Option<PathBuf>,

    /// Delimiter printed around amounts
    #[arg(long, global = true, default_value = "#")]
    currency_glyph: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available templates
    Templates,

    /// Compose a print document
    Print {
        /// Bank id (default: first template)
        #[arg(long, requires = "model")]
        bank: Option<String>,

        #[arg(long, requires = "bank")]
        model: Option<String>,

        /// Cheque details as a JSON object of label -> value
        #[arg(long, value_name = "FILE")]
        details: Option<PathBuf>,

        /// Set a single field (repeatable), e.g. --set check-no=123456
        #[arg(long = "set", value_name = "LABEL=VALUE")]
        set: Vec<String>,

        /// Print the crossing mark
        #[arg(long)]
        crossed: bool,

        /// Force A4 layout (default: stored preference)
        #[arg(long, conflicts_with = "native")]
        a4: bool,

        /// Force native cheque-size layout
        #[arg(long)]
        native: bool,

        /// Output HTML file
        #[arg(long, default_value = "cheque-print.html")]
        out: PathBuf,

        /// Open the document in the system browser to print it
        #[arg(long)]
        open: bool,
    },

    /// Render box outlines of a template as PNG
    Preview {
        #[arg(long, requires = "model")]
        bank: Option<String>,

        #[arg(long, requires = "bank")]
        model: Option<String>,

        #[arg(long, value_name = "FILE")]
        png: PathBuf,
    },

    /// Show or change stored preferences
    Prefs {
        #[command(subcommand)]
        action: Option<PrefsAction>,
    },

    /// Run the web UI
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: String,
    },
}

#[derive(Subcommand, Debug)]
enum PrefsAction {
    /// Adjust a field's font multiplier by STEP (clamped to 0.5..=3.0)
    FontSize {
        field: String,
        #[arg(allow_hyphen_values = true)]
        step: f64,
    },
    /// Set the A4 toggle
    A4 { value: Toggle },
    /// Restore defaults
    Reset,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ChequeError> {
    let cli = Cli::parse();

    let mut store = TemplateStore::builtin();
    if let Some(path) = &cli.templates {
        store.extend(TemplateStore::load_file(path)?);
    }
    let composer = PrintComposer::new(
        LayoutConfig::default(),
        FieldFormatter::with_currency_glyph(cli.currency_glyph.clone()),
    );
    let prefs_path = cli
        .prefs
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFS_FILE));

    match cli.command {
        Commands::Templates => {
            let default_key = store.default_key();
            for (bank, model) in store.list_available() {
                let template = store.lookup(&bank, &model)?;
                let marker = if default_key.as_ref() == Some(&(bank.clone(), model.clone())) {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{} {}/{}  {}x{} px -> {}x{} mm, {} boxes",
                    marker,
                    bank,
                    model,
                    template.image_width,
                    template.image_height,
                    template.print_width,
                    template.print_height,
                    template.boxes.len()
                );
            }
        }

        Commands::Print {
            bank,
            model,
            details,
            set,
            crossed,
            a4,
            native,
            out,
            open,
        } => {
            let (bank, model) = resolve_key(&store, bank, model)?;
            let details = load_details(details, &set, crossed)?;

            let mut prefs = JsonFileRepository::new(&prefs_path).load();
            if a4 || native {
                prefs.print_on_a4 = a4;
            }
            let mode = PrintMode::from_a4_flag(prefs.print_on_a4);

            let mut provider = FileSurfaceProvider::new(&out).launch_browser(open);
            let mut session = PrintSession::new(composer);
            match session.request_print(&mut provider, &store, &bank, &model, &details, &prefs)? {
                PrintOutcome::Accepted => {
                    println!("Wrote {:?} print document to {}", mode, out.display())
                }
                PrintOutcome::Cancelled => println!("Print cancelled"),
            }
        }

        Commands::Preview { bank, model, png } => {
            let (bank, model) = resolve_key(&store, bank, model)?;
            let template = store.lookup(&bank, &model)?;
            let bytes = preview::render_outline_png(template)?;
            std::fs::write(&png, bytes)?;
            println!("Saved to {}", png.display());
        }

        Commands::Prefs { action } => {
            let mut session = PreferenceSession::open(Box::new(JsonFileRepository::new(&prefs_path)));
            match action {
                None => {}
                Some(PrefsAction::FontSize { field, step }) => {
                    let field: ChequeField = field.parse()?;
                    let value = session.adjust_font_size(field, step)?;
                    println!("{} multiplier: {:.2}", field, value);
                }
                Some(PrefsAction::A4 { value }) => {
                    session.set_print_on_a4(matches!(value, Toggle::On))?;
                }
                Some(PrefsAction::Reset) => session.reset()?,
            }

            let current = session.current();
            println!("Preferences ({}):", prefs_path.display());
            println!("  printOnA4: {}", current.print_on_a4);
            for field in ChequeField::ALL {
                println!("  {:<20} {:.2}", field.as_str(), current.font_multipliers.get(field));
            }
        }

        Commands::Serve { listen } => {
            let config = ServerConfig {
                listen_addr: listen,
                prefs_path: Some(prefs_path),
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config, store, composer))?;
        }
    }

    Ok(())
}

/// Use the given key, or the store's default selection when both are omitted.
///
/// clap only accepts `--bank` and `--model` together.
fn resolve_key(
    store: &TemplateStore,
    bank: Option<String>,
    model: Option<String>,
) -> Result<(String, String), ChequeError> {
    match bank.zip(model) {
        Some(key) => Ok(key),
        None => store
            .default_key()
            .ok_or_else(|| ChequeError::template_not_found("<default>", "<default>")),
    }
}

/// Merge a details file, `--set` overrides and the crossing flag.
fn load_details(
    path: Option<PathBuf>,
    set: &[String],
    crossed: bool,
) -> Result<ChequeDetails, ChequeError> {
    let mut details = match path {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => ChequeDetails::new(),
    };

    for assignment in set {
        let (label, value) = assignment
            .split_once('=')
            .ok_or_else(|| ChequeError::UnknownField(assignment.clone()))?;
        let field: ChequeField = label.parse()?;
        details.set(field, value);
    }

    if crossed {
        details.set_crossing(true);
    }
    Ok(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_bank_without_model_is_a_usage_error() {
        let err = Cli::try_parse_from(["chequeprint", "print", "--bank", "AAIB"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = Cli::try_parse_from(["chequeprint", "preview", "--model", "Standard", "--png", "x.png"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_key_defaults_to_first_template() {
        let cli = Cli::try_parse_from(["chequeprint", "print"]).unwrap();
        let Commands::Print { bank, model, .. } = cli.command else {
            panic!("expected print command");
        };
        let key = resolve_key(&TemplateStore::builtin(), bank, model).unwrap();
        assert_eq!(key, ("AAIB".to_string(), "Standard".to_string()));
    }

    #[test]
    fn test_explicit_key_is_kept() {
        let cli = Cli::try_parse_from(["chequeprint", "print", "--bank", "CIB", "--model", "Standard"])
            .unwrap();
        let Commands::Print { bank, model, .. } = cli.command else {
            panic!("expected print command");
        };
        let key = resolve_key(&TemplateStore::builtin(), bank, model).unwrap();
        assert_eq!(key, ("CIB".to_string(), "Standard".to_string()));
    }
}
