use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use weaver_richtext::{EditorConfig, FileStore, FormatCommand, Point, RichTextEditor, Selection};

#[derive(Parser)]
#[command(version, about = "Edit and export a rich-text document stored as JSON", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Directory holding `<key>.json` documents
    #[arg(long, env = "WEAVER_RICHTEXT_STORE", default_value = ".")]
    store: PathBuf,

    /// Editor config file (JSON)
    #[arg(long, env = "WEAVER_RICHTEXT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the document as an HTML fragment
    Export,
    /// Print the stored document JSON
    Show,
    /// Toggle a format over a selection
    Format {
        /// bold, italic, underline, strikethrough, code, blockquote,
        /// align-left, align-center or align-right
        command: FormatCommand,

        /// Selection start as `path:offset`, e.g. `0.0:3`
        #[arg(long)]
        anchor: Point,

        /// Selection end; collapsed at the anchor if omitted
        #[arg(long)]
        focus: Option<Point>,
    },
    /// Insert or remove a link
    Link {
        /// Link target; ignored with --remove
        url: Option<String>,

        /// Selection start as `path:offset`; without it the link is appended
        #[arg(long)]
        anchor: Option<Point>,

        #[arg(long)]
        focus: Option<Point>,

        /// Unwrap the links in the selection instead
        #[arg(long)]
        remove: bool,
    },
    /// List the keyboard shortcuts
    Keys,
}

fn main() -> Result<()> {
    init_miette()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut editor = open_editor(&cli)?;

    match cli.command {
        Commands::Export => println!("{}", editor.to_html()),
        Commands::Show => {
            let json = serde_json::to_string_pretty(editor.document()).into_diagnostic()?;
            println!("{json}");
        }
        Commands::Format {
            command,
            anchor,
            focus,
        } => {
            editor.select(selection(anchor, focus));
            editor.toggle(command);
            println!(
                "{command}: {}",
                if editor.is_active(command) { "on" } else { "off" }
            );
        }
        Commands::Link {
            url,
            anchor,
            focus,
            remove,
        } => {
            if let Some(anchor) = anchor {
                editor.select(selection(anchor, focus));
            }
            if remove {
                editor.remove_link(None);
            } else {
                editor.insert_link(url.as_deref());
            }
            println!("{}", editor.to_html());
        }
        Commands::Keys => {
            let mut bindings: Vec<_> = editor
                .keybindings()
                .bindings
                .iter()
                .map(|(combo, command)| (combo.to_string(), command.to_string()))
                .collect();
            bindings.sort();
            for (combo, command) in bindings {
                println!("{combo:<10} {command}");
            }
        }
    }

    Ok(())
}

fn open_editor(cli: &Cli) -> Result<RichTextEditor<FileStore>> {
    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    tracing::debug!(
        store = %cli.store.display(),
        key = config.storage_key.as_str(),
        is_mac = config.is_mac,
        "opening document"
    );
    Ok(RichTextEditor::open(FileStore::new(&cli.store), config))
}

fn selection(anchor: Point, focus: Option<Point>) -> Selection {
    match focus {
        Some(focus) => Selection::new(anchor, focus),
        None => Selection::collapsed(anchor),
    }
}

fn init_miette() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    miette::set_panic_hook();
    Ok(())
}
