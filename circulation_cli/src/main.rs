use circulation_core::*;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "circdesk")]
#[command(about = "Library circulation desk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the collection file
    #[arg(long, global = true)]
    collection: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the desk, reading librarian commands from stdin (default)
    Run,

    /// Show the loaded collection
    Catalog {
        /// Print every copy as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        /// Write it to the `--config` path (or the default path) if no file exists there
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        circulation_core::logging::init_with_level("debug");
    } else {
        circulation_core::logging::init();
    }

    // `config --init` may name a file that does not exist yet
    let init_requested = matches!(cli.command, Some(Commands::Config { init: true }));
    let config = match cli.config.as_deref() {
        Some(path) if init_requested && !path.exists() => Config::default(),
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let collection_path = cli
        .collection
        .unwrap_or_else(|| config.collection.path.clone());

    match cli.command {
        Some(Commands::Run) | None => cmd_run(&collection_path, &config),
        Some(Commands::Catalog { json }) => cmd_catalog(&collection_path, json),
        Some(Commands::Config { init }) => cmd_config(&config, cli.config.as_deref(), init),
    }
}

/// Load the collection file, falling back to the sample shelf when absent
fn load_books(path: &Path) -> Result<Vec<CatalogItem>> {
    if path.exists() {
        load_collection(path)
    } else {
        tracing::warn!(
            "Collection file {:?} not found, using the sample collection",
            path
        );
        Ok(sample_collection())
    }
}

fn cmd_run(collection_path: &Path, config: &Config) -> Result<()> {
    let books = load_books(collection_path)?;
    let mut library = Library::with_policy(books, Clock::new(), config.policy.clone());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{} books in collection.", library.shelf().len())?;
    writeln!(out, "Ready for input. Type 'help()' for a list of commands.\n")?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        write!(out, "Library command: ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            // EOF ends the session like quit()
            writeln!(out)?;
            break;
        };
        if dispatch(&mut library, &line?, &mut out)? == Flow::Quit {
            break;
        }
    }

    Ok(())
}

/// Run one line of librarian input and print what the desk has to say
fn dispatch(library: &mut Library, line: &str, out: &mut impl Write) -> Result<Flow> {
    let line = line.trim();
    if line.is_empty() {
        writeln!(out, "What? Speak up!\n")?;
        return Ok(Flow::Continue);
    }

    let command = match Command::parse(line) {
        Ok(command) => command,
        Err(e) => {
            writeln!(out, "{}", e)?;
            writeln!(out, "Type 'help()' for a list of the things I do understand.\n")?;
            return Ok(Flow::Continue);
        }
    };

    let result = library.execute(&command);
    write!(out, "{}", library.take_response())?;
    match result {
        Ok(flow) => {
            writeln!(out)?;
            Ok(flow)
        }
        Err(e) => {
            tracing::debug!("{:?} rejected: {}", command, e);
            writeln!(out, "{}\n", e)?;
            Ok(Flow::Continue)
        }
    }
}

fn cmd_catalog(collection_path: &Path, json: bool) -> Result<()> {
    let books = load_books(collection_path)?;

    if json {
        let rendered = serde_json::to_string_pretty(&books).map_err(io::Error::from)?;
        println!("{}", rendered);
        return Ok(());
    }

    // Group copies of the same book, keeping shelf order
    let mut grouped: Vec<(String, usize)> = Vec::new();
    for book in &books {
        let display = book.to_string();
        match grouped.iter_mut().find(|(title, _)| *title == display) {
            Some((_, copies)) => *copies += 1,
            None => grouped.push((display, 1)),
        }
    }

    println!("{} books in collection.", books.len());
    for (display, copies) in grouped {
        if copies > 1 {
            println!("  {} ({} copies)", display, copies);
        } else {
            println!("  {}", display);
        }
    }
    Ok(())
}

fn cmd_config(config: &Config, explicit_path: Option<&Path>, init: bool) -> Result<()> {
    print!("{}", config.to_toml()?);

    if init {
        let path = match explicit_path {
            Some(path) => path.to_path_buf(),
            None => Config::default_config_path().ok_or_else(|| {
                Error::Config("No config directory on this platform".into())
            })?,
        };
        if path.exists() {
            println!("\nConfig already exists at {}", path.display());
        } else {
            config.save_to(&path)?;
            println!("\n✓ Wrote config to {}", path.display());
        }
    }
    Ok(())
}
