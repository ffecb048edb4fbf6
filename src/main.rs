// src/main.rs
use clap::{Args, Parser, Subcommand};
use question_setter::combiner::CombinedDocument;
use question_setter::extractors::{self, QuestionExtractor};
use question_setter::papers::Catalog;
use question_setter::selection::{sample, PickCount, PickRequest, Selection};
use question_setter::storage::{StorageManager, DEFAULT_OUTPUT_FILE};
use question_setter::utils::{self, AppError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

/// Build a new question paper by sampling questions from existing exam papers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the .docx question papers
    #[arg(short, long, env = "QUESTION_PAPER_DIR", default_value = "./docs")]
    docs_dir: PathBuf,

    /// Exam index (JSON object of exam code -> file name). Defaults to <docs-dir>/index.json when present
    #[arg(short, long)]
    index: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List exam codes, optionally filtered by a case-insensitive search
    List {
        /// Part of an exam code or file name
        query: Option<String>,
    },

    /// Show every question extracted from one paper
    Show {
        /// Exam code of the paper
        code: String,
    },

    /// Sample questions from the picked papers and write the combined paper
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Paper and question count as CODE=N (or CODE for all questions). Repeatable; order is kept
    #[arg(short, long = "pick", value_name = "CODE=N")]
    picks: Vec<PickRequest>,

    /// Output directory for the combined paper
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// File name of the combined paper
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    file_name: String,

    /// Seed the sampler for a reproducible paper
    #[arg(long)]
    seed: Option<u64>,

    /// Debug mode - save annotated extraction pages for each picked paper
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let cli = Cli::parse();
    tracing::debug!("Starting with args: {:?}", cli);

    // 3. Load the catalog of papers
    let catalog = Catalog::open(&cli.docs_dir, cli.index.as_deref())?;
    if catalog.is_empty() {
        tracing::warn!("No question papers found in {}", catalog.dir().display());
    } else {
        tracing::info!("{} papers available in {}", catalog.len(), catalog.dir().display());
    }

    match cli.command {
        Command::List { query } => run_list(&catalog, query.as_deref().unwrap_or("")),
        Command::Show { code } => run_show(&catalog, &code),
        Command::Generate(args) => match args.seed {
            Some(seed) => run_generate(&catalog, &args, &mut StdRng::seed_from_u64(seed)),
            None => run_generate(&catalog, &args, &mut rand::rng()),
        },
    }
}

fn run_list(catalog: &Catalog, query: &str) -> Result<(), AppError> {
    let matches = catalog.search(query);
    if matches.is_empty() {
        println!("No exam codes match '{}'.", query);
        return Ok(());
    }

    println!("Matching Exam Codes:");
    for entry in matches {
        if entry.available {
            println!("- {}", entry.document.label);
        } else {
            println!("- {} (missing: {})", entry.document.label, entry.document.path.display());
        }
    }
    Ok(())
}

fn run_show(catalog: &Catalog, code: &str) -> Result<(), AppError> {
    let source = catalog.resolve(code);
    let (questions, policy) = QuestionExtractor::new().extract_document(&source)?;

    println!("Exam Code: {}", source.label);
    println!("Total Questions in the file: {} ({:?} extraction)", questions.len(), policy);
    for (idx, question) in questions.iter().enumerate() {
        println!("{}. {}", idx + 1, question);
    }
    Ok(())
}

fn run_generate<R: Rng + ?Sized>(catalog: &Catalog, args: &GenerateArgs, rng: &mut R) -> Result<(), AppError> {
    let selection = build_selection(catalog, &args.picks, &QuestionExtractor::new(), rng)?;
    let document = CombinedDocument::from_selection(&selection);
    if document.is_empty() {
        tracing::warn!("{}", AppError::NothingSelected);
        return Ok(());
    }

    // Output directories only exist once there is something to write
    let storage = StorageManager::new(&args.output_dir)?;

    if args.debug {
        let debug_dir = storage.base_dir().join("debug");
        std::fs::create_dir_all(&debug_dir)?;
        for entry in selection.entries() {
            let source = catalog.resolve(&entry.code);
            match extractors::docx::read_paragraphs(&source) {
                Ok(paragraphs) => {
                    let path = debug_dir.join(format!("{}_annotated.html", source.label));
                    if let Err(e) = utils::extraction_debug::save_annotated(&paragraphs.join("\n"), &path) {
                        tracing::warn!("Failed to create debug page for {}: {}", source.label, e);
                    }
                }
                Err(e) => tracing::warn!("Failed to create debug page for {}: {}", source.label, e),
            }
        }
    }

    println!("Selected Questions");
    print!("{}", document.preview());

    let doc_path = storage.save_document(&document, &args.file_name)?;
    match storage.save_manifest(&document, &args.file_name) {
        Ok(path) => tracing::debug!("Manifest written to {}", path.display()),
        Err(e) => tracing::error!("Failed to save manifest: {}", e),
    }

    println!("Questions Combined Successfully!");
    println!("Combined paper: {}", doc_path.display());
    Ok(())
}

/// Extracts and samples every pick into a fresh selection, in pick order.
///
/// Repeated codes are warned about and ignored. Papers that cannot be read are
/// warned about and left out; papers with no questions get an empty section.
fn build_selection<R: Rng + ?Sized>(
    catalog: &Catalog,
    picks: &[PickRequest],
    extractor: &QuestionExtractor,
    rng: &mut R,
) -> Result<Selection, AppError> {
    let mut selection = Selection::new();
    let mut failure_count = 0;

    for pick in picks {
        if !selection.add_code(&pick.code) {
            tracing::warn!("{} is already added.", pick.code);
            continue;
        }

        let loaded = extractor.load(&catalog.resolve(&pick.code));
        if !loaded.is_ok() {
            if let Some(e) = &loaded.error {
                tracing::warn!("Skipping {} ({}): {}", loaded.document.label, loaded.document.path.display(), e);
            }
            selection.remove(&pick.code);
            failure_count += 1;
            continue;
        }

        let available = loaded.questions.len();
        tracing::info!("{}: {} questions available ({:?} extraction)", pick.code, available, loaded.policy);

        let Some(count) = pick.count.resolve(available) else {
            tracing::warn!("{} has no extractable questions, adding an empty section", pick.code);
            selection.record(&pick.code, 0, Vec::new());
            continue;
        };
        if let PickCount::Exactly(requested) = pick.count {
            if requested != count {
                tracing::warn!("Requested {} questions from {}, using {} (available: {})", requested, pick.code, count, available);
            }
        }

        let picked = sample(&loaded.questions, count, rng)?;
        tracing::info!("Selected {} questions from {}", picked.len(), pick.code);
        selection.record(&pick.code, count, picked);
    }

    tracing::info!(
        "Selection finished. Papers: {}, Questions: {}, Failures: {}",
        selection.entries().len(),
        selection.total_questions(),
        failure_count
    );

    Ok(selection)
}
