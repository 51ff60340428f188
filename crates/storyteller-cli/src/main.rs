use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storyteller_core::{DialogueEntry, annotate_genders, config_file};
use storyteller_gender::{DEFAULT_MODEL_PATH, GenderModel};
use storyteller_parsing::{
    DialogueParser, ParsingConfig, ParsingConfigBuilder, extract_dialogues,
};
use storyteller_pdf_mupdf::MupdfBackend;

mod output;

use output::ColorMode;

/// Storyteller - split a screenplay into speaker lines and label each speaker
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract dialogue from a PDF or text script and label speakers by gender
    Annotate(AnnotateArgs),
}

#[derive(Args, Debug)]
struct AnnotateArgs {
    /// Path to the screenplay (.pdf, or any UTF-8 text file)
    file_path: PathBuf,

    /// Path to the ONNX gender model (sidecar .json expected next to it)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Parse only: print dialogue entries without loading the model
    #[arg(long)]
    dry_run: bool,

    /// Drop non-dialogue paragraphs instead of attributing them to the narrator
    #[arg(long)]
    no_narration: bool,

    /// Print entries as JSON
    #[arg(long)]
    json: bool,

    /// Path to output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Annotate(args) => annotate(args),
    }
}

fn annotate(args: AnnotateArgs) -> anyhow::Result<()> {
    if !args.file_path.exists() {
        anyhow::bail!("File not found: {}", args.file_path.display());
    }

    // Resolve configuration: CLI flags > env vars > config file > defaults
    let config = config_file::load_config();
    let model_path = args
        .model
        .clone()
        .or_else(|| {
            std::env::var("STORYTELLER_MODEL_PATH")
                .ok()
                .map(PathBuf::from)
        })
        .or_else(|| {
            config
                .model
                .as_ref()
                .and_then(|m| m.path.as_ref())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));

    let parsing_section = config.parsing.clone().unwrap_or_default();
    let include_narration =
        !args.no_narration && parsing_section.include_narration.unwrap_or(true);
    let mut builder = ParsingConfigBuilder::new().include_narration(include_narration);
    if let Some(name) = &parsing_section.narrator_name {
        builder = builder.narrator_name(name);
    }
    let parsing = builder.build()?;

    let model = if args.dry_run {
        None
    } else {
        let model = GenderModel::load(&model_path)?.ok_or_else(|| {
            anyhow::anyhow!(
                "Gender model not found at {}. Pass --model <PATH> or use --dry-run",
                model_path.display()
            )
        })?;
        Some(model)
    };

    let entries = read_entries(&args.file_path, parsing)?;
    let entries = match &model {
        Some(model) => annotate_genders(model, entries)?,
        None => entries,
    };

    let use_color = !args.no_color && !args.json && args.output.is_none();
    let color = ColorMode(use_color);

    let mut writer: Box<dyn Write> = if let Some(ref output_path) = args.output {
        Box::new(std::fs::File::create(output_path)?)
    } else {
        Box::new(std::io::stdout())
    };

    if args.json {
        output::print_json(&mut writer, &entries)?;
    } else {
        let file_name = args
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| args.file_path.display().to_string());
        output::print_header(&mut writer, &file_name, &entries, args.dry_run, color)?;
        output::print_entries(&mut writer, &entries, color)?;
    }
    writer.flush()?;

    Ok(())
}

/// PDFs go through MuPDF; anything else is read as UTF-8 script text.
fn read_entries(
    path: &std::path::Path,
    parsing: ParsingConfig,
) -> anyhow::Result<Vec<DialogueEntry>> {
    let is_pdf = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if is_pdf {
        Ok(extract_dialogues(path, &MupdfBackend::new(), &parsing)?)
    } else {
        let text = std::fs::read_to_string(path)?;
        Ok(DialogueParser::with_config(parsing).parse(&text))
    }
}
