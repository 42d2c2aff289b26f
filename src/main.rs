use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use leadscan::io::{OCR_IMAGE_EXTENSIONS, VISION_IMAGE_EXTENSIONS};
use leadscan::stages::csv_path_for_image;
use leadscan::{
    classify_lines, extract_pairs, list_images, parse_extracted_text, read_text_file,
    recognize_ocr, recognize_vision, render_pairs, render_records, NvidiaClient, NvidiaConfig,
    RecognizeConfig, RunSummary,
};

#[derive(Parser)]
#[command(name = "leadscan")]
#[command(author, version, about = "Attendee list reconstruction from scanned images", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// OCR every image in a folder and write one first/last/company CSV per image
    Ocr {
        /// Folder of .png/.jpg/.jpeg images
        #[arg(short, long)]
        input: PathBuf,

        /// Folder for CSV output (created if missing)
        #[arg(short, long)]
        output: PathBuf,

        /// Keep the raw OCR result archives next to the CSVs
        #[arg(long)]
        keep_archives: bool,

        /// Retries per service call on transient failure
        #[arg(long, default_value = "2")]
        max_retries: u32,

        /// Write a JSON run summary to this file
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Ask a vision model for "Name, Company" pairs and write one combined CSV
    Vision {
        /// Folder of .jpg images
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Shrink images until they encode under this many KB
        #[arg(long, default_value = "180")]
        max_image_kb: usize,

        /// Retries per service call on transient failure
        #[arg(long, default_value = "2")]
        max_retries: u32,

        /// Write a JSON run summary to this file
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Reconstruct records from an already-recognized text file
    Parse {
        /// Text file (invalid UTF-8 is replaced)
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Expect "Name, Company" lines instead of separate name/company lines
        #[arg(long)]
        pairs: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the classification of every line in a text file
    Classify {
        /// Text file (invalid UTF-8 is replaced)
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ocr {
            input,
            output,
            keep_archives,
            max_retries,
            summary,
            verbose,
        } => {
            setup_logging(verbose);
            let config = RecognizeConfig {
                max_retries,
                keep_archives,
                ..Default::default()
            };
            process_ocr(&input, &output, &config, summary.as_deref()).await
        }
        Commands::Vision {
            input,
            output,
            max_image_kb,
            max_retries,
            summary,
            verbose,
        } => {
            setup_logging(verbose);
            let config = RecognizeConfig {
                max_retries,
                max_image_kb,
                ..Default::default()
            };
            process_vision(&input, &output, &config, summary.as_deref()).await
        }
        Commands::Parse {
            input,
            output,
            pairs,
            verbose,
        } => {
            setup_logging(verbose);
            parse_text_file(&input, &output, pairs)
        }
        Commands::Classify { input } => {
            setup_logging(false);
            classify_text_file(&input)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn process_ocr(
    input: &Path,
    output: &Path,
    config: &RecognizeConfig,
    summary_path: Option<&Path>,
) -> Result<()> {
    let client = NvidiaClient::new(NvidiaConfig::from_env()?);

    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {:?}", output))?;
    let images = list_images(input, &OCR_IMAGE_EXTENSIONS)?;
    info!("Found {} images in {:?}", images.len(), input);

    let mut summary = RunSummary::start("ocr", images.len());
    let archive_dir = config.keep_archives.then_some(output);

    for image in &images {
        info!("Processing image: {:?}", image);
        let result = async {
            let text = recognize_ocr(&client, image, archive_dir, config).await?;
            let records = parse_extracted_text(&text);
            info!("Parsed {} records from {:?}", records.len(), image);
            render_records(&records, &csv_path_for_image(output, image))
        }
        .await;

        match result {
            Ok(rendered) => summary.record_success(rendered.rows),
            Err(e) => {
                error!("Failed to process {:?}: {:#}", image, e);
                summary.record_failure(&image.display().to_string(), &e);
            }
        }
    }

    finish_run(summary, summary_path)
}

async fn process_vision(
    input: &Path,
    output: &Path,
    config: &RecognizeConfig,
    summary_path: Option<&Path>,
) -> Result<()> {
    let client = NvidiaClient::new(NvidiaConfig::from_env()?);

    let images = list_images(input, &VISION_IMAGE_EXTENSIONS)?;
    info!("Found {} images in {:?}", images.len(), input);

    let mut summary = RunSummary::start("vision", images.len());
    let mut pairs = Vec::new();

    for image in &images {
        info!("Processing {:?}", image);
        match recognize_vision(&client, image, config).await {
            Ok(text) => {
                let extracted = extract_pairs(&text);
                info!("Extracted {} pairs from {:?}", extracted.len(), image);
                summary.record_success(extracted.len());
                pairs.extend(extracted);
            }
            Err(e) => {
                error!("Failed to process {:?}: {:#}", image, e);
                summary.record_failure(&image.display().to_string(), &e);
            }
        }
    }

    render_pairs(&pairs, output)?;
    finish_run(summary, summary_path)
}

fn finish_run(mut summary: RunSummary, summary_path: Option<&Path>) -> Result<()> {
    summary.finish();
    info!(
        "Complete: {} of {} images processed, {} failed, {} rows written",
        summary.images_processed,
        summary.images_found,
        summary.images_failed,
        summary.records_written
    );

    if let Some(path) = summary_path {
        summary.write_json(path)?;
        info!("Run summary written to {:?}", path);
    }
    Ok(())
}

fn parse_text_file(input: &Path, output: &Path, pairs: bool) -> Result<()> {
    info!("Parsing text from {:?}", input);
    let text = read_text_file(input)?;

    let rendered = if pairs {
        render_pairs(&extract_pairs(&text), output)?
    } else {
        render_records(&parse_extracted_text(&text), output)?
    };

    info!("Wrote {} rows to {:?}", rendered.rows, rendered.path);
    Ok(())
}

fn classify_text_file(input: &Path) -> Result<()> {
    let text = read_text_file(input)?;
    let classified = classify_lines(&text);

    println!("Line Classification");
    println!("===================");
    for (line, class) in &classified {
        println!("{:<8} {}", class.to_string(), line);
    }
    println!();

    let names = classified
        .iter()
        .filter(|(_, c)| *c == leadscan::Classification::Name)
        .count();
    println!("Lines: {}", classified.len());
    println!("Name lines: {}", names);
    println!("Company lines: {}", classified.len() - names);
    println!("Records: {}", parse_extracted_text(&text).len());

    Ok(())
}
