//! thesis-text CLI - split a thesis PDF and convert its sections to text

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use thesis_text::config::DEFAULT_CONFIG_FILE;
use thesis_text::convert::DEFAULT_OUTPUT_DIR;
use thesis_text::split::DEFAULT_SPLIT_DIR;
use thesis_text::{
    BoundedDocument, ConfigSource, DirectorySink, NormalizeOptions, PdfDocument, PipelineOptions,
    PipelineReport, Row, RowSelector, SectionFiles, SectionOutcome, SegmentationPipeline,
};

/// Default directory of per-section PDFs.
const DEFAULT_INPUT_DIR: &str = "pdf_chapters";

#[derive(Parser)]
#[command(name = "thesis-text")]
#[command(version)]
#[command(about = "Convert thesis sections to page-annotated plain text", long_about = None)]
struct Cli {
    /// Directory of per-section PDFs
    #[arg(value_name = "INPUT_DIR")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a directory of section PDFs to text
    Convert {
        /// Directory of per-section PDFs (file stem = section id)
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Convert the sections of one PDF to text using page bounds
    Extract {
        /// Thesis PDF
        #[arg(value_name = "PDF")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Split one PDF into section PDFs using page bounds
    Split {
        /// Thesis PDF
        #[arg(value_name = "PDF")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a YAML section config from a spreadsheet row
    Config {
        /// CSV or JSON table
        #[arg(value_name = "ROWS")]
        rows: PathBuf,

        #[command(flatten)]
        selector: SelectorArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct ConfigArgs {
    /// Section config file
    #[arg(short, long, value_name = "FILE", env = "THESIS_TEXT_CONFIG")]
    config: Option<PathBuf>,

    /// Derive the config from a CSV or JSON row instead
    #[arg(long, value_name = "FILE", conflicts_with = "config")]
    rows: Option<PathBuf>,

    #[command(flatten)]
    selector: SelectorArgs,
}

impl ConfigArgs {
    fn source(&self) -> Result<ConfigSource, Box<dyn std::error::Error>> {
        if let Some(ref rows) = self.rows {
            return Ok(ConfigSource::Rows {
                path: rows.clone(),
                selector: self.selector.selector()?,
            });
        }
        let path = self
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Ok(ConfigSource::Yaml(path))
    }
}

#[derive(Args)]
struct SelectorArgs {
    /// Data row to use (0-based, header excluded)
    #[arg(long, value_name = "N", default_value_t = 0)]
    row: usize,

    /// Use the first row where COLUMN equals VALUE
    #[arg(long = "match", value_name = "COLUMN=VALUE", conflicts_with = "row")]
    match_expr: Option<String>,
}

impl SelectorArgs {
    fn selector(&self) -> Result<RowSelector, Box<dyn std::error::Error>> {
        match self.match_expr {
            Some(ref expr) => Ok(RowSelector::parse_match(expr)?),
            None => Ok(RowSelector::Index(self.row)),
        }
    }
}

#[derive(Args)]
struct RenderArgs {
    /// Wrap width in columns (0 disables wrapping)
    #[arg(long, value_name = "N", default_value_t = thesis_text::render::DEFAULT_LINE_WIDTH)]
    width: usize,

    /// Section id treated as the table of contents
    #[arg(long, value_name = "ID", default_value = thesis_text::convert::DEFAULT_TOC_SECTION)]
    toc_section: String,

    /// Skip Unicode NFC composition
    #[arg(long)]
    no_unicode_normalization: bool,

    /// Render sections in parallel
    #[arg(long)]
    parallel: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl RenderArgs {
    fn options(&self) -> PipelineOptions {
        let normalize = NormalizeOptions::new()
            .with_line_width(self.width)
            .with_unicode_normalization(!self.no_unicode_normalization);
        PipelineOptions::new()
            .with_normalize(normalize)
            .with_toc_section(self.toc_section.clone())
            .with_parallel(self.parallel)
    }
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            width: thesis_text::render::DEFAULT_LINE_WIDTH,
            toc_section: thesis_text::convert::DEFAULT_TOC_SECTION.to_string(),
            no_unicode_normalization: false,
            parallel: false,
            json: false,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            config,
            render,
        }) => cmd_convert(&input, output.as_deref(), &config, &render),
        Some(Commands::Extract {
            input,
            output,
            config,
            render,
        }) => cmd_extract(&input, output.as_deref(), &config, &render),
        Some(Commands::Split {
            input,
            output,
            config,
            json,
        }) => cmd_split(&input, output.as_deref(), &config, json),
        Some(Commands::Config {
            rows,
            selector,
            output,
        }) => cmd_config(&rows, &selector, output.as_deref()).map(|_| true),
        Some(Commands::Version) => {
            cmd_version();
            Ok(true)
        }
        None => {
            // Default behavior: convert the section directory with the default config
            let input = cli
                .input
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));
            let config = ConfigArgs {
                config: None,
                rows: None,
                selector: SelectorArgs {
                    row: 0,
                    match_expr: None,
                },
            };
            cmd_convert(
                &input,
                cli.output.as_deref(),
                &config,
                &RenderArgs::default(),
            )
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

fn run_pipeline(
    pipeline: &SegmentationPipeline,
    sections: &[String],
    source: &dyn thesis_text::PageSource,
    output_dir: &Path,
    json: bool,
) -> bool {
    let mut sink = DirectorySink::new(output_dir);
    let pb = progress_bar(sections.len());
    if json {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let report = pipeline.run_with(sections, source, &mut sink, |outcome| {
        pb.set_message(outcome.section().to_string());
        pb.inc(1);
    });
    pb.finish_and_clear();

    print_report(&report, json)
}

/// Print the outcome summary; returns whether every section succeeded.
fn print_report(report: &PipelineReport, json: bool) -> bool {
    if json {
        match report.to_json(true) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("{}: {}", "Error".red().bold(), e),
        }
        return report.is_success();
    }

    if report.is_empty() {
        println!("{}", "No sections to process".yellow());
        return true;
    }

    let succeeded: Vec<_> = report.succeeded().collect();
    if !succeeded.is_empty() {
        println!("{}", "Converted:".green().bold());
        for (i, outcome) in succeeded.iter().enumerate() {
            let branch = if i + 1 == succeeded.len() { "└─" } else { "├─" };
            if let SectionOutcome::Converted {
                section,
                output,
                pages,
            } = outcome
            {
                println!(
                    "  {} {} → {} {}",
                    branch.dimmed(),
                    section,
                    output,
                    format!("({} pages)", pages).dimmed()
                );
            }
        }
    }

    let failed: Vec<_> = report.failed().collect();
    if !failed.is_empty() {
        println!("{}", "Failed:".red().bold());
        for (i, outcome) in failed.iter().enumerate() {
            let branch = if i + 1 == failed.len() { "└─" } else { "├─" };
            if let SectionOutcome::Failed { section, reason } = outcome {
                println!("  {} {}: {}", branch.dimmed(), section, reason);
            }
        }
    }

    report.is_success()
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    config: &ConfigArgs,
    render: &RenderArgs,
) -> Result<bool, Box<dyn std::error::Error>> {
    let pipeline = SegmentationPipeline::from_config_source(&config.source()?, render.options())?;

    let files = SectionFiles::scan(input)?;
    if files.is_empty() {
        return Err(format!("No PDF files found in {}", input.display()).into());
    }
    let sections = files.ordered_ids(pipeline.configs());

    let output_dir = output.unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_DIR));
    Ok(run_pipeline(
        &pipeline,
        &sections,
        &files,
        output_dir,
        render.json,
    ))
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    config: &ConfigArgs,
    render: &RenderArgs,
) -> Result<bool, Box<dyn std::error::Error>> {
    let pipeline = SegmentationPipeline::from_config_source(&config.source()?, render.options())?;

    let document = BoundedDocument::open(input, pipeline.configs().clone())?;
    let sections = document.bounded_ids();
    if sections.is_empty() {
        return Err("No section in the config has an end_page".into());
    }

    let output_dir = output.unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_DIR));
    Ok(run_pipeline(
        &pipeline,
        &sections,
        &document,
        output_dir,
        render.json,
    ))
}

fn cmd_split(
    input: &Path,
    output: Option<&Path>,
    config: &ConfigArgs,
    json: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let configs = config.source()?.resolve()?;
    let output_dir = output.unwrap_or_else(|| Path::new(DEFAULT_SPLIT_DIR));

    let pb = ProgressBar::new_spinner();
    if !json {
        pb.set_message(format!("Splitting {}...", input.display()));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
    }
    let document = PdfDocument::open(input)?;
    let report = thesis_text::split_document(&document, &configs, output_dir)?;
    pb.finish_and_clear();

    Ok(print_report(&report, json))
}

fn cmd_config(
    rows: &Path,
    selector: &SelectorArgs,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let row = Row::load(rows, &selector.selector()?)?;
    let configs = thesis_text::SectionConfigs::from_row(&row)?;
    if configs.is_empty() {
        log::warn!("No section is marked present in the selected row");
    }

    let yaml = configs.to_yaml()?;
    if let Some(path) = output {
        fs::write(path, &yaml)?;
        println!(
            "{} {} ({} sections)",
            "Saved to".green(),
            path.display(),
            configs.len()
        );
    } else {
        print!("{}", yaml);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "thesis-text".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Thesis PDF section to text converter");
    println!();
    println!("License: MIT");
}
