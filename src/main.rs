// ABOUTME: Main entry point for the revealkit program.
// ABOUTME: Provides CLI interface for init, start and export and executes them via the library.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use revealkit::{GenerateOptions, Preset, PreviewServer, Project, Settings};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Presentation data directory
    #[arg(short, long, global = true, default_value = ".")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a presentation from a preset
    Init(InitArgs),

    /// Serve the presentation with live reload
    Start(StartArgs),

    /// Export the presentation as static files
    Export(ExportArgs),
}

#[derive(Args)]
struct InitArgs {
    /// Preset name
    #[arg(default_value = "default")]
    preset: String,

    /// Clear the data directory first
    #[arg(short, long)]
    overwrite: bool,

    /// Also write config.yml
    #[arg(short, long)]
    config: bool,

    /// Also write index.html.tmpl
    #[arg(short = 't', long)]
    html: bool,
}

#[derive(Args)]
struct StartArgs {
    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Inline markdown slides into the page instead of loading them
    #[arg(long)]
    embed_markdown: bool,
}

#[derive(Args)]
struct ExportArgs {
    /// Output directory (default: build inside the data directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "html")]
    format: String,
}

fn init(dir: &Path, args: &InitArgs) -> anyhow::Result<()> {
    let preset = Preset::new(&args.preset)?;
    let options = GenerateOptions {
        force: args.overwrite,
        generate_config: args.config,
        generate_html_template: args.html,
    };
    let written = preset
        .generate(dir, &options)
        .with_context(|| format!("Failed to initialize {:?}", dir))?;
    println!(
        "Created {} file(s) in {:?} from preset '{}'",
        written.len(),
        dir,
        preset.name()
    );
    Ok(())
}

fn start(dir: &Path, args: &StartArgs, settings: &Settings) -> anyhow::Result<()> {
    let mut embed = settings.preview_embed_mode();
    embed.markdown |= args.embed_markdown;
    let project = Project::open(dir)
        .with_context(|| format!("Failed to open data directory {:?}", dir))?
        .with_embed(embed);

    let port = args.port.unwrap_or(settings.port);
    let addr = format!("0.0.0.0:{}", port);
    let server = PreviewServer::bind(Arc::new(project), &addr, settings.debounce())
        .with_context(|| format!("Failed to start preview server on {}", addr))?;
    server.serve();
    Ok(())
}

fn export(dir: &Path, args: &ExportArgs, settings: &Settings) -> anyhow::Result<()> {
    let project = Project::open(dir)
        .with_context(|| format!("Failed to open data directory {:?}", dir))?;
    let output = args
        .output
        .clone()
        .or_else(|| settings.output.clone())
        .unwrap_or_else(|| project.data_dir().join("build"));

    let written = revealkit::export(&project, &output, &args.format)
        .with_context(|| format!("Failed to export to {:?}", output))?;
    info!("Export finished");
    println!("Exported {} file(s) to {:?}", written.len(), output);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = Settings::from_env();

    let result = match &cli.command {
        Some(Commands::Init(args)) => init(&cli.dir, args),
        Some(Commands::Start(args)) => start(&cli.dir, args, &settings),
        Some(Commands::Export(args)) => export(&cli.dir, args, &settings),
        None => {
            println!("No command specified. Use --help for usage information.");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
