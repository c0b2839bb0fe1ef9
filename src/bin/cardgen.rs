//! CLI for cardgen - AI visiting card generation.

use anyhow::Context;
use cardgen::render::{html, text};
use cardgen::{CardGenerator, CardRequest, Config, DesignStyle, WorkflowState};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cardgen")]
#[command(about = "Generate AI visiting cards (Gemini text + Imagen background)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a visiting card
    Generate(GenerateArgs),

    /// List available design styles and their layouts
    Designs,

    /// Check that the API key works for both models
    Health(HealthArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Full name printed on the card
    #[arg(short, long)]
    name: String,

    /// Industry or profession
    #[arg(short, long)]
    industry: String,

    /// Design style (e.g. "Minimalist", "art-deco", "cyberpunk")
    #[arg(short, long, default_value_t = DesignStyle::default())]
    design: DesignStyle,

    /// Where to write the card as a standalone HTML page
    #[arg(short, long, default_value = "card.html")]
    output: PathBuf,

    /// Also save the background image to this path
    #[arg(long)]
    image_output: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[derive(Args)]
struct HealthArgs {
    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => {
            generate_card(args, cli.json).await?;
        }
        Commands::Designs => {
            list_designs(cli.json)?;
        }
        Commands::Health(args) => {
            check_health(args, cli.json).await?;
        }
    }

    Ok(())
}

fn load_config(timeout_secs: Option<u64>) -> anyhow::Result<Config> {
    let mut builder = Config::builder();
    if let Some(secs) = timeout_secs {
        if secs == 0 {
            anyhow::bail!("--timeout-secs must be greater than zero");
        }
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

async fn generate_card(args: GenerateArgs, json_output: bool) -> anyhow::Result<()> {
    let config = load_config(args.timeout_secs)?;
    let generator = CardGenerator::from_config(config)?;
    let request = CardRequest::new(args.name, args.industry, args.design);

    let generation = generator.begin(request)?;
    if !json_output {
        eprintln!("{}\n", text::render_state(&generator.state()));
    }
    let state = generation.run().await;

    let record = match &state {
        WorkflowState::Success(record) => record.clone(),
        WorkflowState::Error(message) => {
            if json_output {
                let result = serde_json::json!({
                    "success": false,
                    "error": message,
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                eprintln!("{}", text::render_state(&state));
            }
            anyhow::bail!("card generation failed");
        }
        // `run` only ever returns a terminal state
        WorkflowState::Idle | WorkflowState::Loading => {
            anyhow::bail!("generation ended in state {}", state.label());
        }
    };

    std::fs::write(&args.output, html::render_card(&record))
        .with_context(|| format!("writing {}", args.output.display()))?;
    if let Some(ref path) = args.image_output {
        record.image.save(path)?;
    }

    if json_output {
        let result = serde_json::json!({
            "success": true,
            "name": record.name,
            "design": record.design,
            "layout": record.design.layout().to_string(),
            "title": record.content.title,
            "tagline": record.content.tagline,
            "email": record.content.email,
            "phone": record.content.phone,
            "website": record.content.website,
            "output": args.output.display().to_string(),
            "image_output": args.image_output.as_ref().map(|p| p.display().to_string()),
            "image_bytes": record.image.size(),
            "image_model": record.image.metadata.model,
            "image_duration_ms": record.image.metadata.duration_ms,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", text::render_card(&record));
        println!("\nSaved card: {}", args.output.display());
        if let Some(ref path) = args.image_output {
            println!("Saved background: {}", path.display());
        }
    }

    Ok(())
}

fn list_designs(json_output: bool) -> anyhow::Result<()> {
    #[derive(serde::Serialize)]
    struct DesignInfo {
        name: &'static str,
        layout: String,
    }

    let designs: Vec<DesignInfo> = DesignStyle::ALL
        .iter()
        .map(|d| DesignInfo {
            name: d.as_str(),
            layout: d.layout().to_string(),
        })
        .collect();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&designs)?);
    } else {
        println!("Design styles:\n");
        for d in &designs {
            println!("  {:<18} {} layout", d.name, d.layout);
        }
    }

    Ok(())
}

async fn check_health(args: HealthArgs, json_output: bool) -> anyhow::Result<()> {
    let config = load_config(args.timeout_secs)?;
    let generator = CardGenerator::from_config(config)?;

    let content = generator.content_provider();
    let image = generator.image_provider();
    let checks = [
        (content.name().to_string(), content.health_check().await),
        (image.name().to_string(), image.health_check().await),
    ];
    let healthy = checks.iter().all(|(_, r)| r.is_ok());

    if json_output {
        let results: Vec<_> = checks
            .iter()
            .map(|(name, r)| {
                serde_json::json!({
                    "provider": name,
                    "ok": r.is_ok(),
                    "error": r.as_ref().err().map(|e| e.to_string()),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for (name, r) in &checks {
            match r {
                Ok(()) => println!("{name}: ok"),
                Err(e) => println!("{name}: {e}"),
            }
        }
    }

    if !healthy {
        anyhow::bail!("health check failed");
    }
    Ok(())
}
