use clap::{Parser, Subcommand};
use framescope_core::{Config, CoreResult, FarcasterNetwork, Preview, PreviewClient};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "framescope", version, about = "Preview and click through Farcaster frames")]
struct Cli {
    /// YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// fid to sign simulated clicks as
    #[arg(long, global = true)]
    fid: Option<u64>,

    #[arg(long, global = true)]
    network: Option<FarcasterNetwork>,

    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Print the decoded card as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a frame and show what a client would render
    Preview { url: String },
    /// Fetch a frame, click one of its buttons, and show the frame that comes back
    Click {
        url: String,
        #[arg(long, short = 'b')]
        button: u8,
        #[arg(long, short = 'i')]
        input: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("✗ {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> CoreResult<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(fid) = cli.fid {
        config.fid = fid;
    }
    if let Some(network) = cli.network {
        config.network = network;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.timeout_secs = timeout_secs;
    }

    let client = PreviewClient::new(&config)?;

    match cli.command {
        Command::Preview { url } => {
            let preview = client.fetch(&url).await?;
            print_preview(&preview, cli.json)?;
        }
        Command::Click { url, button, input } => {
            let preview = client.fetch(&url).await?;
            if preview.card.button(button).is_none() {
                tracing::warn!(button, "frame declares no such button; clicking anyway");
            }
            let (next, response) = client.click(&preview, button, input.as_deref()).await?;
            if let Some(location) = &response.location {
                println!("→ redirect ({}) to {}", response.status, location);
            }
            print_preview(&next, cli.json)?;
        }
    }
    Ok(())
}

fn print_preview(preview: &Preview, json: bool) -> CoreResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&preview.card)?);
        return Ok(());
    }

    let card = &preview.card;
    let debug = &card.debug;
    println!(
        "{} [{}] {}",
        preview.host().unwrap_or_else(|| preview.url.clone()),
        preview.status,
        if card.title.is_empty() { "(untitled)" } else { card.title.as_str() }
    );
    if debug.fallback_image_to_url {
        println!("  image:    (missing, og:image '{}')", debug.image);
    } else {
        println!("  image:    {}", card.image_url);
    }
    println!("  post url: {}", preview.post_target());
    if let Some(placeholder) = &card.input_text {
        println!("  input:    \"{}\"", placeholder);
    }
    for button in &card.buttons {
        println!("  [{}] {} ({})", button.index, button.title, button.button_type);
    }

    if debug.buttons_are_out_of_order {
        eprintln!("  ! buttons out of order or missing: {:?}", debug.invalid_buttons);
    }
    if debug.post_url_too_long {
        eprintln!("  ! post url longer than 2048 characters");
    }
    Ok(())
}
