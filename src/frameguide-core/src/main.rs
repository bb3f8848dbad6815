//! Frameguide - a paged guide served as an interactive Farcaster frame

use anyhow::Result;
use clap::{Parser, Subcommand};
use frameguide_core::colored_logger::{init_component_logger, Component};
use frameguide_core::config::{CliOverrides, Config, EnvOverrides};
use frameguide_frame::{navigate, Catalog, NavigationRequest};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "frameguide")]
#[command(about = "Serve a paged guide as an interactive frame")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the frame server
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,

        /// Public base URL used in rendered frames
        #[arg(short, long)]
        base_url: Option<String>,

        /// Directory with page images and the infographic
        #[arg(long)]
        public_dir: Option<PathBuf>,
    },

    /// List the guide pages
    Pages,

    /// Print the frame document for a page
    Render {
        /// Page number (clamped to the guide)
        #[arg(long, default_value = "1")]
        page: i64,

        /// Public base URL used in the document
        #[arg(short, long)]
        base_url: Option<String>,
    },

    /// Show which page a button press leads to
    Resolve {
        /// Page the button was pressed on
        #[arg(long)]
        page: u32,

        /// 1-based button index
        #[arg(long)]
        button: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let component = match cli.command {
        Commands::Serve { .. } => Component::Server,
        _ => Component::Cli,
    };
    init_component_logger(component, cli.verbose)?;

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port, base_url, public_dir } => {
            let overrides = CliOverrides { host, port, base_url, public_dir };
            cmd_serve(config, overrides)?;
        }
        Commands::Pages => {
            cmd_pages();
        }
        Commands::Render { page, base_url } => {
            cmd_render(config, page, base_url)?;
        }
        Commands::Resolve { page, button } => {
            cmd_resolve(page, button)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn cmd_serve(config: Config, overrides: CliOverrides) -> Result<()> {
    let settings = config.server_settings(overrides, &EnvOverrides::from_env())?;

    if !settings.public_dir.is_dir() {
        warn!("public directory {:?} not found, images will 404", settings.public_dir);
    }

    info!("starting frameguide server");
    frameguide_web::serve(settings).await?;

    Ok(())
}

fn cmd_pages() {
    let catalog = Catalog::builtin();
    println!("{} page(s):\n", catalog.size());

    for page in catalog.iter() {
        println!("{}. {}", page.number, page.image);
        for (i, button) in page.buttons.iter().enumerate() {
            println!("   [{}] {} ({})", i + 1, button.label, button.action.as_str());
        }
    }
}

fn cmd_render(config: Config, page: i64, base_url: Option<String>) -> Result<()> {
    let base_url = config.resolve_base_url(base_url.as_deref(), &EnvOverrides::from_env())?;
    let catalog = Catalog::builtin();
    let page = catalog.page_or_first(catalog.clamp(page));

    info!("rendering page {} against {}", page.number, base_url);
    println!("{}", config.renderer().render(page, &base_url));

    Ok(())
}

fn cmd_resolve(page: u32, button: u32) -> Result<()> {
    let catalog = Catalog::builtin();
    let result = navigate(catalog, NavigationRequest::new(page, button))?;

    println!("page {} + button {} -> page {}", page, button, result.resolved_page);
    Ok(())
}
