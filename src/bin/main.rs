use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut custom_config_path: Option<PathBuf> = None;

    match args.get(1).map(|s| s.as_str()) {
        Some("--version") => {
            println!("fluxsnap {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some("--help") | Some("-h") => {
            print_help();
            return Ok(());
        }
        Some("--init") => {
            init_config()?;
            return Ok(());
        }
        Some("--config") | Some("-c") => {
            if let Some(path) = args.get(2) {
                custom_config_path = Some(PathBuf::from(path));
            } else {
                eprintln!("Error: --config requires a path argument");
                std::process::exit(1);
            }
        }
        Some(other) => {
            eprintln!("Error: unknown option {}", other);
            print_help();
            std::process::exit(1);
        }
        None => {}
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fluxsnap=info")),
        )
        .init();

    let config = load_config(custom_config_path)?;

    let mut snapper = fluxsnap::snapper::Snapper::new(config)
        .with_context(|| "Failed to start fluxsnap")?;
    snapper.run()?;

    Ok(())
}

fn load_config(custom_path: Option<PathBuf>) -> Result<fluxsnap::Config> {
    let config_path = match custom_path {
        Some(path) => path,
        None => match get_config_path().map(|dir| dir.join("config.ron")) {
            Some(path) if path.exists() => path,
            _ => {
                tracing::info!("No config file found, using defaults");
                return Ok(fluxsnap::Config::default());
            }
        },
    };

    let config_str = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file {:?}", config_path))?;

    tracing::info!("Loading config from {:?}", config_path);
    fluxsnap::config::parse_config(&config_str).with_context(|| "Failed to parse RON config")
}

fn init_config() -> Result<()> {
    let config_dir = get_config_path().context("Could not find config directory")?;
    std::fs::create_dir_all(&config_dir)?;

    let config_template = include_str!("../../templates/config.ron");
    let config_path = config_dir.join("config.ron");

    if config_path.exists() {
        println!("Config already exists at {:?}, leaving it untouched", config_path);
        return Ok(());
    }

    std::fs::write(&config_path, config_template)?;

    println!("✓ Config created at {:?}", config_path);
    println!("  Edit the file and restart fluxsnap to apply it");

    Ok(())
}

fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("fluxsnap"))
}

fn print_help() {
    println!("fluxsnap - tile and edge-snap windows under an existing window manager\n");
    println!("USAGE:");
    println!("    fluxsnap [OPTIONS]\n");
    println!("OPTIONS:");
    println!("    --init              Create default config in ~/.config/fluxsnap/config.ron");
    println!("    -c, --config <PATH> Use custom config file");
    println!("    --version           Print version information");
    println!("    -h, --help          Print this help message\n");
    println!("USAGE NOTES:");
    println!("    Super+Space               Tile all windows on the current desktop");
    println!("    Super+Shift+1..9          Pin the active window to a zone");
    println!("    Super+Shift+0             Clear the pin");
    println!("    Super+drag                Snap a window to an edge, corner or half\n");
    println!("LOGGING:");
    println!("    Set RUST_LOG=fluxsnap=debug for detailed output");
}
