//! Pokedex Cache - show a creature card in the terminal
//!
//! Records and move descriptions are served from the local cache when
//! available and fetched from PokeAPI otherwise.

use clap::Parser;
use pokedex_cache::{render_text, Config, LookupKey, Pokedex, Resolution};
use std::path::PathBuf;

/// Show a pokemon's card, optionally with one move's description
#[derive(Parser, Debug)]
#[command(name = "pokedex_cache")]
#[command(version, about, long_about = None)]
struct Args {
    /// Pokemon name or national pokedex number
    pokemon: String,

    /// Also describe this move (name as listed on the card, e.g. thunder-shock)
    #[arg(short = 'm', long = "move")]
    move_name: Option<String>,

    /// PokeAPI base URL
    #[arg(long, env = "POKEDEX_BASE_URL", default_value = pokedex_cache::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Directory holding the cache files (default: ~/.cache/pokedex_cache)
    #[arg(long, env = "POKEDEX_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Version group whose flavor text describes moves
    #[arg(long, default_value = pokedex_cache::config::DEFAULT_VERSION_GROUP)]
    version_group: String,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = Config::default()
        .with_base_url(args.base_url)
        .with_version_group(args.version_group);
    if let Some(cache_dir) = args.cache_dir {
        config = config.with_cache_dir(cache_dir);
    }

    let key = match LookupKey::parse(&args.pokemon) {
        Ok(key) => key,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };

    let pokedex = Pokedex::open(&config);

    let record = match pokedex.records.resolve(&key).await {
        Resolution::Resolved(record) => record,
        Resolution::NotFound => {
            print!("{}", render_text(&pokedex.view(&key)));
            std::process::exit(1);
        }
        other => {
            log::error!("Unexpected resolution for {}: {:?}", key, other);
            std::process::exit(1);
        }
    };

    if let Some(move_name) = args.move_name {
        match record.find_move(&move_name) {
            Some(move_ref) => {
                pokedex.moves.resolve_ref(move_ref).await;
            }
            None => log::warn!("{} cannot learn {}", record.name, move_name),
        }
    }

    print!("{}", render_text(&pokedex.view(&key)));
}
