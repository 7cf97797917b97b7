use rgallery::{
    AppConfigs, CancellationToken, DemoPhotoRepository, PhotoQuery, PhotoRepository, UnsplashRepository,
};
use anyhow::{Context, Result};
use std::env;

struct Config {
    query: String,
    page: u32,
    per_page: Option<u32>,
    order_by: Option<String>,
    photo_id: Option<String>,
    demo: bool,
    pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            query: String::new(),
            page: 1,
            per_page: None,
            order_by: None,
            photo_id: None,
            demo: false,
            pretty: false,
        }
    }
}

fn parse_args() -> Result<Config> {
    let args: Vec<String> = env::args().collect();
    let mut config = Config::default();
    let mut terms = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-page" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-page requires an argument");
                }
                config.page = args[i].parse().context("-page expects a number")?;
            }
            "-per_page" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-per_page requires an argument");
                }
                config.per_page = Some(args[i].parse().context("-per_page expects a number")?);
            }
            "-order" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-order requires an argument");
                }
                config.order_by = Some(args[i].clone());
            }
            "-id" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-id requires a photo id argument");
                }
                config.photo_id = Some(args[i].clone());
            }
            "-demo" => {
                config.demo = true;
            }
            "-pretty" => {
                config.pretty = true;
            }
            "-h" | "-help" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            arg if arg.starts_with('-') => {
                eprintln!("Warning: Unknown argument: {}", arg);
            }
            term => terms.push(term.to_string()),
        }
        i += 1;
    }

    config.query = terms.join(" ");
    Ok(config)
}

fn print_help() {
    println!("Photo search client");
    println!("Usage: gallery-search [OPTIONS] [QUERY...]");
    println!();
    println!("Searches photos and prints them as JSON, followed by the pagination cursors.");
    println!("An empty query searches for the default term.");
    println!();
    println!("OPTIONS:");
    println!("  -page <N>              Page to fetch (default: 1)");
    println!("  -per_page <N>          Photos per page (default: 30)");
    println!("  -order <ORDER>         Sort order: latest or relevant (default: latest)");
    println!("  -id <ID>               Fetch a single photo instead of searching");
    println!("  -demo                  Use generated demo photos (no access key needed)");
    println!("  -pretty                Pretty-print the JSON output");
    println!("  -h, -help, --help      Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("  UNSPLASH_ACCESS_KEY    API access key (required unless -demo)");
    println!("  UNSPLASH_API_URL       API base URL (default: https://api.unsplash.com)");
    println!("  RUST_LOG               Log level, e.g. debug");
}

fn main() -> Result<()> {
    env_logger::init();
    let config = parse_args()?;

    let mut configs = AppConfigs::from_env();
    if let Some(per_page) = config.per_page {
        configs.search.per_page = per_page;
    }
    if let Some(order_by) = &config.order_by {
        configs.search.order_by = order_by.clone();
    }

    let repository: Box<dyn PhotoRepository> = if config.demo {
        Box::new(DemoPhotoRepository::new())
    } else {
        configs.validate()?;
        Box::new(UnsplashRepository::new(&configs)?)
    };
    let token = CancellationToken::new();

    let output = match &config.photo_id {
        Some(id) => {
            let photo = repository
                .fetch_photo_by_id(id, &token)
                .with_context(|| format!("fetching photo {}", id))?;
            serde_json::json!({ "photo": photo })
        }
        None => {
            let query = PhotoQuery::new(&config.query, config.page, &configs.search);
            let page = repository
                .fetch_photos(&query, &token)
                .with_context(|| format!("searching '{}' page {}", query.text, query.page))?;
            let cursors: serde_json::Map<String, serde_json::Value> = page
                .cursors
                .iter()
                .map(|(rel, page)| (rel.to_string(), page.into()))
                .collect();
            serde_json::json!({
                "query": query.text,
                "page": query.page,
                "photos": page.photos,
                "cursors": cursors,
            })
        }
    };

    let text = if config.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", text);

    Ok(())
}
