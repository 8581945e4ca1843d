use std::{path::PathBuf, process};

use anyhow::{Context, Result};
use essentials::{debug, info};
use router::{FileProvider, Router};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "router", about = "Resolve a request against a route file")]
struct Opt {
    /// JSON file with route declarations
    #[structopt(short, long, parse(from_os_str))]
    routes: PathBuf,

    /// File used to cache the parsed routes
    #[structopt(short, long, parse(from_os_str))]
    cache: Option<PathBuf>,

    /// Request method, empty string matches any
    method: String,

    /// Request uri
    uri: String,
}

fn main() -> Result<()> {
    essentials::install();
    let opt = Opt::from_args();
    debug!(?opt, "Starting router");
    let provider = match opt.cache {
        Some(cache) => FileProvider::new(opt.routes).with_cache(cache),
        None => FileProvider::new(opt.routes),
    };
    let router = Router::from_provider(&provider)?;
    match router.route(&opt.method, &opt.uri) {
        Some(matched) => {
            let output =
                serde_json::to_string_pretty(&matched).context("Failed to serialize match")?;
            println!("{output}");
            Ok(())
        }
        None => {
            info!(method = opt.method.as_str(), uri = opt.uri.as_str(), "No route matched");
            process::exit(1);
        }
    }
}
