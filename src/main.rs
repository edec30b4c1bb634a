use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use sat_o_map::config::Config;
use sat_o_map::fetch::{Fetch, HttpFetcher};
use sat_o_map::map::{MapRenderer, MapState, Projection};
use sat_o_map::surface::Surface;
use sat_o_map::track::{ObserverPosition, SatelliteSelection, TrackAnimator};
use sat_o_map::web;

#[derive(Parser)]
#[command(name = "sat-o-map")]
#[command(about = "World map with animated satellite ground-tracks")]
struct Cli {
    /// YAML config file; defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the map widget and its API
    Serve,
    /// Draw the world map once and write it as SVG
    RenderMap {
        #[arg(short, long, default_value = "map.svg")]
        out: PathBuf,
    },
    /// Run one animation cycle and write the map with the final tracks as SVG
    Track {
        /// NORAD ids of the satellites to track
        #[arg(short, long = "sat", required = true)]
        satellites: Vec<u32>,
        #[arg(long, allow_hyphen_values = true)]
        latitude: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        longitude: Option<f64>,
        #[arg(long)]
        elevation: Option<f64>,
        /// Minutes of track to request
        #[arg(short, long)]
        duration: Option<u32>,
        #[arg(short, long, default_value = "track.svg")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Serve => serve(config).await,
        Commands::RenderMap { out } => render_map(config, &out).await,
        Commands::Track {
            satellites,
            latitude,
            longitude,
            elevation,
            duration,
            out,
        } => {
            let mut observer = config.observer.unwrap_or(ObserverPosition {
                latitude: 0.0,
                longitude: 0.0,
                elevation: 0.0,
                altitude: 0.0,
                duration: 10,
            });
            if let Some(v) = latitude {
                observer.latitude = v;
            }
            if let Some(v) = longitude {
                observer.longitude = v;
            }
            if let Some(v) = elevation {
                observer.elevation = v;
            }
            if let Some(v) = duration {
                observer.duration = v;
            }
            track(config, satellites, observer, &out).await
        }
    }
}

fn load_config(path: Option<&str>) -> Result<Config, sat_o_map::config::ConfigError> {
    match path {
        Some(path) => Config::from_file(path),
        None => {
            let mut config = Config::default();
            config.apply_env();
            Ok(config)
        }
    }
}

fn http_fetcher(config: &Config) -> Option<Arc<dyn Fetch>> {
    match HttpFetcher::new(config.http.timeout) {
        Ok(f) => Some(Arc::new(f)),
        Err(e) => {
            eprintln!("HTTP client error: {}", e);
            None
        }
    }
}

async fn serve(config: Config) -> ExitCode {
    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn mounted_map(config: &Config, fetcher: &dyn Fetch) -> Option<MapRenderer> {
    let mut renderer = MapRenderer::new(config.map.clone());
    renderer.mount(fetcher).await;
    match renderer.state() {
        MapState::Drawn { .. } => Some(renderer),
        MapState::Blank => None,
    }
}

async fn render_map(config: Config, out: &Path) -> ExitCode {
    let Some(fetcher) = http_fetcher(&config) else {
        return ExitCode::FAILURE;
    };
    let Some(renderer) = mounted_map(&config, fetcher.as_ref()).await else {
        eprintln!("World map could not be loaded");
        return ExitCode::FAILURE;
    };
    write_svg(out, &renderer.surface().to_svg()).await
}

async fn track(
    config: Config,
    satellites: Vec<u32>,
    observer: ObserverPosition,
    out: &Path,
) -> ExitCode {
    let Some(fetcher) = http_fetcher(&config) else {
        return ExitCode::FAILURE;
    };
    let renderer = mounted_map(&config, fetcher.as_ref()).await;
    if renderer.is_none() {
        log::warn!("World map unavailable, writing tracks only");
    }

    let base = renderer
        .as_ref()
        .map(|r| r.surface().clone())
        .unwrap_or_else(|| Surface::new(config.map.width, config.map.height));
    let animator = TrackAnimator::new(
        config.satellites.clone(),
        Projection::kavrayskiy7(config.map.scale, config.map.width, config.map.height),
        config.map.width,
        config.map.height,
        fetcher,
    );

    let selection = satellites
        .into_iter()
        .map(|satid| SatelliteSelection {
            satid,
            satname: satid.to_string(),
            int_designator: None,
            launch_date: None,
        })
        .collect();
    let handle = match animator.request(selection, observer) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("Track request failed: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = handle.await {
        eprintln!("Animation task failed: {}", e);
        return ExitCode::FAILURE;
    }

    let status = animator.status();
    if status.frames_drawn == 0 {
        eprintln!("No frames drawn, see log for the fetch error");
        return ExitCode::FAILURE;
    }
    println!("Drew {} frames", status.frames_drawn);
    write_svg(out, &animator.render_over(&base)).await
}

async fn write_svg(out: &Path, svg: &str) -> ExitCode {
    match tokio::fs::write(out, svg).await {
        Ok(()) => {
            println!("Wrote {}", out.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error writing {}: {}", out.display(), e);
            ExitCode::FAILURE
        }
    }
}
