use clap::Parser;
use directions_client::{
    sdk::util::log::init_logging, Credentials, Directions, DirectionsOptions, Profile, Waypoint,
};
use std::{error::Error, fs::File, io::Write, path::PathBuf};

/// A CLI tool to request routes or map matches from a directions server
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Waypoints as semicolon-separated "lon,lat" pairs
    /// (e.g., "2.35,48.85;2.36,48.86")
    #[arg(short, long)]
    waypoints: String,

    /// The routing profile (driving, driving-traffic, walking, cycling)
    #[arg(short, long, default_value = "driving")]
    profile: Profile,

    /// Query the map-matching service instead of the route service
    #[arg(long = "match")]
    match_service: bool,

    /// Request alternative routes alongside the preferred one
    #[arg(long)]
    alternatives: bool,

    /// [Optional] Write the response JSON to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_waypoints(input: &str) -> Result<Vec<Waypoint>, Box<dyn Error>> {
    input
        .split(';')
        .map(|pair| {
            let mut parts = pair.split(',');
            let lon: f64 = parts.next().ok_or("missing longitude")?.trim().parse()?;
            let lat: f64 = parts.next().ok_or("missing latitude")?.trim().parse()?;
            Ok(Waypoint::new((lon, lat)))
        })
        .collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let waypoints = parse_waypoints(&cli.waypoints)?;
    if waypoints.len() < 2 {
        return Err("at least two waypoints are required".into());
    }
    log::info!(
        "Requesting a {} {} through {} waypoints",
        cli.profile,
        if cli.match_service { "match" } else { "route" },
        waypoints.len()
    );

    let mut options = DirectionsOptions::new(waypoints, cli.profile);
    options.include_alternatives = cli.alternatives;

    let credentials = Credentials::from_env()?;
    let directions = Directions::new(credentials)?;

    let response = if cli.match_service {
        directions.calculate_matches(&options)?
    } else {
        directions.calculate_routes(&options)?
    };

    let route_count = response.routes.as_ref().map_or(0, |routes| routes.len());
    log::info!("Received {} route(s)", route_count);

    let json_output = serde_json::to_string_pretty(&response)?;
    match cli.output {
        Some(path) => {
            let mut file = File::create(&path)?;
            file.write_all(json_output.as_bytes())?;
            log::info!("Response written to {}", path.display());
        }
        None => println!("{}", json_output),
    }

    Ok(())
}
