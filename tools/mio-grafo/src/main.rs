use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use mio_render::{
    system_fonts, NetworkOutcome, NetworkRenderer, NetworkStyle, RenderOutcome, RouteRenderer, RouteStyle,
};
use mio_transit::{build_route_graphs, TransitNetwork};

#[derive(Parser, Debug)]
#[command(
    name = "mio-grafo",
    author,
    version,
    about = "Build per-route stop graphs for a transit network",
    long_about = "Reads the routes, stops and route-stop tables of a transit network, \
                  prints the ordered arc list of every route and orientation, and renders \
                  one image per route/orientation plus one image of the complete network."
)]
struct Args {
    /// Routes table (id, _, short name, description, ...)
    #[arg(long, default_value = "data/lines.csv")]
    routes: PathBuf,

    /// Stops table (id, _, short name, long name, _, _, longitude, latitude, ...)
    #[arg(long, default_value = "data/stops.csv")]
    stops: PathBuf,

    /// Route-stop table (_, sequence, orientation, route id, stop id, ...)
    #[arg(long, default_value = "data/linestops.csv")]
    route_stops: PathBuf,

    /// Directory for the per-route images
    #[arg(long, default_value = "GrafosRutasIndividuales")]
    routes_dir: PathBuf,

    /// Directory for the complete network image
    #[arg(long, default_value = "GrafoRutasCompletas")]
    network_dir: PathBuf,

    /// Print the arc report only, skip rendering
    #[arg(long)]
    report_only: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    log::info!("=== Transit Route Graph Builder ===");

    let network = TransitNetwork::load(&args.routes, &args.stops, &args.route_stops)
        .context("Failed to load transit tables")?;

    let graphs = build_route_graphs(&network);

    {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        graphs
            .write_report(&network, &mut out)
            .context("Failed to write arc report")?;
        out.flush().context("Failed to flush arc report")?;
    }

    if args.report_only {
        log::info!("Report only; no images rendered");
        return Ok(());
    }

    let fonts = system_fonts();

    log::info!("");
    log::info!("Rendering route images to {}", args.routes_dir.display());
    let route_renderer = RouteRenderer::with_fonts(RouteStyle::default(), fonts.clone());

    let pb = ProgressBar::new(graphs.paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("=> "),
    );

    let batch = route_renderer
        .render_all(&graphs, &network, &args.routes_dir, |path, outcome| {
            if let RenderOutcome::Written(file) = outcome {
                pb.set_message(file.display().to_string());
            } else {
                pb.set_message(format!("route {} skipped", path.route_id));
            }
            pb.inc(1);
        })
        .with_context(|| format!("Failed to render route images into {}", args.routes_dir.display()))?;
    pb.finish_and_clear();

    log::info!("  Written: {}", batch.written);
    log::info!("  Skipped: {}", batch.skipped);

    log::info!("");
    log::info!("Rendering network image to {}", args.network_dir.display());
    let network_renderer = NetworkRenderer::with_fonts(NetworkStyle::default(), fonts);
    let outcome = network_renderer
        .render_network(&graphs, &network, &args.network_dir)
        .with_context(|| format!("Failed to render network image into {}", args.network_dir.display()))?;

    match outcome {
        NetworkOutcome::Written { path, .. } => log::info!("Done: {}", path.display()),
        NetworkOutcome::Aborted => log::warn!("Network image not produced"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_directories() {
        let args = Args::try_parse_from(["mio-grafo"]).unwrap();
        assert_eq!(args.routes_dir, PathBuf::from("GrafosRutasIndividuales"));
        assert_eq!(args.network_dir, PathBuf::from("GrafoRutasCompletas"));
        assert!(!args.report_only);
    }

    #[test]
    fn test_input_paths_and_flags() {
        let args = Args::try_parse_from([
            "mio-grafo",
            "--routes",
            "in/lines.csv",
            "--stops",
            "in/stops.csv",
            "--route-stops",
            "in/linestops.csv",
            "--report-only",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.route_stops, PathBuf::from("in/linestops.csv"));
        assert!(args.report_only);
        assert!(args.verbose);
    }
}
