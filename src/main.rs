use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};

use gpx_route_profile::config::{default_widget_config_path, load_widget_config};
use gpx_route_profile::cursor_sync::{CursorSync, PointerEvent};
use gpx_route_profile::headless::{HeadlessChart, HeadlessMap};
use gpx_route_profile::profile_report::{
    save_summaries_to_csv, summarize_folder, write_profile_csv, ProfileSummary,
};
use gpx_route_profile::track_source::source_for;
use gpx_route_profile::{build_profile, TrackProfile, WidgetConfig};

// Pixel width of the replay chart's plotting area
const REPLAY_CHART_WIDTH_PX: f64 = 800.0;

fn print_help() {
    println!("\n🏔️  GPX ROUTE PROFILE");
    println!("=====================");
    println!("Usage: gpx-route-profile [--config <file>] <command> [args]");
    println!();
    println!("Commands:");
    println!("  profile <path|url> [--csv <out.csv>]   Summarize one track, optionally export it");
    println!("  batch <folder> [out.csv]               Summarize every GPX file under a folder");
    println!("  cursor <path|url> <px>...              Replay chart pointer positions (0-{} px)", REPLAY_CHART_WIDTH_PX);
}

fn main() -> Result<()> {
    // Set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let config_path = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            if i + 1 >= args.len() {
                bail!("--config needs a file path");
            }
            let path = PathBuf::from(args.remove(i + 1));
            args.remove(i);
            path
        }
        None => default_widget_config_path(),
    };
    let config = load_widget_config(&config_path);

    match args.first().map(|s| s.as_str()) {
        Some("profile") => run_profile(&args[1..], &config),
        Some("batch") => run_batch(&args[1..], &config),
        Some("cursor") => run_cursor(&args[1..], &config),
        _ => {
            print_help();
            Ok(())
        }
    }
}

fn load_profile(location: &str, config: &WidgetConfig) -> Result<TrackProfile> {
    let source = source_for(location, Duration::from_secs(config.fetch_timeout_secs));
    let text = source.fetch(location)?;
    let profile = build_profile(&text, config).with_context(|| format!("Failed to profile {}", location))?;
    Ok(profile)
}

fn run_profile(args: &[String], config: &WidgetConfig) -> Result<()> {
    let Some(location) = args.first() else {
        bail!("profile needs a track path or URL");
    };
    let csv_out = args
        .iter()
        .position(|a| a == "--csv")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from);

    let profile = load_profile(location, config)?;
    let filename = Path::new(location)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| location.clone());
    let summary = ProfileSummary::from_profile(&filename, &profile);

    println!("\n📊 ROUTE PROFILE: {}", summary.filename);
    println!("==================");
    println!("Points: {} ({} stages, parsed with {:?} strategy)", summary.points, summary.stages, profile.strategy());
    println!("Distance: {:.2} {}", summary.total_distance, summary.distance_unit);
    println!("Elevation gain: {:.0} {}", summary.elevation_gain, summary.elevation_unit);
    println!("Elevation loss: {:.0} {}", summary.elevation_loss, summary.elevation_unit);
    println!("Elevation range: {:.0} - {:.0} {}", summary.min_elevation, summary.max_elevation, summary.elevation_unit);
    if profile.repaired_elevations() > 0 {
        println!("⚠️  {} missing elevation readings carried forward", profile.repaired_elevations());
    }

    for (i, marker) in profile.stage_markers().iter().enumerate() {
        println!(
            "   {} Stage {} {}: {:.2} {} @ {:.0} {}",
            if marker.is_final { "🏁" } else { "📍" },
            i + 1,
            marker.label.as_deref().unwrap_or(""),
            marker.distance,
            summary.distance_unit,
            marker.elevation,
            summary.elevation_unit
        );
    }

    if let Some(path) = csv_out {
        write_profile_csv(&profile, &path).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("📁 Profile saved to: {}", path.display());
    }

    Ok(())
}

fn run_batch(args: &[String], config: &WidgetConfig) -> Result<()> {
    let Some(folder) = args.first() else {
        bail!("batch needs a folder");
    };
    let folder = Path::new(folder);
    let output = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| folder.join("route_profiles.csv"));

    println!("\n🔍 PROFILING GPX FOLDER: {}", folder.display());
    println!("⚡ Using parallel processing on {} cores", num_cpus::get());

    let summaries = summarize_folder(folder, config);
    let succeeded = summaries.iter().filter(|s| s.is_success()).count();

    println!("\n✅ Profiled {} out of {} GPX files", succeeded, summaries.len());
    for failed in summaries.iter().filter(|s| !s.is_success()) {
        println!("   ❌ {}: {}", failed.filename, failed.status);
    }

    if summaries.is_empty() {
        println!("⚠️  No GPX files found");
        return Ok(());
    }

    save_summaries_to_csv(&summaries, &output).with_context(|| format!("Failed to write {}", output.display()))?;
    println!("📁 Results saved to: {}", output.display());
    Ok(())
}

fn run_cursor(args: &[String], config: &WidgetConfig) -> Result<()> {
    let Some(location) = args.first() else {
        bail!("cursor needs a track path or URL");
    };
    let profile = load_profile(location, config)?;
    let series = profile.series();

    let mut chart = HeadlessChart::new(0.0, REPLAY_CHART_WIDTH_PX, series.total_distance());
    let mut map = HeadlessMap::default();
    let mut sync = CursorSync::new(series, config.primary_series_index);

    for raw in &args[1..] {
        let pixel_x: f64 = raw.parse().with_context(|| format!("Not a pixel position: {}", raw))?;
        sync.dispatch(PointerEvent::Move { pixel_x }, &mut map, &mut chart);

        if let Some(index) = sync.state().active_index {
            let point = series.points()[index];
            println!(
                "px {:>6.1} -> point {:>5}  {:.3} {}  {:.0} {}  ({:.5}, {:.5})",
                pixel_x,
                index,
                series.cumulative_distance()[index],
                series.units().distance_label(),
                series.elevation()[index],
                series.units().elevation_label(),
                point.latitude_deg,
                point.longitude_deg
            );
        }
    }

    sync.dispatch(PointerEvent::Leave, &mut map, &mut chart);
    Ok(())
}
