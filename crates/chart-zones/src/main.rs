//! Chart Zones - command-line entry point

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use annotation::{ChartSession, ToolType};
use stroke_classifier::{normalize_to_canvas, ClassifierConfig, DetectionResult, StrokeClassifier, ZoneCandidate};
use zone_catalog::{BodyArea, Gender, Point, ZoneCatalog};

/// Inspect the anatomical zone catalog and classify charting strokes
#[derive(Parser, Debug)]
#[command(name = "chart-zones", version)]
#[command(about = "Zone catalog and stroke classification tool", long_about = None)]
struct Cli {
    /// Classifier config file (TOML, YAML or JSON); CHARTING_* env vars override
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List zones for a body area, most specific first
    Zones {
        #[command(flatten)]
        anatomy: AnatomyArgs,

        /// Only risk-flagged zones
        #[arg(long)]
        danger: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Classify strokes read as JSON (array of point arrays)
    Classify {
        #[command(flatten)]
        anatomy: AnatomyArgs,

        #[command(flatten)]
        input: InputArgs,

        /// Also list every zone each path visits
        #[arg(long)]
        multi: bool,
    },

    /// Commit strokes into a chart session and print the per-zone summary
    Summary {
        #[command(flatten)]
        anatomy: AnatomyArgs,

        #[command(flatten)]
        input: InputArgs,

        /// Tool recorded on every stroke
        #[arg(short, long, value_enum, default_value = "brush")]
        tool: ToolArg,
    },
}

#[derive(clap::Args, Debug)]
struct AnatomyArgs {
    /// Body area: face, torso, torso-back, full-body
    #[arg(short, long, default_value = "face")]
    area: BodyArea,

    /// Anatomical variant: female, male
    #[arg(short, long, default_value = "female")]
    gender: Gender,
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Stroke file; stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Treat coordinates as canvas pixels of this size (e.g. 800x900)
    #[arg(long, value_parser = parse_canvas)]
    canvas: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ToolArg {
    Brush,
    Cannula,
    Shape,
    Vein,
    Freehand,
    Arrow,
    Measurement,
}

impl From<ToolArg> for ToolType {
    fn from(arg: ToolArg) -> Self {
        match arg {
            ToolArg::Brush => ToolType::Brush,
            ToolArg::Cannula => ToolType::Cannula,
            ToolArg::Shape => ToolType::Shape,
            ToolArg::Vein => ToolType::Vein,
            ToolArg::Freehand => ToolType::Freehand,
            ToolArg::Arrow => ToolType::Arrow,
            ToolArg::Measurement => ToolType::Measurement,
        }
    }
}

fn parse_canvas(value: &str) -> Result<(f64, f64), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", value))?;
    let width: f64 = w.trim().parse().map_err(|_| format!("bad width '{}'", w))?;
    let height: f64 = h.trim().parse().map_err(|_| format!("bad height '{}'", h))?;
    if !(width > 0.0 && height > 0.0) {
        return Err("canvas dimensions must be positive".into());
    }
    Ok((width, height))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ZoneRow<'a> {
    id: &'a str,
    name: &'a str,
    category: zone_catalog::ZoneCategory,
    priority: u32,
    danger: bool,
    fallback: bool,
    display_color: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Classified {
    index: usize,
    detection: DetectionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    visited_zones: Option<Vec<ZoneCandidate>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StrokeFile {
    Many(Vec<Vec<Point>>),
    One(Vec<Point>),
}

/// Initialize logging on stderr; stdout carries results
fn init_logging(verbose: bool) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Logging unavailable: {}", e);
    }
}

fn read_strokes(args: &InputArgs) -> Result<Vec<Vec<Point>>> {
    let raw = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read strokes from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read strokes from stdin")?;
            buf
        }
    };

    let parsed: StrokeFile = serde_json::from_str(&raw).context("Stroke input is not valid JSON")?;
    let strokes = match parsed {
        StrokeFile::Many(strokes) => strokes,
        StrokeFile::One(points) => vec![points],
    };

    Ok(match args.canvas {
        Some((width, height)) => strokes
            .iter()
            .map(|points| {
                let pixels: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
                normalize_to_canvas(&pixels, width, height)
            })
            .collect(),
        None => strokes,
    })
}

fn build_classifier(config: Option<&PathBuf>) -> Result<Arc<StrokeClassifier>> {
    let config = ClassifierConfig::load(config.map(PathBuf::as_path)).context("Invalid classifier config")?;
    let catalog = ZoneCatalog::builtin().context("Built-in zone catalog failed to load")?;
    Ok(Arc::new(StrokeClassifier::new(Arc::new(catalog), config)))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    info!("=== Chart Zones v{} ===", env!("CARGO_PKG_VERSION"));
    let classifier = build_classifier(cli.config.as_ref())?;

    match cli.command {
        Command::Zones { anatomy, danger, json } => {
            let catalog = classifier.catalog();
            let zones: Vec<_> = if danger {
                catalog.danger_zones(anatomy.area, anatomy.gender)
            } else {
                catalog.zones_for(anatomy.area, anatomy.gender).iter().collect()
            };

            if json {
                let rows: Vec<ZoneRow<'_>> = zones
                    .iter()
                    .map(|z| ZoneRow {
                        id: z.id.as_str(),
                        name: &z.name,
                        category: z.category,
                        priority: z.priority,
                        danger: z.is_danger_zone(),
                        fallback: z.fallback,
                        display_color: &z.display_color,
                    })
                    .collect();
                print_json(&rows)?;
            } else {
                println!("{} zones for {} ({:?}), catalog v{}", zones.len(), anatomy.area, anatomy.gender, catalog.version());
                for z in zones {
                    println!(
                        "  {:>3}  {:<24} {}{}",
                        z.priority,
                        z.id.as_str(),
                        z.name,
                        if z.is_danger_zone() {
                            "  [danger]"
                        } else if z.fallback {
                            "  [fallback]"
                        } else {
                            ""
                        }
                    );
                }
            }
        }

        Command::Classify { anatomy, input, multi } => {
            let strokes = read_strokes(&input)?;
            let results: Vec<Classified> = strokes
                .iter()
                .enumerate()
                .map(|(index, points)| Classified {
                    index,
                    detection: classifier.detect_zone_from_stroke(points, anatomy.area, anatomy.gender),
                    visited_zones: multi
                        .then(|| classifier.detect_multiple_zones(points, anatomy.area, anatomy.gender)),
                })
                .collect();
            print_json(&results)?;
        }

        Command::Summary { anatomy, input, tool } => {
            let strokes = read_strokes(&input)?;
            let mut session = ChartSession::new(Arc::clone(&classifier), anatomy.area, anatomy.gender);
            let layer = session.add_layer("Imported")?;

            for points in strokes {
                let handle = session.begin_stroke(tool.into());
                for point in points {
                    session.append_point(handle, point)?;
                }
                session.commit_stroke(handle, layer)?;
            }
            print_json(&session.strokes_by_zone())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canvas() {
        assert_eq!(parse_canvas("800x900"), Ok((800.0, 900.0)));
        assert_eq!(parse_canvas("1024X768"), Ok((1024.0, 768.0)));
        assert!(parse_canvas("800").is_err());
        assert!(parse_canvas("0x10").is_err());
        assert!(parse_canvas("ax10").is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["chart-zones", "zones", "--area", "torso-back", "--gender", "male", "--danger"]).unwrap();
        match cli.command {
            Command::Zones { anatomy, danger, json } => {
                assert_eq!(anatomy.area, BodyArea::TorsoBack);
                assert_eq!(anatomy.gender, Gender::Male);
                assert!(danger);
                assert!(!json);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let cli = Cli::try_parse_from(["chart-zones", "-v", "summary", "--tool", "cannula", "--canvas", "400x450"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Summary { tool, input, .. } => {
                assert!(matches!(tool, ToolArg::Cannula));
                assert_eq!(input.canvas, Some((400.0, 450.0)));
                assert!(input.input.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_command_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
