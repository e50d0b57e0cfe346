//! CLI for face shape analysis and eyewear recommendations.
//!
//! Usage:
//!   facefit analyze <image> --landmarks face.json     # Human-readable output
//!   facefit analyze <image> -l face.json --json       # JSON output
//!   facefit recommend oval -n 3                       # Styles for a known shape
//!   facefit styles heart --json                       # Every style, ranked

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use facefit::config::MAX_RECOMMENDATIONS;
use facefit::response::{
    AnalysisResponse, ErrorResponse, RecommendationsResponse, StylesResponse,
};
use facefit::{AppConfig, Error, ErrorKind, FaceFit, FaceShape, ProvidedLandmarks, Recommender};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "facefit")]
#[command(author, version, about = "Face shape analysis and eyewear recommendations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file, applied over XDG and project config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    json: bool,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify the face in a photo and recommend frames
    Analyze(AnalyzeArgs),
    /// Recommended frames for a face shape
    Recommend(RecommendArgs),
    /// All frames ranked for a face shape
    Styles(StylesArgs),
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Input image file
    image: PathBuf,

    /// Landmark JSON produced by a face-mesh detector for this image
    #[arg(short, long)]
    landmarks: PathBuf,

    /// Number of recommendations
    #[arg(short = 'n', long)]
    count: Option<usize>,
}

#[derive(Args, Debug)]
struct RecommendArgs {
    /// Face shape (oval, round, square, heart, oblong, diamond)
    shape: String,

    /// Number of recommendations
    #[arg(short = 'n', long)]
    count: Option<usize>,
}

#[derive(Args, Debug)]
struct StylesArgs {
    /// Face shape (oval, round, square, heart, oblong, diamond)
    shape: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let body = ErrorResponse::from(&e);
            if cli.json {
                match serde_json::to_string_pretty(&body) {
                    Ok(s) => println!("{s}"),
                    Err(_) => eprintln!("error: {}", body.error),
                }
            } else {
                eprintln!("error: {e}");
            }
            match e.kind() {
                ErrorKind::BadInput => ExitCode::from(2),
                ErrorKind::Internal => ExitCode::from(1),
            }
        }
    }
}

fn run(cli: &Cli) -> facefit::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    let output_str = match &cli.command {
        Command::Analyze(args) => {
            let count = resolve_count(args.count, &config)?;
            info!("Loading landmarks {:?}...", args.landmarks);
            let detector = ProvidedLandmarks::from_json(&read_input(&args.landmarks)?)?;
            info!("Loading image {:?}...", args.image);
            let image = read_input(&args.image)?;

            let report = FaceFit::new(detector)
                .recommendation_count(count)
                .analyze_image(&image)?;
            let response = AnalysisResponse::from(report);
            if cli.json {
                to_json(&response, &config)?
            } else {
                format_analysis(&args.image, &response)
            }
        }
        Command::Recommend(args) => {
            let face_shape = parse_shape(&args.shape)?;
            let count = resolve_count(args.count, &config)?;
            let recommendations = Recommender::default().recommend(face_shape, count)?;
            let response = RecommendationsResponse {
                face_shape,
                recommendations,
            };
            if cli.json {
                to_json(&response, &config)?
            } else {
                format_recommendations(&response)
            }
        }
        Command::Styles(args) => {
            let face_shape = parse_shape(&args.shape)?;
            let styles = Recommender::default().rank_all_styles(face_shape)?;
            let response = StylesResponse { face_shape, styles };
            if cli.json {
                to_json(&response, &config)?
            } else {
                format_styles(&response)
            }
        }
    };

    if let Some(ref path) = cli.output {
        std::fs::write(path, &output_str)?;
        info!("Output written to {:?}", path);
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

fn parse_shape(raw: &str) -> facefit::Result<FaceShape> {
    raw.parse()
        .map_err(|_| Error::InvalidRequest(format!("Unknown face shape: {raw}")))
}

fn resolve_count(requested: Option<usize>, config: &AppConfig) -> facefit::Result<usize> {
    match requested {
        Some(n) if n > MAX_RECOMMENDATIONS => Err(Error::InvalidRequest(format!(
            "count must be at most {MAX_RECOMMENDATIONS}"
        ))),
        Some(n) => Ok(n),
        None => Ok(config.recommendation_count()),
    }
}

fn to_json<T: Serialize>(value: &T, config: &AppConfig) -> facefit::Result<String> {
    let s = if config.pretty() {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    s.map_err(|e| Error::Io(e.into()))
}

fn read_input(path: &std::path::Path) -> facefit::Result<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| Error::InvalidRequest(format!("cannot read {}: {e}", path.display())))
}

fn format_analysis(image: &std::path::Path, response: &AnalysisResponse) -> String {
    let mut s = String::new();
    let details = &response.analysis_details;

    s.push_str(&format!("Image: {}\n", image.display()));
    s.push_str(&format!("Landmarks: {} points\n", response.landmarks_detected));
    s.push_str(&format!("Face shape: {}\n", response.face_shape));

    s.push_str("\nMeasurements:\n");
    s.push_str(&format!("  Face width:      {:.4}\n", details.measurements.face_width));
    s.push_str(&format!("  Face length:     {:.4}\n", details.measurements.face_length));
    s.push_str(&format!("  Jaw width:       {:.4}\n", details.measurements.jaw_width));
    s.push_str(&format!("  Forehead width:  {:.4}\n", details.measurements.forehead_width));

    s.push_str("\nRatios:\n");
    s.push_str(&format!("  Length/Width:    {:.2}\n", details.ratios.face_ratio));
    s.push_str(&format!("  Jaw/Cheekbone:   {:.2}\n", details.ratios.jaw_to_cheek));
    s.push_str(&format!("  Forehead/Cheek:  {:.2}\n", details.ratios.forehead_to_cheek));

    s.push('\n');
    s.push_str(&format_recommendation_list(&response.recommendations));
    s
}

fn format_recommendations(response: &RecommendationsResponse) -> String {
    let mut s = format!("Face shape: {}\n\n", response.face_shape);
    s.push_str(&format_recommendation_list(&response.recommendations));
    s
}

fn format_recommendation_list(recs: &[facefit::Recommendation]) -> String {
    let mut s = String::from("Recommended frames:\n");
    if recs.is_empty() {
        s.push_str("  (none)\n");
    }
    for (i, rec) in recs.iter().enumerate() {
        s.push_str(&format!(
            "  {}. {} ({:.0}%)\n     {}\n     {}\n",
            i + 1,
            rec.name,
            rec.confidence * 100.0,
            rec.description,
            rec.reason
        ));
    }
    s
}

fn format_styles(response: &StylesResponse) -> String {
    let mut s = format!("Face shape: {}\n\n", response.face_shape);
    for style in &response.styles {
        let marker = if style.suitable { "*" } else { " " };
        s.push_str(&format!(
            "  {} {:<20} {:.0}%\n",
            marker,
            style.name,
            style.confidence * 100.0
        ));
    }
    s.push_str("\n  * listed as suitable for this shape\n");
    s
}
