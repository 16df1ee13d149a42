//! Run command - overlay expression-matched emoji on photos.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use emojify_adapters::{
    default_assets_dir, AssetLibrary, FsImageSink, FsImageSource, ManifestFaceDetector,
};
use emojify_core::{
    classifier, Emojifier, EmojifyReport, ImageSink, ImageSource, ProgressEvent, ProgressSink,
    ResultOutput, Thresholds,
};
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Parse and validate a threshold value (0.0-1.0).
fn parse_threshold(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Shared arguments for emojifying photos.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunArgs {
    /// Files or directories to emojify
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Directory holding `<stem>.faces.json` manifests (default: next to each photo)
    #[arg(long, value_name = "DIR")]
    pub faces_dir: Option<PathBuf>,

    /// Directory holding the emoji stickers (overrides default and config)
    #[arg(long, value_name = "DIR")]
    pub assets_dir: Option<PathBuf>,

    /// Directory for emojified images (default: next to each photo)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Smiling probability above which a face counts as smiling (0.0-1.0)
    #[arg(long, value_parser = parse_threshold)]
    pub smiling_threshold: Option<f32>,

    /// Eye-open probability above which an eye counts as open (0.0-1.0)
    #[arg(long, value_parser = parse_threshold)]
    pub eye_open_threshold: Option<f32>,

    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Report what would be drawn without writing any image
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        args.smiling_threshold = args
            .smiling_threshold
            .or(config.classifier.smiling_threshold);
        args.eye_open_threshold = args
            .eye_open_threshold
            .or(config.classifier.eye_open_threshold);

        if args.faces_dir.is_none() {
            args.faces_dir.clone_from(&config.faces.dir);
        }
        if args.assets_dir.is_none() {
            args.assets_dir.clone_from(&config.assets.dir);
        }
        if args.output_dir.is_none() {
            args.output_dir.clone_from(&config.output.dir);
        }

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }

    /// Classification thresholds with fallback to the built-in defaults.
    fn thresholds(&self) -> Thresholds {
        Thresholds {
            smiling: self
                .smiling_threshold
                .unwrap_or(classifier::SMILING_THRESHOLD),
            eye_open: self
                .eye_open_threshold
                .unwrap_or(classifier::EYE_OPEN_THRESHOLD),
        }
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }
}

/// Result of running the run command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct RunResult {
    /// Number of photos processed.
    pub processed: usize,
    /// Number of photos skipped.
    pub skipped: usize,
    /// Number of photos with no faces.
    pub no_faces: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the run command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &RunArgs) -> Result<RunResult> {
    info!("Running emojify on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let assets_dir = args.assets_dir.clone().unwrap_or_else(default_assets_dir);
    debug!("Using sticker directory: {}", assets_dir.display());
    let assets = AssetLibrary::load(&assets_dir)?;
    if assets.is_empty() {
        warn!(
            "No stickers found in {}; photos will be left unchanged",
            assets.dir().display()
        );
    }

    let detector = args
        .faces_dir
        .as_ref()
        .map_or_else(ManifestFaceDetector::sidecar, ManifestFaceDetector::in_dir);

    let emojifier = Emojifier::new(Box::new(detector), Box::new(assets))
        .with_thresholds(args.thresholds());

    let source = FsImageSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let sink = FsImageSink::new(args.output_dir.clone());
    let output = JsonOutput::stdout();

    process_images(&source, &emojifier, &sink, &output, &progress_bar, args)
}

/// Emojify each photo, write the result and report it.
fn process_images(
    source: &dyn ImageSource,
    emojifier: &Emojifier,
    sink: &dyn ImageSink,
    output: &JsonOutput,
    progress: &dyn ProgressSink,
    args: &RunArgs,
) -> Result<RunResult> {
    let total = source.count_hint();
    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut no_faces = 0usize;
    let mut all_reports: Vec<EmojifyReport> = Vec::new();

    for (index, image_result) in source.images().enumerate() {
        let image = match image_result {
            Ok(img) => img,
            Err(e) => {
                progress.on_event(ProgressEvent::Skipped {
                    path: format!("image {index}"),
                    reason: format!("{e:#}"),
                });
                skipped += 1;
                continue;
            }
        };

        let path = image.path.clone();

        progress.on_event(ProgressEvent::Started {
            path: path.clone(),
            index,
            total,
        });

        let emojified = match emojifier.emojify(&image) {
            Ok(e) => e,
            Err(e) => {
                progress.on_event(ProgressEvent::Skipped {
                    path,
                    reason: format!("{e:#}"),
                });
                skipped += 1;
                continue;
            }
        };

        // Photos without a face are reported but not rewritten.
        let written = if args.dry_run || !emojified.found_faces() {
            None
        } else {
            match sink.save(&path, &emojified.image) {
                Ok(location) => Some(location),
                Err(e) => {
                    progress.on_event(ProgressEvent::Skipped {
                        path,
                        reason: format!("{e:#}"),
                    });
                    skipped += 1;
                    continue;
                }
            }
        };

        if !emojified.found_faces() {
            no_faces += 1;
        }

        let report = EmojifyReport {
            path,
            output: written,
            timestamp: iso_timestamp(),
            dimensions: image.dimensions(),
            faces: emojified.faces,
        };

        progress.on_event(ProgressEvent::Completed {
            report: report.clone(),
        });

        match args.format() {
            OutputFormat::Jsonl => output.write(&report)?,
            OutputFormat::Json => all_reports.push(report),
        }

        processed += 1;
    }

    if matches!(args.format(), OutputFormat::Json) {
        output.write_array(&all_reports, args.pretty)?;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished { processed, skipped });

    let exit_code = if no_faces > 0 {
        ExitCode::NoFacesFound
    } else {
        ExitCode::Success
    };

    Ok(RunResult {
        processed,
        skipped,
        no_faces,
        exit_code,
    })
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;
    use emojify_test_support::{
        MockAssets, MockFaceDetector, MockImageSink, MockImageSource, MockProgressSink,
        SyntheticImageBuilder,
    };

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        run: RunArgs,
    }

    fn parse(args: &[&str]) -> RunArgs {
        TestCli::try_parse_from(std::iter::once("emojify").chain(args.iter().copied()))
            .unwrap()
            .run
    }

    fn test_args(dry_run: bool) -> RunArgs {
        let mut args = parse(&["photo.jpg", "--quiet"]);
        args.dry_run = dry_run;
        args
    }

    fn null_output() -> JsonOutput {
        JsonOutput::new(Box::new(std::io::sink()))
    }

    #[test]
    fn test_process_images_counts_and_saves() {
        let with_face = SyntheticImageBuilder::rgb_uniform(100, 100, 255, 255, 255);
        let without_face = SyntheticImageBuilder::gradient(100, 100);
        let source = MockImageSource::new(vec![with_face, without_face]).with_failure("corrupt");

        let detector =
            MockFaceDetector::new(vec![SyntheticImageBuilder::smiling_face(10.0, 10.0, 50.0)])
                .with_faces_for("synthetic://gradient", vec![]);
        let emojifier = Emojifier::new(
            Box::new(detector),
            Box::new(MockAssets::solid(8, 8, [255, 0, 0, 255])),
        );
        let sink = MockImageSink::new();
        let progress = MockProgressSink::new();

        let result = process_images(
            &source,
            &emojifier,
            &sink,
            &null_output(),
            &progress,
            &test_args(false),
        )
        .unwrap();

        assert_eq!(result.processed, 2);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.no_faces, 1);
        assert_eq!(result.exit_code, ExitCode::NoFacesFound);

        // Only the photo with a face is written.
        let saved = sink.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, "synthetic://rgb_uniform");

        assert_eq!(progress.completed_count(), 2);
        assert_eq!(progress.skipped_count(), 1);
        assert_eq!(progress.finished_counts(), Some((2, 1)));
    }

    #[test]
    fn test_process_images_dry_run_saves_nothing() {
        let source = MockImageSource::new(vec![SyntheticImageBuilder::rgb_uniform(
            100, 100, 0, 0, 0,
        )]);
        let detector =
            MockFaceDetector::new(vec![SyntheticImageBuilder::frowning_face(10.0, 10.0, 50.0)]);
        let emojifier = Emojifier::new(
            Box::new(detector),
            Box::new(MockAssets::solid(8, 8, [0, 0, 255, 255])),
        );
        let sink = MockImageSink::new();
        let progress = MockProgressSink::new();

        let result = process_images(
            &source,
            &emojifier,
            &sink,
            &null_output(),
            &progress,
            &test_args(true),
        )
        .unwrap();

        assert_eq!(result.exit_code, ExitCode::Success);
        assert!(sink.saved().is_empty());
    }

    #[test]
    fn test_process_images_detector_failure_skips() {
        let source = MockImageSource::new(vec![SyntheticImageBuilder::gradient(10, 10)]);
        let emojifier = Emojifier::new(
            Box::new(MockFaceDetector::failing()),
            Box::new(MockAssets::empty()),
        );
        let progress = MockProgressSink::new();

        let result = process_images(
            &source,
            &emojifier,
            &MockImageSink::new(),
            &null_output(),
            &progress,
            &test_args(false),
        )
        .unwrap();

        assert_eq!(result.processed, 0);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.exit_code, ExitCode::Success);
    }

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold("0.25"), Ok(0.25));
        assert!(parse_threshold("1.5").is_err());
        assert!(parse_threshold("abc").is_err());
    }

    #[test]
    fn test_default_thresholds() {
        let args = parse(&["photo.jpg"]);
        let t = args.thresholds();
        assert!((t.smiling - 0.15).abs() < f32::EPSILON);
        assert!((t.eye_open - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_config_fills_unset_values() {
        let config: AppConfig = toml::from_str(
            r"
[general]
recursive = true

[classifier]
smiling_threshold = 0.4

[faces]
dir = '/manifests'

[output]
format = 'json'
pretty = true
",
        )
        .unwrap();

        let args = RunArgs::with_config(parse(&["photo.jpg"]), &config);

        assert!(args.recursive);
        assert_eq!(args.smiling_threshold, Some(0.4));
        assert_eq!(args.faces_dir, Some(PathBuf::from("/manifests")));
        assert!(matches!(args.format(), OutputFormat::Json));
        assert!(args.pretty);
    }

    #[test]
    fn test_cli_overrides_config() {
        let config: AppConfig = toml::from_str(
            r"
[classifier]
smiling_threshold = 0.4
eye_open_threshold = 0.7

[output]
format = 'json'
dir = '/config/out'
",
        )
        .unwrap();

        let args = RunArgs::with_config(
            parse(&[
                "photo.jpg",
                "--smiling-threshold",
                "0.2",
                "--format",
                "jsonl",
                "-o",
                "/cli/out",
            ]),
            &config,
        );

        assert_eq!(args.smiling_threshold, Some(0.2));
        assert_eq!(args.eye_open_threshold, Some(0.7));
        assert!(matches!(args.format(), OutputFormat::Jsonl));
        assert_eq!(args.output_dir, Some(PathBuf::from("/cli/out")));
    }
}
