use std::path::PathBuf;
use std::process;

use anyhow::{Result, bail};
use clap::Parser;
use dentascan_core::prelude::*;
use dentascan_remote::{RemoteClient, RemoteConfig};
use log::error;

/// Screens jaw photographs for caries.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// photograph of the upper jaw
    upper: PathBuf,

    /// photograph of the lower jaw
    lower: Option<PathBuf>,

    /// ONNX artifact to run locally
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    /// load the artifact as-is, skipping graph optimization
    #[arg(long)]
    no_optimize: bool,

    /// upload the photographs to the hosted endpoint instead of running locally
    #[arg(long)]
    remote: bool,

    /// hosted endpoint to use with --remote
    #[arg(long, default_value = dentascan_remote::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// answer with the canned placeholder prediction, touching no model at all
    #[arg(long, conflicts_with = "remote")]
    mock: bool,

    /// print the report as JSON
    #[arg(long)]
    json: bool,

    /// Sets the level of verbosity
    #[arg(short, action = clap::ArgAction::Count)]
    verbosity: u8,
}

fn main() {
    let args = Args::parse();

    let level = match args.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env = env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level);
    env_logger::Builder::from_env(env).init();

    if let Err(e) = run(args) {
        error!("{e:#}");
        process::exit(1)
    }
}

fn run(args: Args) -> Result<()> {
    if args.remote {
        let Some(lower) = &args.lower else {
            bail!("the hosted endpoint screens a pair, pass an upper and a lower photograph");
        };
        let client = RemoteClient::new(RemoteConfig::new(&args.endpoint))?;
        let report = client.screen_pair(&args.upper, lower)?;
        return print_report(&report, args.json);
    }

    if args.mock {
        let prediction = mock_prediction();
        return match args.lower {
            Some(_) => {
                let report = ScreeningReport { upper_jaw: prediction, lower_jaw: prediction };
                print_report(&report, args.json)
            }
            None => print_single(&prediction, args.json),
        };
    }

    let config = ModelConfig::new(&args.model).with_graph_optimization(!args.no_optimize);
    let classifier = Classifier::new(config);
    match &args.lower {
        Some(lower) => {
            let report = classifier.screen_pair(&args.upper, lower)?;
            print_report(&report, args.json)
        }
        None => {
            let prediction = classifier.classify_file(&args.upper)?;
            print_single(&prediction, args.json)
        }
    }
}

fn print_report(report: &ScreeningReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        for jaw in [JawPosition::Upper, JawPosition::Lower] {
            print_human(&format!("{jaw} jaw"), report.for_jaw(jaw));
        }
    }
    Ok(())
}

fn print_single(prediction: &Prediction, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(prediction)?);
    } else {
        print_human("upper jaw", prediction);
    }
    Ok(())
}

fn print_human(label: &str, prediction: &Prediction) {
    let p = prediction.probabilities;
    println!(
        "{label}: {} ({:.1}% confidence)",
        prediction.prediction,
        prediction.confidence * 100.0
    );
    println!("  caries {:.3}  healthy {:.3}  non_dental {:.3}", p.caries, p.healthy, p.non_dental);
}
