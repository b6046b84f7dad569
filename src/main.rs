#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Result;
use caniuse_next::browser;
use caniuse_next::config::{ColorChoice, Config};
use caniuse_next::dataset::{Dataset, FeatureLookup};
use caniuse_next::error::{should_output_json_errors, CaniuseError};
use caniuse_next::report::{feature_count_line, BrowserSummary, FeatureReport};
use caniuse_next::resolver::{resolve_or_empty, LiteralResolver};
use caniuse_next::support::{classify, classify_lenient};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

const USAGE: &str = "\
Usage: caniuse-next [OPTIONS]

Options:
  --data PATH        caniuse data-2.0.json to read (env: CANIUSE_DATA)
  --browsers QUERY   comma separated \"family version\" list (env: CANIUSE_BROWSERS)
  --feature ID       feature to report on, may be repeated
  --limit N          report on at most N features (env: CANIUSE_LIMIT)
  --json             print reports as JSON
  --strict           fail when the dataset lacks data for a browser
  --color WHEN       auto, always or never (env: CANIUSE_COLOR)
  --list-features    print every feature id and exit
  --verbose          debug logging
  -h, --help         show this help
";

/// Parsed command line
#[derive(Debug, Default)]
struct CliArgs {
    data: Option<PathBuf>,
    browsers: Option<String>,
    features: Vec<String>,
    limit: Option<usize>,
    color: Option<ColorChoice>,
    json: bool,
    strict: bool,
    verbose: bool,
    list_features: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<CliArgs, CaniuseError> {
    let mut cli = CliArgs::default();
    let mut i = 1;

    let value = |i: usize, flag: &str| -> Result<String, CaniuseError> {
        args.get(i + 1)
            .cloned()
            .ok_or_else(|| CaniuseError::usage(format!("{} requires a value", flag)))
    };

    while i < args.len() {
        match args[i].as_str() {
            "--data" => {
                cli.data = Some(PathBuf::from(value(i, "--data")?));
                i += 2;
            }
            "--browsers" => {
                cli.browsers = Some(value(i, "--browsers")?);
                i += 2;
            }
            "--feature" => {
                cli.features.push(value(i, "--feature")?);
                i += 2;
            }
            "--limit" => {
                let raw = value(i, "--limit")?;
                let limit = raw
                    .parse()
                    .map_err(|_| CaniuseError::usage(format!("invalid --limit '{}'", raw)))?;
                cli.limit = Some(limit);
                i += 2;
            }
            "--color" => {
                cli.color = Some(ColorChoice::from_str(&value(i, "--color")?));
                i += 2;
            }
            "--json" => {
                cli.json = true;
                i += 1;
            }
            "--strict" => {
                cli.strict = true;
                i += 1;
            }
            "--verbose" | "-v" => {
                cli.verbose = true;
                i += 1;
            }
            "--list-features" => {
                cli.list_features = true;
                i += 1;
            }
            "--help" | "-h" => {
                cli.help = true;
                i += 1;
            }
            other => {
                return Err(CaniuseError::usage(format!("unknown option '{}'", other)));
            }
        }
    }

    Ok(cli)
}

fn setup_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::builder().parse_lossy(
        env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV)
            .unwrap_or_else(|_| default_level.to_string()),
    );
    let fmt = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);
    tracing_subscriber::registry().with(fmt).try_init()?;
    Ok(())
}

fn print_error(err: &CaniuseError) {
    if should_output_json_errors() {
        eprintln!("{}", err.to_json());
    } else {
        eprintln!("caniuse-next: {}", err.with_help());
        if let Some(suggestions) = err
            .context
            .as_ref()
            .and_then(|c| c.get("suggestions"))
            .and_then(|s| s.as_array())
            .filter(|s| !s.is_empty())
        {
            let names: Vec<&str> = suggestions.iter().filter_map(|s| s.as_str()).collect();
            eprintln!("Did you mean: {}?", names.join(", "));
        }
    }
}

fn run(cli: CliArgs) -> Result<i32, CaniuseError> {
    let mut config = Config::load();
    if let Some(data) = cli.data {
        config.data_path = Some(data);
    }
    if let Some(browsers) = cli.browsers {
        config.browsers = browsers;
    }
    if let Some(limit) = cli.limit {
        config.limit = limit;
    }
    if let Some(color) = cli.color {
        config.color = color;
    }

    let data_path = config
        .data_path
        .clone()
        .ok_or_else(CaniuseError::dataset_not_configured)?;
    let dataset = Dataset::from_file(&data_path)?;

    if cli.list_features {
        for id in dataset.feature_ids() {
            println!("{}", id);
        }
        return Ok(0);
    }

    let resolver = LiteralResolver::new(&dataset);
    let browsers = resolve_or_empty(&resolver, &config.browsers);
    let browser_ids = browser::parse_all(&browsers)
        .map_err(|e| CaniuseError::new("INVALID_QUERY", e.to_string(), 1))?;
    let summary = BrowserSummary::generate(&config.browsers, &browsers, &resolver, &dataset);

    let total_features = if cli.features.is_empty() {
        dataset.feature_ids().len()
    } else {
        cli.features.len()
    };
    let feature_ids: Vec<String> = if cli.features.is_empty() {
        dataset
            .feature_ids()
            .into_iter()
            .take(config.limit)
            .map(str::to_string)
            .collect()
    } else {
        cli.features.into_iter().take(config.limit).collect()
    };

    let mut exit_code = 0;
    let mut reports = Vec::with_capacity(feature_ids.len());
    for id in &feature_ids {
        let feature = match dataset.require_feature(id) {
            Ok(feature) => feature,
            Err(e) => {
                let err = CaniuseError::from(e);
                print_error(&err);
                exit_code = exit_code.max(err.exit_code);
                continue;
            }
        };

        let classification = if cli.strict {
            classify(feature, &browser_ids)?
        } else {
            classify_lenient(feature, &browser_ids)
        };

        reports.push(FeatureReport::generate(
            id,
            &feature.title,
            &feature.description,
            &classification,
            &resolver,
            &dataset,
        ));
    }

    if cli.json {
        let output = serde_json::json!({ "browsers": summary, "features": reports });
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => return Err(CaniuseError::new("OUTPUT_ERROR", e.to_string(), 1)),
        }
    } else {
        let use_colors = config.color.enabled();
        print!("{}", summary.format_summary(use_colors));
        println!("{}", feature_count_line(reports.len(), total_features));
        for report in &reports {
            println!();
            print!("{}", report.format_report(use_colors));
        }
    }

    Ok(exit_code)
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(err) => {
            print_error(&err);
            eprint!("\n{}", USAGE);
            std::process::exit(err.exit_code);
        }
    };

    if cli.help {
        print!("{}", USAGE);
        return Ok(());
    }

    setup_tracing(cli.verbose)?;

    match run(cli) {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            print_error(&err);
            std::process::exit(err.exit_code);
        }
    }
}
