use anyhow::Context;
use cyclescope::{analyze_assets, load_asset, AssetReport, Config};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the JSON report only.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cyclescope=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env();
    // Positional arguments add to CYCLESCOPE_INPUTS.
    config.inputs.extend(std::env::args_os().skip(1).map(Into::into));
    config.validate().context("invalid configuration")?;

    if config.inputs.is_empty() {
        anyhow::bail!("no input files: pass paths as arguments or set CYCLESCOPE_INPUTS");
    }
    info!("Analysing {} asset file(s)", config.inputs.len());

    let inputs = config
        .inputs
        .iter()
        .map(|path| load_asset(path).with_context(|| format!("failed to load {}", path.display())))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let backtest = config.backtest();
    let mut reports: Vec<AssetReport> = Vec::with_capacity(inputs.len());
    for (input, result) in inputs.iter().zip(analyze_assets(&inputs, &backtest)) {
        match result {
            Ok(mut report) => {
                if !config.include_history {
                    report.assessment.results = report
                        .assessment
                        .results
                        .into_iter()
                        .map(|r| r.without_history())
                        .collect();
                }
                reports.push(report);
            }
            Err(e) => warn!("Skipping {}: {}", input.symbol, e),
        }
    }

    let json = if config.pretty {
        serde_json::to_string_pretty(&reports)?
    } else {
        serde_json::to_string(&reports)?
    };
    println!("{}", json);

    Ok(())
}
