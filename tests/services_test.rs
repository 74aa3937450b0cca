//! End-to-end tests for asset loading and analysis

use cyclescope::{
    analyze_asset, analyze_assets, load_asset, AssetInput, BacktestConfig, Config, Error,
    OverallVerdict, PriceSeries,
};
use std::io::Write;

fn write_asset(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    path
}

fn asset_json(symbol: &str, prices: &[f64]) -> String {
    let input = AssetInput {
        symbol: symbol.to_string(),
        points: PriceSeries::daily(1_600_000_000_000, prices).unwrap(),
    };
    serde_json::to_string(&input).unwrap()
}

#[test]
fn test_load_and_analyze_file() {
    let dir = tempfile::tempdir().unwrap();
    let prices: Vec<f64> = (0..800).map(|i| 100.0 + (i as f64 / 30.0).sin() * 10.0).collect();
    let path = write_asset(&dir, "btc.json", &asset_json("BTC", &prices));

    let input = load_asset(&path).unwrap();
    assert_eq!(input.symbol, "BTC");
    assert_eq!(input.points.len(), 800);

    let report = analyze_asset(&input, &BacktestConfig::default()).unwrap();
    assert_eq!(report.symbol, "BTC");
    assert_eq!(report.assessment.results.len(), 6);
    assert!(report.assessment.results.iter().all(|r| r.is_ready()));
    assert_eq!(report.backtest.data_period.rows, 800);

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["backtest"]["data_period"]["start"]
        .as_str()
        .unwrap()
        .starts_with("2020-09-13"));
}

#[test]
fn test_load_rejects_nan_and_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_asset(&dir, "bad.json", r#"{"symbol":"X","points":[{"time":1}]}"#);
    assert!(matches!(load_asset(&path), Err(Error::SerdeJson(_))));

    let path = write_asset(&dir, "empty.json", r#"{"symbol":"X","points":[]}"#);
    let err = load_asset(&path).unwrap_err();
    assert!(err.to_string().contains("empty"));
}

#[test]
fn test_parallel_analysis_matches_sequential() {
    let inputs: Vec<AssetInput> = (1..=4)
        .map(|k| AssetInput {
            symbol: format!("A{}", k),
            points: PriceSeries::daily(
                0,
                &(0..500)
                    .map(|i| 50.0 * k as f64 + (i as f64 / (5.0 * k as f64)).cos() * 5.0)
                    .collect::<Vec<_>>(),
            )
            .unwrap(),
        })
        .collect();
    let config = Config::default().backtest();

    let parallel: Vec<_> = analyze_assets(&inputs, &config)
        .into_iter()
        .map(Result::unwrap)
        .collect();
    let sequential: Vec<_> = inputs
        .iter()
        .map(|input| analyze_asset(input, &config).unwrap())
        .collect();
    assert_eq!(parallel, sequential);
}

#[test]
fn test_short_asset_reports_mixed() {
    let input = AssetInput {
        symbol: "NEW".into(),
        points: PriceSeries::daily(0, &[1.0, 2.0, 3.0]).unwrap(),
    };
    let report = analyze_asset(&input, &BacktestConfig::default()).unwrap();
    assert_eq!(report.assessment.verdict, OverallVerdict::Mixed);
    assert!(report.assessment.results.iter().all(|r| !r.is_ready()));
    assert!(report.backtest.runs().iter().all(|r| r.signals.is_empty()));
}
