//! Combines the classifiers' latest states into one verdict.

use super::classifiers::all_classifiers;
use super::statistics::SeriesStatistics;
use crate::error::Result;
use crate::types::{ClassifierResult, Lean, MarketAssessment, OverallVerdict, PriceSeries};

/// Leaning classifiers needed before a verdict is called.
pub const VERDICT_QUORUM: usize = 3;

/// Tally leans across `results`. TOP wins ties at quorum.
pub fn tally(results: Vec<ClassifierResult>) -> MarketAssessment {
    let top_count = results
        .iter()
        .filter(|r| r.lean() == Some(Lean::Top))
        .count();
    let bottom_count = results
        .iter()
        .filter(|r| r.lean() == Some(Lean::Bottom))
        .count();

    let verdict = if top_count >= VERDICT_QUORUM {
        OverallVerdict::ApproachingTop
    } else if bottom_count >= VERDICT_QUORUM {
        OverallVerdict::ApproachingBottom
    } else {
        OverallVerdict::Mixed
    };

    MarketAssessment {
        results,
        top_count,
        bottom_count,
        verdict,
    }
}

/// Run every classifier on the latest row and tally the result.
pub fn assess(
    series: &PriceSeries,
    stats: &SeriesStatistics,
) -> Result<MarketAssessment> {
    let results = all_classifiers(stats.oscillator_period())
        .iter()
        .map(|classifier| classifier.classify(series, stats))
        .collect::<Result<Vec<_>>>()?;
    Ok(tally(results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        BandState, FibonacciLevels, FibonacciState, GoldenRatioReading, MayerReading, MultipleState,
        OscillatorReading, OscillatorState, PiCycleReading, PiCycleState, RainbowReading,
        Reading, TwoYearReading,
    };
    use std::collections::BTreeMap;

    fn pi(state: PiCycleState) -> ClassifierResult {
        ClassifierResult::PiCycle(Reading::Ready(PiCycleReading {
            state,
            price: 1.0,
            ma_111: 1.0,
            ma_350_x2: 1.0,
            distance_pct: 0.0,
            history: vec![],
        }))
    }

    fn two_year(state: MultipleState) -> ClassifierResult {
        ClassifierResult::TwoYearMultiplier(Reading::Ready(TwoYearReading {
            state,
            price: 1.0,
            ma_730: 1.0,
            ma_730_x5: 5.0,
            multiplier: 1.0,
            history: vec![],
        }))
    }

    fn oscillator(state: OscillatorState) -> ClassifierResult {
        ClassifierResult::Oscillator(Reading::Ready(OscillatorReading {
            state,
            value: 50.0,
            period: 14,
            history: vec![],
        }))
    }

    fn rainbow(state: BandState) -> ClassifierResult {
        ClassifierResult::Rainbow(Reading::Ready(RainbowReading {
            state,
            price: 1.0,
            position_ratio: 0.5,
            bands: BTreeMap::new(),
            history: vec![],
        }))
    }

    fn mayer(state: MultipleState) -> ClassifierResult {
        ClassifierResult::Mayer(Reading::Ready(MayerReading {
            state,
            price: 1.0,
            ma_200: 1.0,
            multiple: 1.0,
            history: vec![],
        }))
    }

    fn golden(state: FibonacciState) -> ClassifierResult {
        ClassifierResult::GoldenRatio(Reading::Ready(GoldenRatioReading {
            state,
            price: 1.0,
            ma_350: 1.0,
            levels: FibonacciLevels::from_average(1.0),
        }))
    }

    #[test]
    fn test_three_tops_approach_top() {
        let a = tally(vec![
            pi(PiCycleState::Top),
            two_year(MultipleState::ExtremeTop),
            oscillator(OscillatorState::ExtremeOverbought),
            rainbow(BandState::Top),
            mayer(MultipleState::Neutral),
            golden(FibonacciState::Bullish),
        ]);
        assert_eq!(a.top_count, 3);
        assert_eq!(a.bottom_count, 0);
        assert_eq!(a.verdict, OverallVerdict::ApproachingTop);
    }

    #[test]
    fn test_three_bottoms_approach_bottom() {
        let a = tally(vec![
            pi(PiCycleState::Safe),
            two_year(MultipleState::NearBottom),
            oscillator(OscillatorState::ExtremeOversold),
            rainbow(BandState::ExtremeBottom),
            mayer(MultipleState::Bottom),
            golden(FibonacciState::Neutral),
        ]);
        assert_eq!(a.bottom_count, 3);
        assert_eq!(a.verdict, OverallVerdict::ApproachingBottom);
    }

    #[test]
    fn test_oscillator_and_warning_never_count() {
        let a = tally(vec![
            pi(PiCycleState::Warning),
            two_year(MultipleState::Top),
            oscillator(OscillatorState::Overbought),
            rainbow(BandState::Top),
            mayer(MultipleState::Neutral),
            golden(FibonacciState::Neutral),
        ]);
        assert_eq!(a.top_count, 2);
        assert_eq!(a.verdict, OverallVerdict::Mixed);
    }

    #[test]
    fn test_insufficient_data_never_counts() {
        let a = tally(vec![
            ClassifierResult::PiCycle(Reading::InsufficientData),
            ClassifierResult::TwoYearMultiplier(Reading::InsufficientData),
            mayer(MultipleState::Bottom),
            golden(FibonacciState::Bottom),
        ]);
        assert_eq!(a.bottom_count, 2);
        assert_eq!(a.verdict, OverallVerdict::Mixed);
    }

    #[test]
    fn test_assess_short_series() {
        let series = PriceSeries::daily(0, &[100.0; 20]).unwrap();
        let stats = SeriesStatistics::compute(&series, 14).unwrap();
        let a = assess(&series, &stats).unwrap();
        assert_eq!(a.results.len(), 6);
        let ready: Vec<&str> = a.results.iter().filter(|r| r.is_ready()).map(|r| r.id()).collect();
        assert_eq!(ready, vec!["oscillator"]);
        assert_eq!(a.verdict, OverallVerdict::Mixed);
    }
}
