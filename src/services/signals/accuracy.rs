//! Forward-return accuracy for detected events.

use crate::error::{Error, Result};
use crate::types::{
    BacktestSummary, EvaluatedEvent, Event, EventClass, EventOrigin, ForwardReturns, PriceSeries,
    Reliability,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Forward offsets, in rows, at which returns are measured.
pub const DEFAULT_HORIZONS: [usize; 3] = [30, 60, 90];

/// Horizon whose return decides whether an event was right.
pub const DEFAULT_ACCURACY_HORIZON: usize = 90;

/// Signed percentage move from `from` to `to`. `from` must be non-zero.
pub fn percent_return(from: f64, to: f64) -> f64 {
    (to - from) / from * 100.0
}

/// Returns from row `index` to every `index + h` that lies inside the series.
pub fn forward_returns(
    series: &PriceSeries,
    index: usize,
    horizons: &[usize],
) -> Result<ForwardReturns> {
    let mut returns = ForwardReturns::new();
    let Some(signal_price) = series.price(index) else {
        return Ok(returns);
    };
    if signal_price == 0.0 {
        return Err(Error::ZeroSignalPrice { index });
    }

    for &horizon in horizons {
        if let Some(future) = index.checked_add(horizon).and_then(|i| series.price(i)) {
            returns.insert(horizon, percent_return(signal_price, future));
        }
    }
    Ok(returns)
}

/// A TOP is right when price fell by the accuracy horizon, a BOTTOM when it
/// rose. An event that never reaches the horizon is not accurate.
pub fn is_accurate(class: EventClass, returns: &ForwardReturns, accuracy_horizon: usize) -> bool {
    match (class, returns.get(accuracy_horizon)) {
        (EventClass::Top, Some(r)) => r < 0.0,
        (EventClass::Bottom, Some(r)) => r > 0.0,
        (_, None) => false,
    }
}

/// Attach forward returns and the accuracy verdict to every event.
///
/// Events at a zero price keep their place with no returns and count as
/// inaccurate.
pub fn evaluate(
    series: &PriceSeries,
    events: Vec<Event>,
    horizons: &[usize],
    accuracy_horizon: usize,
) -> Vec<EvaluatedEvent> {
    events
        .into_iter()
        .map(|event| {
            let forward_returns = match forward_returns(series, event.index, horizons) {
                Ok(returns) => returns,
                Err(e) => {
                    warn!("Skipping returns for {:?} event: {}", event.origin, e);
                    ForwardReturns::new()
                }
            };
            let accurate = is_accurate(event.class, &forward_returns, accuracy_horizon);
            EvaluatedEvent {
                event,
                forward_returns,
                accurate,
            }
        })
        .collect()
}

/// Accuracy and per-horizon mean returns over one run.
///
/// Every event counts toward the total; means only average the events that
/// reached each horizon, and a horizon nobody reached is left out.
pub fn summarize(
    origin: EventOrigin,
    class: EventClass,
    signals: &[EvaluatedEvent],
    horizons: &[usize],
) -> BacktestSummary {
    let total_events = signals.len();
    let accurate_events = signals.iter().filter(|s| s.accurate).count();
    let accuracy_pct = if total_events == 0 {
        0.0
    } else {
        accurate_events as f64 / total_events as f64 * 100.0
    };

    let mut mean_returns = BTreeMap::new();
    for &horizon in horizons {
        let values: Vec<f64> = signals
            .iter()
            .filter_map(|s| s.forward_returns.get(horizon))
            .collect();
        if !values.is_empty() {
            mean_returns.insert(horizon, values.iter().sum::<f64>() / values.len() as f64);
        }
    }

    debug!(
        "{:?}/{:?}: {} of {} accurate ({:.1}%)",
        origin, class, accurate_events, total_events, accuracy_pct
    );

    BacktestSummary {
        origin,
        class,
        total_events,
        accurate_events,
        accuracy_pct,
        mean_returns,
        reliability: Reliability::from_accuracy(accuracy_pct),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(prices: &[f64]) -> PriceSeries {
        PriceSeries::daily(0, prices).unwrap()
    }

    fn event(series: &PriceSeries, index: usize, class: EventClass) -> Event {
        Event {
            index,
            time: series.time(index).unwrap(),
            price: series.price(index).unwrap(),
            class,
            origin: EventOrigin::Extremum,
            metric: None,
        }
    }

    #[test]
    fn test_percent_return() {
        assert_eq!(percent_return(100.0, 110.0), 10.0);
        assert_eq!(percent_return(100.0, 50.0), -50.0);
        assert_eq!(percent_return(300.0, 300.0), 0.0);
    }

    #[test]
    fn test_forward_returns_omit_horizons_past_end() {
        let prices: Vec<f64> = (0..100).map(|i| 100.0 + i as f64).collect();
        let s = series(&prices);
        let returns = forward_returns(&s, 20, &DEFAULT_HORIZONS).unwrap();
        assert_eq!(returns.len(), 2);
        assert_eq!(returns.get(30), Some(30.0 / 120.0 * 100.0));
        assert!(returns.get(90).is_none());

        // index + horizon == n is outside.
        let returns = forward_returns(&s, 10, &[90]).unwrap();
        assert!(returns.is_empty());
        let returns = forward_returns(&s, 9, &[90]).unwrap();
        assert_eq!(returns.len(), 1);
    }

    #[test]
    fn test_forward_returns_ignore_overflowing_horizon() {
        let s = series(&[100.0, 200.0, 300.0]);
        assert!(forward_returns(&s, 1, &[usize::MAX]).unwrap().is_empty());

        let returns = forward_returns(&s, 1, &[1, usize::MAX]).unwrap();
        assert_eq!(returns.len(), 1);
        assert_eq!(returns.get(1), Some(50.0));
    }

    #[test]
    fn test_forward_returns_reject_zero_price() {
        let s = series(&[0.0, 1.0, 2.0]);
        assert!(matches!(
            forward_returns(&s, 0, &[1]),
            Err(Error::ZeroSignalPrice { index: 0 })
        ));
    }

    #[test]
    fn test_is_accurate() {
        let mut returns = ForwardReturns::new();
        returns.insert(90, -3.0);
        assert!(is_accurate(EventClass::Top, &returns, 90));
        assert!(!is_accurate(EventClass::Bottom, &returns, 90));
        assert!(!is_accurate(EventClass::Top, &returns, 60));

        let mut flat = ForwardReturns::new();
        flat.insert(90, 0.0);
        assert!(!is_accurate(EventClass::Top, &flat, 90));
        assert!(!is_accurate(EventClass::Bottom, &flat, 90));
    }

    #[test]
    fn test_evaluate_keeps_zero_price_events() {
        let mut prices = vec![10.0; 120];
        prices[5] = 0.0;
        let s = series(&prices);
        let events = vec![event(&s, 5, EventClass::Bottom), event(&s, 6, EventClass::Bottom)];
        let evaluated = evaluate(&s, events, &DEFAULT_HORIZONS, DEFAULT_ACCURACY_HORIZON);
        assert_eq!(evaluated.len(), 2);
        assert!(evaluated[0].forward_returns.is_empty());
        assert!(!evaluated[0].accurate);
        assert_eq!(evaluated[1].forward_returns.len(), 3);
    }

    #[test]
    fn test_summarize_zero_events() {
        let summary = summarize(
            EventOrigin::Oscillator,
            EventClass::Top,
            &[],
            &DEFAULT_HORIZONS,
        );
        assert_eq!(summary.total_events, 0);
        assert_eq!(summary.accuracy_pct, 0.0);
        assert!(!summary.accuracy_pct.is_nan());
        assert!(summary.mean_returns.is_empty());
        assert_eq!(summary.reliability, Reliability::Unreliable);
    }

    #[test]
    fn test_summarize_excludes_missing_horizons_from_means() {
        // Falling series: tops are right.
        let prices: Vec<f64> = (0..150).map(|i| 1000.0 - i as f64).collect();
        let s = series(&prices);
        let events = vec![
            event(&s, 0, EventClass::Top),
            event(&s, 40, EventClass::Top),
            event(&s, 100, EventClass::Top),
        ];
        let evaluated = evaluate(&s, events, &DEFAULT_HORIZONS, 90);
        let summary = summarize(EventOrigin::Extremum, EventClass::Top, &evaluated, &DEFAULT_HORIZONS);

        assert_eq!(summary.total_events, 3);
        // Row 100 never reaches 90 rows ahead.
        assert_eq!(summary.accurate_events, 2);
        assert!((summary.accuracy_pct - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.reliability, Reliability::Moderate);

        let expected_90 = (percent_return(1000.0, 910.0) + percent_return(960.0, 870.0)) / 2.0;
        assert!((summary.mean_return(90).unwrap() - expected_90).abs() < 1e-12);
        let expected_30 = (percent_return(1000.0, 970.0)
            + percent_return(960.0, 930.0)
            + percent_return(900.0, 870.0))
            / 3.0;
        assert!((summary.mean_return(30).unwrap() - expected_30).abs() < 1e-12);
    }
}
