//! Progress logging follows the configured verbosity

use linear_boost::*;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

mod common;
use common::*;

struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        if record.target().starts_with("linear_boost") {
            if let Ok(mut records) = self.records.lock() {
                records.push((record.level(), record.args().to_string()));
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};

fn take_records() -> Vec<(Level, String)> {
    LOGGER.records.lock().unwrap().drain(..).collect()
}

fn messages_at(records: &[(Level, String)], level: Level) -> Vec<&str> {
    records
        .iter()
        .filter(|(l, _)| *l == level)
        .map(|(_, message)| message.as_str())
        .collect()
}

fn fit_at(verbosity: VerbosityLevel) -> FitOutcome {
    let train = create_regression_dataset(400, 1);
    let eval = create_regression_dataset(200, 2);
    let config = ConfigBuilder::new()
        .nrounds(200)
        .verbosity(verbosity)
        .build()
        .unwrap();
    let options = FitOptions::new().with_metric(MetricType::Mse).with_print_every_n(1);
    Fitter::new(config, options)
        .unwrap()
        .fit_with_trace(&train, Some(&eval))
        .unwrap()
}

// One test so the global logger sees a single fit at a time.
#[test]
fn test_progress_logging_respects_verbosity() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    for verbosity in [VerbosityLevel::Silent, VerbosityLevel::Warning] {
        let outcome = fit_at(verbosity);
        assert!(outcome.stopped_early);
        let records = take_records();
        let info = messages_at(&records, Level::Info);
        assert!(info.is_empty(), "{:?} logged {:?}", verbosity, info);
    }

    let outcome = fit_at(VerbosityLevel::Info);
    assert!(outcome.stopped_early);
    let records = take_records();
    let info = messages_at(&records, Level::Info);
    assert!(info.iter().any(|m| m.starts_with("Fitting mse loss")));
    assert!(info.iter().any(|m| m.starts_with("[0] train-mse")));
    assert!(info.iter().any(|m| m.starts_with("Early stopping triggered")));
    assert!(info.iter().any(|m| m.starts_with("Finished after")));
    assert!(messages_at(&records, Level::Debug).is_empty());

    fit_at(VerbosityLevel::Debug);
    let records = take_records();
    assert!(messages_at(&records, Level::Debug)
        .iter()
        .any(|m| m.starts_with("Round 1:")));
}
