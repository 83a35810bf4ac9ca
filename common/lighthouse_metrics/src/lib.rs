//! A wrapper around the `prometheus` crate that provides a modicum of safety against double
//! registration of the same metric name, whilst maintaining a very similar API.
//!
//! This crate is intentionally minimal: it exists so every other crate in the workspace registers
//! its counters/gauges the same way, rather than each growing its own `lazy_static! { ... }`
//! boilerplate around a raw `prometheus::Registry`.

use prometheus::{Histogram, HistogramOpts, IntCounter, IntGauge, Opts};

pub use prometheus::Error;

/// Collect all the metrics registered on the global registry and encode them in the Prometheus
/// text format.
pub fn gather() -> Vec<prometheus::proto::MetricFamily> {
    prometheus::gather()
}

/// Attempts to create an `IntCounter`, returning `None` if the registration fails.
///
/// Registration can fail if the metric name is already in use, which typically indicates a
/// programming error (the same counter has been created twice).
pub fn try_create_int_counter(name: &str, help: &str) -> Result<IntCounter, Error> {
    let opts = Opts::new(name, help);
    let counter = IntCounter::with_opts(opts)?;
    prometheus::register(Box::new(counter.clone()))?;
    Ok(counter)
}

pub fn try_create_int_gauge(name: &str, help: &str) -> Result<IntGauge, Error> {
    let opts = Opts::new(name, help);
    let gauge = IntGauge::with_opts(opts)?;
    prometheus::register(Box::new(gauge.clone()))?;
    Ok(gauge)
}

pub fn try_create_histogram(name: &str, help: &str) -> Result<Histogram, Error> {
    let opts = HistogramOpts::new(name, help);
    let histogram = Histogram::with_opts(opts)?;
    prometheus::register(Box::new(histogram.clone()))?;
    Ok(histogram)
}

/// Increments a counter by one, silently doing nothing if `counter` failed to build.
pub fn inc_counter(counter: &Result<IntCounter, Error>) {
    if let Ok(counter) = counter {
        counter.inc();
    }
}

pub fn inc_counter_by(counter: &Result<IntCounter, Error>, value: u64) {
    if let Ok(counter) = counter {
        counter.inc_by(value);
    }
}

pub fn set_gauge(gauge: &Result<IntGauge, Error>, value: i64) {
    if let Ok(gauge) = gauge {
        gauge.set(value);
    }
}

pub fn inc_gauge(gauge: &Result<IntGauge, Error>) {
    if let Ok(gauge) = gauge {
        gauge.inc();
    }
}

pub fn dec_gauge(gauge: &Result<IntGauge, Error>) {
    if let Ok(gauge) = gauge {
        gauge.dec();
    }
}

pub fn observe(histogram: &Result<Histogram, Error>, value: f64) {
    if let Ok(histogram) = histogram {
        histogram.observe(value);
    }
}

pub use prometheus::{Histogram, HistogramTimer, IntCounter as Counter, IntGauge as Gauge};
