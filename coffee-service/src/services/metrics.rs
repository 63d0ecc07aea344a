//! Prometheus metrics for coffee-service.

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

struct CoffeeMetrics {
    registry: Registry,
    questions_total: IntCounterVec,
    provider_latency: HistogramVec,
    provider_errors: IntCounterVec,
}

static METRICS: OnceLock<Option<CoffeeMetrics>> = OnceLock::new();

/// Initialize all metrics. Later calls are no-ops.
pub fn init_metrics() {
    METRICS.get_or_init(|| match build_metrics() {
        Ok(m) => {
            tracing::info!("Prometheus metrics initialized");
            Some(m)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize metrics");
            None
        }
    });
}

fn metrics() -> Option<&'static CoffeeMetrics> {
    METRICS.get().and_then(|m| m.as_ref())
}

fn build_metrics() -> Result<CoffeeMetrics, prometheus::Error> {
    let registry = Registry::new();

    let questions_total = IntCounterVec::new(
        Opts::new("coffee_questions_total", "Total coffee questions by outcome"),
        &["outcome"],
    )?;

    let provider_latency = HistogramVec::new(
        HistogramOpts::new(
            "coffee_provider_latency_seconds",
            "Completion provider latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["provider", "model"],
    )?;

    let provider_errors = IntCounterVec::new(
        Opts::new(
            "coffee_provider_errors_total",
            "Total completion provider errors",
        ),
        &["provider", "error_type"],
    )?;

    registry.register(Box::new(questions_total.clone()))?;
    registry.register(Box::new(provider_latency.clone()))?;
    registry.register(Box::new(provider_errors.clone()))?;

    Ok(CoffeeMetrics {
        registry,
        questions_total,
        provider_latency,
        provider_errors,
    })
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match metrics() {
        Some(m) => &m.registry,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    let metric_families = registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

/// Record how a question ended: `success` or an error kind.
pub fn record_question(outcome: &str) {
    if let Some(m) = metrics() {
        m.questions_total.with_label_values(&[outcome]).inc();
    }
}

pub fn record_provider_latency(provider: &str, model: &str, duration_secs: f64) {
    if let Some(m) = metrics() {
        m.provider_latency
            .with_label_values(&[provider, model])
            .observe(duration_secs);
    }
}

pub fn record_provider_error(provider: &str, error_type: &str) {
    if let Some(m) = metrics() {
        m.provider_errors.with_label_values(&[provider, error_type]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorded_question_shows_up_in_exposition() {
        init_metrics();
        init_metrics();
        record_question("success");
        record_provider_error("mock", "network");

        let text = get_metrics();
        assert!(text.contains("coffee_questions_total{outcome=\"success\"}"));
        assert!(text.contains("coffee_provider_errors_total"));
    }
}
