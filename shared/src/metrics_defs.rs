//! Common types for metrics definitions.
//!
//! Each crate lists the metrics it emits as [`MetricDef`] consts next to
//! the emitting code; the binary logs the combined registry at startup so
//! the deployed metric surface is visible without reading source.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Histogram,
}

impl MetricType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MetricType::Counter => "Counter",
            MetricType::Histogram => "Histogram",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub description: &'static str,
}

/// Log one line per exported metric.
pub fn describe(defs: &[MetricDef]) {
    for def in defs {
        tracing::debug!(
            name = def.name,
            r#type = def.metric_type.as_str(),
            "{}",
            def.description
        );
    }
}
