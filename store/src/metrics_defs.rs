use shared::metrics_defs::{MetricDef, MetricType};

pub const STORE_CONNECT_FAILURES: MetricDef = MetricDef {
    name: "store.connect_failures",
    metric_type: MetricType::Counter,
    description: "Connections to the ranking store that failed or timed out",
};

pub const STORE_OPERATIONS: MetricDef = MetricDef {
    name: "store.operations",
    metric_type: MetricType::Counter,
    description: "Sorted-set commands issued. Tagged with op.",
};

pub const ALL_METRICS: &[MetricDef] = &[STORE_CONNECT_FAILURES, STORE_OPERATIONS];
