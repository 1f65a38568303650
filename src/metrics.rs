use once_cell::sync::Lazy;
use prometheus::{IntCounterVec, IntGauge, Opts};

pub static WS_ACTIVE_CONNECTIONS: Lazy<IntGauge> = Lazy::new(|| {
    let gauge = IntGauge::new(
        "gateway_ws_active_connections",
        "Currently registered WebSocket connections",
    )
    .expect("failed to create gateway_ws_active_connections");
    prometheus::default_registry()
        .register(Box::new(gauge.clone()))
        .expect("failed to register gateway_ws_active_connections");
    gauge
});

pub static WS_NOTIFICATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "gateway_ws_notifications_total",
            "Outbound event notifications by tag and outcome",
        ),
        &["event", "outcome"],
    )
    .expect("failed to create gateway_ws_notifications_total");
    prometheus::default_registry()
        .register(Box::new(counter.clone()))
        .expect("failed to register gateway_ws_notifications_total");
    counter
});

pub static WS_COMMANDS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "gateway_ws_commands_total",
            "Inbound commands dispatched by tag and outcome",
        ),
        &["command", "outcome"],
    )
    .expect("failed to create gateway_ws_commands_total");
    prometheus::default_registry()
        .register(Box::new(counter.clone()))
        .expect("failed to register gateway_ws_commands_total");
    counter
});

/// Outcome labels shared by the counters above.
pub mod outcome {
    pub const DELIVERED: &str = "delivered";
    pub const OFFLINE: &str = "offline";
    pub const WRITE_FAILED: &str = "write_failed";
    pub const OK: &str = "ok";
    pub const ERROR: &str = "error";
}
