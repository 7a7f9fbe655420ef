use costest_core::tracing::init_tracing;

#[test]
fn init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
    tracing::info!(target: "costest_core", "tracing initialized twice without panicking");
}
