use std::sync::Once;

/// Initialize the global tracing subscriber once, filtered by `RUST_LOG`.
pub fn init_tracing_from_env() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer();
        let _ = subscriber.try_init();
    });
}
