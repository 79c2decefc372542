pub mod builders;
pub mod fake_executor;
pub mod fixtures;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use qcrun::logging::LOG_ENV_VAR;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Upper bound for any single async test, real scripts included.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Install a test-captured tracing subscriber once per test binary.
///
/// The filter comes from `QCRUN_LOG`, then `RUST_LOG`, then `info`, e.g.
/// `QCRUN_LOG=qcrun::engine=debug cargo test`. Output only shows for failing
/// tests unless run with `--nocapture`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Fail the test if `f` runs longer than [`TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(TEST_TIMEOUT, f).await {
        Ok(out) => out,
        Err(_) => panic!("test timed out after {TEST_TIMEOUT:?}"),
    }
}
