// crates/logging/tests/levels.rs
use logging::{DebugFlag, InfoFlag, SubscriberConfig, subscriber};
use tracing::Level;
use tracing::subscriber::with_default;

fn sub(cfg: SubscriberConfig) -> Box<dyn tracing::Subscriber + Send + Sync> {
    subscriber(cfg).unwrap()
}

#[test]
fn info_not_emitted_by_default() {
    with_default(sub(SubscriberConfig::default()), || {
        assert!(!tracing::enabled!(Level::INFO));
        assert!(tracing::enabled!(Level::WARN));
    });
}

#[test]
fn verbose_enables_info() {
    with_default(sub(SubscriberConfig::builder().verbose(1).build()), || {
        assert!(tracing::enabled!(Level::INFO));
        assert!(!tracing::enabled!(Level::DEBUG));
    });
}

#[test]
fn debug_with_two_v() {
    with_default(sub(SubscriberConfig::builder().verbose(2).build()), || {
        assert!(tracing::enabled!(Level::DEBUG));
    });
}

#[test]
fn debug_flag_enables_its_target() {
    let cfg = SubscriberConfig::builder().debug([DebugFlag::Argv]).build();
    with_default(sub(cfg), || {
        assert!(tracing::enabled!(target: "debug::argv", Level::TRACE));
    });
}

#[test]
fn info_flag_enables_info() {
    let cfg = SubscriberConfig::builder().info([InfoFlag::Launch]).build();
    with_default(sub(cfg), || {
        assert!(tracing::enabled!(target: "info::launch", Level::INFO));
    });
}

#[test]
fn quiet_only_lets_errors_through() {
    let cfg = SubscriberConfig::builder()
        .quiet(true)
        .info([InfoFlag::Exit])
        .build();
    with_default(sub(cfg), || {
        assert!(!tracing::enabled!(target: "info::exit", Level::INFO));
        assert!(tracing::enabled!(Level::ERROR));
    });
}
