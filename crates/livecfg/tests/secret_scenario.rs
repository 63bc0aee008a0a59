//! End-to-end scenarios across the holder, the error type and the runtime.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use livecfg::prelude::*;
use livecfg::runtime::settings::SettingsError;

#[derive(Debug, Clone, Default, PartialEq, ZeroValue)]
struct Secret(String);

#[derive(Debug, Clone, Default, PartialEq, ZeroValue)]
struct Config {
    secret: Secret,
}

fn with_secret(secret: &str) -> Config {
    Config {
        secret: Secret(secret.to_string()),
    }
}

fn check(conf: &Config) -> Result<()> {
    if conf.secret.0.len() < 8 {
        return Err(coded!(1001, "invalid secret {}", conf.secret.0));
    }
    Ok(())
}

#[test]
fn test_secret_round_trip() {
    let conf = config::local::<Config>()
        .watch()
        .init_data(with_secret("hello world"));

    let current = conf.get();
    assert_eq!(current.secret.0, "hello world");
    assert!(check(&current).is_ok());

    conf.update(with_secret("updated secret")).unwrap();
    assert_eq!(conf.get().secret.0, "updated secret");
}

#[test]
fn test_short_secret_is_rejected() {
    let conf = config::local::<Config>().watch().init_data(with_secret("short"));

    let err = check(&conf.get()).unwrap_err();
    assert_eq!(err.code(), 1001);
    assert_eq!(err.message(), "invalid secret short");
    assert!(err.error_type().is_none());
    assert!(!err.stack().is_empty());
}

#[test]
fn test_observer_sees_every_update() {
    let conf = config::local::<Config>()
        .watch()
        .init_data(with_secret("hello world"));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let cancel = {
        let seen = Arc::clone(&seen);
        conf.observe(move |c: &Config| seen.lock().unwrap().push(c.secret.0.clone()))
    };

    conf.update(with_secret("updated secret")).unwrap();
    conf.update(with_secret("rotated secret")).unwrap();
    cancel.cancel();
    conf.update(with_secret("unobserved secret")).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["updated secret", "rotated secret"]);
    assert_eq!(conf.get().secret.0, "unobserved secret");
}

#[test]
fn test_concurrent_readers_and_writers() {
    let conf = config::local::<Config>()
        .watch()
        .init_data(with_secret("initial secret"));
    let notified = Arc::new(AtomicUsize::new(0));
    let _cancel = {
        let notified = Arc::clone(&notified);
        conf.observe(move |_: &Config| {
            notified.fetch_add(1, Ordering::SeqCst);
        })
    };

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let conf = Arc::clone(&conf);
            thread::spawn(move || {
                for i in 0..25 {
                    conf.update(with_secret(&format!("writer-{w}-secret-{i}"))).unwrap();
                }
            })
        })
        .collect();
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let conf = Arc::clone(&conf);
            thread::spawn(move || {
                for _ in 0..100 {
                    let secret = conf.get().secret.0;
                    assert!(secret == "initial secret" || secret.starts_with("writer-"));
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }
    assert_eq!(notified.load(Ordering::SeqCst), 100);
    assert!(conf.get().secret.0.starts_with("writer-"));
}

#[tokio::test]
async fn test_queued_observer_reloads_from_task() {
    let conf = config::local::<Config>()
        .watch()
        .init_data(with_secret("hello world"));
    let (mut rx, cancel) = conf.on_change_queued(4);

    let reader = {
        let conf = Arc::clone(&conf);
        tokio::spawn(async move {
            let changed = rx.recv().await.unwrap();
            assert_eq!(conf.get(), changed);
            changed.secret.0
        })
    };

    conf.update(with_secret("updated secret")).unwrap();
    assert_eq!(reader.await.unwrap(), "updated secret");
    cancel.cancel();
}

#[test]
fn test_remote_holder_is_unavailable() {
    let result = config::remote::<Config>("consul://localhost:8500/app");
    let err = result.err().unwrap();

    assert_eq!(err.code(), config::CODE_REMOTE_UNIMPLEMENTED);
    assert_eq!(err.error_type(), Some(&ErrorType::Unavailable));
}

#[test]
fn test_settings_error_lifts_into_error() {
    let err: Error = SettingsError::validation("bad queue").into();

    assert_eq!(err.chain().count(), 2);
    assert!(err.root_cause().downcast_ref::<SettingsError>().is_some());
}
