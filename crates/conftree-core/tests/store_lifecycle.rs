//! Integration tests for the configuration store.
//!
//! These follow a store through the phases it is used in: final values from
//! the command line, file values on top, concurrent reads, then a prune and
//! reload between runs.

use std::sync::Arc;
use std::thread;

use conftree_core::{ConfigError, ConfigSink, ConfigStore, InitFailurePolicy, StoreOptions};

/// Populates `sink` the way a start-up sequence does: command-line values
/// first (final), then file values (ordinary).
fn populate(sink: &mut impl ConfigSink, file_runmode: &str) -> Vec<ConfigError> {
    let mut rejected = Vec::new();
    sink.set_final("runmode", "workers").unwrap();
    sink.set_final("af-packet.0.interface", "eth1").unwrap();

    for (path, value) in [
        ("runmode", file_runmode),
        ("af-packet.0.interface", "eth0"),
        ("af-packet.0.threads", "4"),
        ("af-packet.1.interface", "default"),
        ("af-packet.1.use-mmap", "yes"),
        ("af-packet.1.threads", "auto"),
        ("max-pending-packets", "1024"),
    ] {
        if let Err(err) = sink.set(path, value) {
            rejected.push(err);
        }
    }
    rejected
}

#[test]
fn test_final_values_shadow_file_values() {
    let mut store = ConfigStore::new_initialized().unwrap();

    let rejected = populate(&mut store, "autofp");

    assert_eq!(
        rejected,
        vec![
            ConfigError::Immutable {
                path: "runmode".to_string()
            },
            ConfigError::Immutable {
                path: "af-packet.0.interface".to_string()
            },
        ]
    );
    assert_eq!(store.get("runmode").unwrap(), Some("workers"));
    assert_eq!(store.get("af-packet.0.interface").unwrap(), Some("eth1"));
    assert_eq!(store.get_int("max-pending-packets").unwrap(), 1024);
}

#[test]
fn test_per_entry_defaults() {
    let mut store = ConfigStore::new_initialized().unwrap();
    populate(&mut store, "autofp");
    let entry = store.get_node("af-packet.0").unwrap();
    let default = store.get_node("af-packet.1").unwrap();

    assert_eq!(
        store.child_value_int_with_default(entry, Some(default), "threads").unwrap(),
        4
    );
    assert!(store
        .child_value_bool_with_default(entry, Some(default), "use-mmap")
        .unwrap());
    assert!(matches!(
        store.child_value_int(default, "threads"),
        Err(ConfigError::ParseFailure { .. })
    ));
}

#[test]
fn test_concurrent_readers_after_population() {
    let mut store = ConfigStore::new_initialized().unwrap();
    populate(&mut store, "autofp");
    let store = Arc::new(store);

    let readers: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let entry = store.get_node("af-packet.0").unwrap();
                (
                    store.get("runmode").unwrap().map(str::to_owned),
                    store.child_value_int(entry, "threads").unwrap(),
                    store.dump().len(),
                )
            })
        })
        .collect();

    for reader in readers {
        let (runmode, threads, lines) = reader.join().unwrap();
        assert_eq!(runmode.as_deref(), Some("workers"));
        assert_eq!(threads, 4);
        assert_eq!(lines, 7);
    }
}

#[test]
fn test_prune_then_reload_keeps_command_line_values() {
    // Arrange
    let mut store = ConfigStore::new_initialized().unwrap();
    populate(&mut store, "autofp");
    let root = store.root().unwrap();

    // Act
    store.prune(root).unwrap();

    // Assert: `af-packet` and `af-packet.0` were created by a final write,
    // so they are final themselves and the whole branch is kept.
    assert_eq!(
        store.dump(),
        vec![
            "runmode = workers",
            "af-packet.0.interface = eth1",
            "af-packet.0.threads = 4",
            "af-packet.1.interface = default",
            "af-packet.1.use-mmap = yes",
            "af-packet.1.threads = auto",
        ]
    );
    assert!(store.get("max-pending-packets").unwrap_err().is_not_found());

    // Reloading repopulates everything that was pruned.
    populate(&mut store, "single");
    assert_eq!(store.get("runmode").unwrap(), Some("workers"));
    assert_eq!(store.get("af-packet.1.use-mmap").unwrap(), Some("yes"));
}

#[test]
fn test_backup_isolates_a_scoped_configuration() {
    let mut store = ConfigStore::new_initialized().unwrap();
    populate(&mut store, "autofp");

    store.backup();
    store.init().unwrap();
    store.set("scoped", "1").unwrap();
    assert!(store.get("runmode").unwrap_err().is_not_found());
    store.deinit();
    store.restore();

    assert_eq!(store.get("runmode").unwrap(), Some("workers"));
    assert!(store.get("scoped").is_err());
}

#[test]
fn test_return_error_policy_store_initializes_normally() {
    let mut store = ConfigStore::with_options(StoreOptions {
        init_failure: InitFailurePolicy::ReturnError,
        ..StoreOptions::default()
    });
    assert!(store.init().is_ok());
    assert_eq!(store.init(), Err(ConfigError::AlreadyInitialized));
}
