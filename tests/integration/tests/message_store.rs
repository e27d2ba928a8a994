//! Message store tests.

use chrono::{Duration, TimeZone, Utc};
use smd_core::{Binding, DecodedMessage, SamlParameter, DEFAULT_MAX_STORED_MESSAGES};
use smd_protocol_saml::CapturedRequest;

use crate::common::{memory_store, redirect_url, TestEnv, AUTHN_REQUEST};

fn numbered(n: usize) -> DecodedMessage {
    let base = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap();
    DecodedMessage::captured_at(
        base + Duration::seconds(n as i64),
        SamlParameter::SamlRequest,
        Binding::Redirect,
        format!("<m{n}/>"),
        Vec::new(),
    )
}

fn contents(messages: &[DecodedMessage]) -> Vec<String> {
    messages.iter().map(|m| m.content.clone()).collect()
}

/// Tests that 15 appends at capacity 10 keep appends 6 through 15.
#[test]
fn test_capacity_ten_keeps_last_ten() -> anyhow::Result<()> {
    let (_settings, store) = memory_store(10)?;

    for n in 1..=15 {
        store.append(numbered(n))?;
    }

    let expected: Vec<String> = (6..=15).map(|n| format!("<m{n}/>")).collect();
    assert_eq!(contents(&store.list()), expected);

    store.clear()?;
    assert!(store.is_empty());

    store.append(numbered(16))?;
    assert_eq!(store.len(), 1);
    Ok(())
}

/// Tests the bound and order after every append for several capacities.
#[test]
fn test_store_is_a_sliding_window() -> anyhow::Result<()> {
    for capacity in [1, 2, 5, 10, 100] {
        let (_settings, store) = memory_store(capacity)?;

        for n in 1..=capacity * 2 + 3 {
            store.append(numbered(n))?;

            let first = n.saturating_sub(capacity) + 1;
            let expected: Vec<String> = (first..=n).map(|i| format!("<m{i}/>")).collect();
            assert!(store.len() <= capacity);
            assert_eq!(contents(&store.list()), expected, "capacity {capacity}, append {n}");
        }
    }
    Ok(())
}

/// Tests that a capacity change applies with the next append.
#[test]
fn test_capacity_change_applies_on_next_append() -> anyhow::Result<()> {
    let (settings, store) = memory_store(10)?;
    for n in 1..=10 {
        store.append(numbered(n))?;
    }

    settings.set_max_stored_messages(3)?;
    assert_eq!(store.len(), 10);

    store.append(numbered(11))?;
    assert_eq!(contents(&store.list()), ["<m9/>", "<m10/>", "<m11/>"]);

    settings.set_max_stored_messages(100)?;
    store.append(numbered(12))?;
    assert_eq!(store.len(), 4);
    Ok(())
}

/// Tests that the history and settings persist in the data directory.
#[test]
fn test_history_persists_across_reopen() -> anyhow::Result<()> {
    let env = TestEnv::new()?;
    env.settings.update(|s| s.max_number_of_stored_messages = 2)?;

    for n in 1..=3 {
        env.store.append(numbered(n))?;
    }

    let reopened = env.reopen();
    assert_eq!(contents(&reopened.list()), ["<m2/>", "<m3/>"]);
    assert_eq!(reopened.capacity(), 2);
    Ok(())
}

/// Tests that unreadable settings fall back to the default capacity.
#[test]
fn test_unreadable_settings_fall_back_to_default() -> anyhow::Result<()> {
    let env = TestEnv::new()?;
    std::fs::write(env.settings.path(), "maxNumberOfStoredMessages = \"many\"")?;

    assert_eq!(env.store.capacity(), DEFAULT_MAX_STORED_MESSAGES);

    for n in 1..=DEFAULT_MAX_STORED_MESSAGES + 2 {
        env.store.append(numbered(n))?;
    }
    assert_eq!(env.store.len(), DEFAULT_MAX_STORED_MESSAGES);
    Ok(())
}

/// Tests the export document shape.
#[test]
fn test_export_shape() -> anyhow::Result<()> {
    let env = TestEnv::new()?;
    let url = redirect_url("https://idp.example/sso", "SAMLRequest", AUTHN_REQUEST)?;
    env.listener.handle(&CapturedRequest::get(url));
    env.store.append(numbered(1))?;

    let exported: serde_json::Value = serde_json::from_str(&env.store.export_json()?)?;
    let records = exported
        .as_array()
        .ok_or_else(|| anyhow::anyhow!("export is not an array"))?;
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first["parameter"], "SAMLRequest");
    assert_eq!(first["binding"], "redirect");
    assert_eq!(first["content"], AUTHN_REQUEST);
    assert_eq!(first["parameters"][1]["name"], "RelayState");
    assert_eq!(first["parameters"][1]["value"], "abc");
    assert!(first["time"]
        .as_str()
        .is_some_and(|t| t.ends_with(" GMT")));

    let stored = env.store.list();
    assert!(stored[0].time <= stored[1].time);
    assert!(stored[1].time.timestamp() > numbered(1).time.timestamp());
    Ok(())
}
