//! Listener pipeline tests.

use smd_listener::{ListenerStats, Outcome};
use smd_protocol_saml::{CapturedRequest, SamlError};
use tokio::sync::mpsc;

use crate::common::{base64, post_body, redirect_url, TestEnv, AUTHN_REQUEST, RESPONSE};

/// Tests that malformed messages are dropped without affecting later traffic.
#[test]
fn test_malformed_message_is_dropped_alone() -> anyhow::Result<()> {
    let env = TestEnv::new()?;

    let bad_base64 = CapturedRequest::get("https://idp.example/sso?SAMLRequest=%21%21%21");
    // A final block with the reserved block type.
    let bad_deflate = CapturedRequest::get(format!(
        "https://idp.example/sso?SAMLRequest={}",
        urlencoding::encode(&base64(&[0x07, 0x00]))
    ));

    assert!(matches!(
        env.listener.handle(&bad_base64),
        Outcome::Dropped(SamlError::Base64Decode(_))
    ));
    assert!(matches!(
        env.listener.handle(&bad_deflate),
        Outcome::Dropped(SamlError::Deflate(_))
    ));

    // Inflates fine, but the text holds a bare percent sign.
    let bad_escape = redirect_url("https://idp.example/sso", "SAMLRequest", "<a>100%</a>")?;
    assert!(matches!(
        env.listener.handle(&CapturedRequest::get(bad_escape)),
        Outcome::Dropped(SamlError::PercentDecode(_))
    ));

    let good = redirect_url("https://idp.example/sso", "SAMLRequest", AUTHN_REQUEST)?;
    assert!(matches!(
        env.listener.handle(&CapturedRequest::get(good)),
        Outcome::Stored(_)
    ));
    assert_eq!(env.store.len(), 1);
    Ok(())
}

/// Tests that the caller gets exactly the record that was stored.
#[test]
fn test_returned_record_is_stored_record() -> anyhow::Result<()> {
    let env = TestEnv::new()?;

    for xml in [AUTHN_REQUEST, RESPONSE] {
        let url = redirect_url("https://idp.example/sso", "SAMLRequest", xml)?;
        let returned = env
            .listener
            .handle(&CapturedRequest::get(url))
            .into_message()
            .ok_or_else(|| anyhow::anyhow!("expected a stored message"))?;

        assert_eq!(env.store.list().last(), Some(&returned));
        assert_eq!(env.reopen().list().last(), Some(&returned));
    }
    Ok(())
}

/// Tests the async listener over a mixed capture stream.
#[tokio::test]
async fn test_listener_processes_stream() -> anyhow::Result<()> {
    let env = TestEnv::new()?;
    let (tx, rx) = mpsc::channel(4);
    let handle = env.listener.clone().spawn(rx);

    for n in 0..12 {
        let request = if n % 2 == 0 {
            CapturedRequest::get(redirect_url(
                "https://idp.example/sso",
                "SAMLRequest",
                AUTHN_REQUEST,
            )?)
        } else {
            CapturedRequest::post_raw(
                "https://sp.example/acs",
                [post_body("SAMLResponse", RESPONSE).into_bytes()],
            )
        };
        tx.send(request).await?;
    }
    tx.send(CapturedRequest::get("https://example.com/index.html")).await?;
    tx.send(CapturedRequest::get("https://idp.example/sso?SAMLResponse=%%%"))
        .await?;
    drop(tx);

    let stats = handle.await?;
    assert_eq!(
        stats,
        ListenerStats {
            received: 14,
            stored: 12,
            ignored: 1,
            dropped: 1,
            not_stored: 0,
        }
    );

    // Capacity 10: the two oldest captures were evicted.
    let messages = env.store.list();
    assert_eq!(messages.len(), 10);
    assert!(messages.windows(2).all(|w| w[0].time <= w[1].time));
    assert_eq!(messages.last().map(|m| m.content.as_str()), Some(RESPONSE));
    Ok(())
}

/// Tests that the CLI context sees what the listener stored.
#[test]
fn test_cli_context_reads_listener_history() -> anyhow::Result<()> {
    let env = TestEnv::new()?;
    let url = redirect_url("https://idp.example/sso", "SAMLRequest", AUTHN_REQUEST)?;
    env.listener.handle(&CapturedRequest::get(url));

    let ctx = smd_cli::AppContext::open(Some(env.dir.path()))?;
    assert_eq!(ctx.store.len(), 1);
    assert_eq!(ctx.store.list()[0].content, AUTHN_REQUEST);
    Ok(())
}
