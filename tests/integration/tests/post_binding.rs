//! HTTP-POST binding tests.

use smd_core::{Binding, SamlParameter};
use smd_protocol_saml::{
    classify, CapturedRequest, Classification, FormData, MissReason, RawChunk, RequestBody,
    WireDecoder,
};

use crate::common::{base64, deflate, fragments, post_body, TestEnv, LOGOUT_REQUEST, RESPONSE};

const ACS: &str = "https://sp.example/acs";

/// Tests that a body split across several raw fragments is reassembled.
#[test]
fn test_multi_fragment_raw_body() -> anyhow::Result<()> {
    let env = TestEnv::new()?;
    let body = post_body("SAMLResponse", RESPONSE);

    for parts in [1, 2, 3, 7] {
        let request = CapturedRequest::post_raw(ACS, fragments(body.as_bytes(), parts));
        let message = env
            .listener
            .handle(&request)
            .into_message()
            .ok_or_else(|| anyhow::anyhow!("expected a stored message for {parts} fragment(s)"))?;

        assert_eq!(message.binding, Binding::Post);
        assert_eq!(message.parameter, SamlParameter::SamlResponse);
        assert_eq!(message.content, RESPONSE);
        assert_eq!(message.parameter_value("RelayState"), Some("abc"));
    }

    assert_eq!(env.store.len(), 4);
    Ok(())
}

/// Tests that base64 of plain XML with a declaration skips inflation.
#[test]
fn test_plain_xml_is_not_inflated() -> anyhow::Result<()> {
    let mut form = FormData::new();
    form.insert("SAMLResponse".to_string(), vec![base64(RESPONSE.as_bytes())]);

    let recognized = classify(&CapturedRequest::post_form(ACS, form))
        .recognized()
        .ok_or_else(|| anyhow::anyhow!("expected a SAML message"))?;

    assert_eq!(WireDecoder::new().decode(&recognized)?, RESPONSE);
    Ok(())
}

/// Tests that a deflated POST payload without a declaration is inflated.
#[test]
fn test_deflated_post_payload_is_inflated() -> anyhow::Result<()> {
    let mut form = FormData::new();
    form.insert(
        "SAMLRequest".to_string(),
        vec![base64(&deflate(LOGOUT_REQUEST.as_bytes())?)],
    );

    let recognized = classify(&CapturedRequest::post_form(ACS, form))
        .recognized()
        .ok_or_else(|| anyhow::anyhow!("expected a SAML message"))?;

    assert_eq!(recognized.parameter, SamlParameter::SamlRequest);
    assert_eq!(WireDecoder::new().decode(&recognized)?, LOGOUT_REQUEST);
    Ok(())
}

/// Tests the eID signing parameters on the POST binding.
#[test]
fn test_eid_sign_parameters() -> anyhow::Result<()> {
    let env = TestEnv::new()?;
    let body = post_body("EidSignResponse", RESPONSE);

    let message = env
        .listener
        .handle(&CapturedRequest::post_raw(ACS, [body.into_bytes()]))
        .into_message()
        .ok_or_else(|| anyhow::anyhow!("expected a stored message"))?;

    assert_eq!(message.parameter, SamlParameter::EidSignResponse);
    assert_eq!(message.content, RESPONSE);
    Ok(())
}

/// Tests that the capture JSON shape round-trips into a decodable request.
#[test]
fn test_capture_record_from_json() -> anyhow::Result<()> {
    let record = serde_json::json!({
        "method": "POST",
        "url": ACS,
        "requestBody": {
            "raw": [{ "bytes": base64(post_body("SAMLResponse", RESPONSE).as_bytes()) }]
        }
    });

    let request = CapturedRequest::from_json(&record.to_string())?;
    let recognized = classify(&request)
        .recognized()
        .ok_or_else(|| anyhow::anyhow!("expected a SAML message"))?;
    assert_eq!(WireDecoder::new().decode(&recognized)?, RESPONSE);
    Ok(())
}

/// Tests POST bodies that cannot carry a message.
#[test]
fn test_unusable_post_bodies_are_ignored() -> anyhow::Result<()> {
    let env = TestEnv::new()?;

    let no_body = CapturedRequest {
        method: "POST".to_string(),
        url: ACS.to_string(),
        request_body: None,
    };
    let file_upload = CapturedRequest {
        method: "POST".to_string(),
        url: ACS.to_string(),
        request_body: Some(RequestBody {
            form_data: None,
            raw: Some(vec![RawChunk {
                bytes: None,
                file: Some("/tmp/upload.bin".to_string()),
            }]),
        }),
    };
    let unrelated = CapturedRequest::post_raw(ACS, [b"username=alice&password=secret".to_vec()]);

    assert_eq!(classify(&no_body), Classification::NotRecognized(MissReason::NoBody));
    assert_eq!(
        classify(&file_upload),
        Classification::NotRecognized(MissReason::UnreadableBody)
    );
    assert_eq!(
        classify(&unrelated),
        Classification::NotRecognized(MissReason::NoSamlParameter)
    );

    for request in [no_body, file_upload, unrelated] {
        env.listener.handle(&request);
    }
    assert!(env.store.is_empty());
    Ok(())
}
