//! One-shot decoding of a single Redirect URL or POST body.

use smd_core::DecodedMessage;
use smd_protocol_saml::{classify, CapturedRequest, Classification, FormData, WireDecoder};

use crate::cli::DecodePostArgs;
use crate::context::AppContext;
use crate::output::{success, OutputFormat};

use super::messages::print_message;

/// Decodes the SAML message carried in a Redirect URL.
pub fn run_decode_url(
    url: String,
    store: bool,
    ctx: &AppContext,
    format: OutputFormat,
) -> crate::CliResult<()> {
    decode_and_report(&CapturedRequest::get(url), store, ctx, format)
}

/// Decodes the SAML message carried in a POST body.
pub fn run_decode_post(
    args: DecodePostArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let request = match &args.body_file {
        Some(path) => CapturedRequest::post_raw(args.url.clone(), [std::fs::read(path)?]),
        None => CapturedRequest::post_form(args.url.clone(), parse_fields(&args.fields)?),
    };

    decode_and_report(&request, args.store, ctx, format)
}

fn decode_and_report(
    request: &CapturedRequest,
    store: bool,
    ctx: &AppContext,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let mut message = decode(request)?;

    if store {
        message = ctx.store.append(message)?;
    }

    print_message(&message, format)?;

    if store && format == OutputFormat::Table {
        success(&format!("Stored ({} of {})", ctx.store.len(), ctx.store.capacity()));
    }

    Ok(())
}

/// Classifies and decodes one transaction.
pub fn decode(request: &CapturedRequest) -> crate::CliResult<DecodedMessage> {
    match classify(request) {
        Classification::Recognized(recognized) => {
            Ok(WireDecoder::new().decode_message(recognized)?)
        }
        Classification::NotRecognized(reason) => {
            Err(crate::CliError::NotRecognized(reason.to_string()))
        }
    }
}

/// Parses repeated `NAME=VALUE` arguments into form data.
///
/// Values are taken literally; no percent-decoding is applied.
pub fn parse_fields(fields: &[String]) -> crate::CliResult<FormData> {
    let mut form = FormData::new();

    for field in fields {
        let (name, value) = field.split_once('=').ok_or_else(|| {
            crate::CliError::InvalidArgument(format!("expected NAME=VALUE, got '{field}'"))
        })?;
        form.entry(name.to_string())
            .or_default()
            .push(value.to_string());
    }

    Ok(form)
}
