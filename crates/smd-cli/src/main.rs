//! # SAML Message Decoder CLI

#![forbid(unsafe_code)]

use clap::Parser;
use smd_cli::{
    cli::{Cli, Command},
    commands::{
        run_clear, run_config, run_decode_post, run_decode_url, run_export, run_ingest, run_list,
        run_show,
    },
    output::error,
    AppContext,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let ctx = match AppContext::open(cli.home.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error(&format!("Failed to open data directory: {}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::DecodeUrl { url, store } => run_decode_url(url, store, &ctx, cli.output),
        Command::DecodePost(args) => run_decode_post(args, &ctx, cli.output),
        Command::Ingest { input } => run_ingest(input, &ctx, cli.output).await,
        Command::List => run_list(&ctx, cli.output),
        Command::Show { index } => run_show(index, &ctx, cli.output),
        Command::Clear => run_clear(&ctx),
        Command::Export { output_file } => run_export(&output_file, &ctx),
        Command::Config(cmd) => run_config(cmd, &ctx, cli.output),
    };

    if let Err(e) = result {
        error(&e.to_string());
        std::process::exit(1);
    }
}
