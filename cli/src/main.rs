//! `tiff2bpp <input> <output> <t1> <t2> <t3> [<xRes> <yRes>]`

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use tiff2bpp_lib::{Parsed, RunConfig, args};

fn main() -> ExitCode {
    // .env may carry RUST_LOG as well as TWOBPP_* settings
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut argv = std::env::args();
    let command = argv.next().unwrap_or_else(|| "tiff2bpp".into());
    let rest: Vec<String> = argv.collect();

    let result = args::parse(&command, &rest).and_then(|parsed| match parsed {
        Parsed::Help(text) => {
            println!("{text}");
            Ok(None)
        }
        Parsed::Run(invocation) => {
            let config = RunConfig::load()?;
            tiff2bpp_lib::run(&invocation, &config).map(Some)
        }
    });

    match result {
        Ok(Some(summary)) => {
            tracing::info!(
                width = summary.width,
                height = summary.height,
                bytes = summary.packed_bytes,
                generated_input = summary.generated_input,
                "Done"
            );
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            tracing::error!(code = e.exit_code(), "Conversion aborted");
            ExitCode::from(e.exit_code())
        }
    }
}
