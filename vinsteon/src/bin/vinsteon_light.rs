//! Set the light level of one Insteon device through a vinsteon controller

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vinsteon::{dispatch, Delivery, Invocation};
use vinsteon_core::DEFAULT_PORT;

/// Set the light level of an Insteon device through a vinsteon controller
#[derive(Parser, Debug)]
#[command(name = "vinsteon-light", version, about, long_about = None)]
struct Args {
    /// Controller hostname or IP address (port 50051)
    hostname: String,

    /// First (most significant) address byte, hex
    #[arg(allow_hyphen_values = true)]
    addr1: String,

    /// Second address byte, hex
    #[arg(allow_hyphen_values = true)]
    addr2: String,

    /// Third address byte, hex
    #[arg(allow_hyphen_values = true)]
    addr3: String,

    /// Light level, decimal
    #[arg(allow_hyphen_values = true)]
    level: String,

    /// Use SendCmdReliable and wait for the device to acknowledge
    #[arg(short, long)]
    reliable: bool,

    /// Log at debug level when RUST_LOG is unset
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let delivery = if args.reliable {
        Delivery::Reliable
    } else {
        Delivery::Standard
    };

    let invocation = Invocation::parse(
        args.hostname,
        [args.addr1.as_str(), args.addr2.as_str(), args.addr3.as_str()],
        &args.level,
        delivery,
    )
    .context("invalid arguments")?;

    if let Err(e) = dispatch(&invocation).await {
        let context = failure_context(&invocation, &e);
        return Err(anyhow::Error::new(e).context(context));
    }

    Ok(())
}

/// Top-line diagnostic for a failed dispatch
fn failure_context(invocation: &Invocation, error: &vinsteon::Error) -> String {
    if error.is_connect_failure() {
        format!(
            "could not connect to controller at {}:{}",
            invocation.hostname, DEFAULT_PORT
        )
    } else if error.is_timeout() {
        format!(
            "controller at {} did not answer {} in time",
            invocation.hostname,
            invocation.command()
        )
    } else {
        format!(
            "failed to send {} to {}",
            invocation.command(),
            invocation.hostname
        )
    }
}
