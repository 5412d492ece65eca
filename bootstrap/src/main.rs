mod args;
mod command;
mod locator;

use crate::args::CommonArgs;
use crate::command::Command;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Scholarship portal backend")]
struct Cli {
    #[command(flatten)]
    common_args: CommonArgs,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let Cli {
        common_args,
        command,
    } = Cli::parse();

    let _sentry = init_sentry(&common_args);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    command.run(common_args).await
}

fn init_sentry(common_args: &CommonArgs) -> Option<sentry::ClientInitGuard> {
    let dsn = common_args.sentry_dsn.as_deref()?;

    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: common_args.sentry_environment.clone().map(Into::into),
            sample_rate: common_args.sentry_sample_rate.unwrap_or(1.0),
            traces_sample_rate: common_args.sentry_traces_sample_rate.unwrap_or(0.0),
            ..Default::default()
        },
    )))
}
