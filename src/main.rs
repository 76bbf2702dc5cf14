use clap::{CommandFactory, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bb2todotxt::VERSION;
use bb2todotxt::bitbucket::{TaskFetcher, tasks_url};
use bb2todotxt::cli::{Cli, normalize_args};
use bb2todotxt::config::Credentials;
use bb2todotxt::render::TodoRenderer;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    if cli.version {
        println!("{VERSION}");
        return;
    }

    init_logging();

    let renderer = match TodoRenderer::new() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Unable to start: {e}");
            std::process::exit(1);
        }
    };

    let creds = match Credentials::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", Cli::command().render_help());
            eprintln!("Unable to start: {e}");
            std::process::exit(1);
        }
    };

    let url = tasks_url(&cli.api_url, &cli.owner, &cli.slug, cli.id);
    info!(owner = %cli.owner, slug = %cli.slug, id = cli.id, "fetching pull request tasks");

    let tasks = match TaskFetcher::new(&creds).fetch_all(&url) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = renderer.write_to(&tasks, &mut std::io::stdout().lock()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
