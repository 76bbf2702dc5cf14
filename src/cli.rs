use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use clap::builder::BoolishValueParser;

use crate::bitbucket::DEFAULT_API_URL;

/// Long flags that may also be spelled with a single dash (`-slug foo`).
const SINGLE_DASH_FLAGS: &[&str] = &["slug", "owner", "id", "config", "api-url", "help"];

/// bb2todotxt — print unresolved Bitbucket pull request tasks as todo.txt lines
#[derive(Parser, Debug, Clone)]
#[command(name = "bb2todotxt", about, disable_version_flag = true)]
pub struct Cli {
    /// Repository slug
    #[arg(long, default_value = "")]
    pub slug: String,

    /// Repository owner (workspace)
    #[arg(long, default_value = "")]
    pub owner: String,

    /// Pull request id
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub id: i64,

    /// Bitbucket credentials file (JSON with Username and Password)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print version and exit (`-v=false` turns it back off)
    #[arg(
        short = 'v',
        long = "version",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub version: bool,

    /// API root the task URL is built on
    #[arg(long, hide = true, default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

/// Rewrite `-slug`, `-id=3` and friends into `--slug`, `--id=3`, and
/// `-v=true` into `--version=true`. Arguments after a bare `--` are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for (i, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }

        let rewritten = arg.to_str().and_then(|s| {
            let rest = s.strip_prefix('-')?;
            if rest.starts_with('-') {
                return None;
            }
            if let Some(value) = rest.strip_prefix("v=") {
                return Some(OsString::from(format!("--version={value}")));
            }
            let name = rest.split('=').next().unwrap_or(rest);
            SINGLE_DASH_FLAGS
                .contains(&name)
                .then(|| OsString::from(format!("-{s}")))
        });
        out.push(rewritten.unwrap_or(arg));
    }

    out
}
