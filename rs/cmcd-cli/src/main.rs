mod log;

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use cmcd::{Cmcd, Config, Encoded, Mode};
use url::Url;

/// Encode Common Media Client Data (CTA-5004) as HTTP headers or a query parameter.
#[derive(Parser, Clone, Debug)]
#[command(version)]
pub struct Cli {
	#[command(flatten)]
	log: log::Log,

	/// A TOML file with the per-session settings: session_id, content_id, stream_type, streaming_format, mode and [custom].
	#[arg(long, env = "CMCD_CONFIG")]
	config: Option<PathBuf>,

	/// Send the data as `headers` or a `query` parameter, overriding the config file.
	#[arg(long)]
	mode: Option<Mode>,

	/// Apply the query parameter to this URL, replacing any existing CMCD parameter.
	///
	/// Implies `--mode query`.
	#[arg(long)]
	url: Option<Url>,

	/// The items to encode, as `key` or `key=value`, ex. `br=3200 bs sid=abc com.example-myKey=5`.
	items: Vec<Cmcd>,
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	cli.log.init();

	let config = load(cli.config.as_deref())?;
	for line in run(&cli, &config)? {
		println!("{line}");
	}

	Ok(())
}

fn load(path: Option<&Path>) -> anyhow::Result<Config> {
	let Some(path) = path else {
		return Ok(Config::default());
	};

	let contents = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
	let config = toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))?;

	tracing::debug!(path = %path.display(), ?config, "loaded config");

	Ok(config)
}

/// Encode the session and command line items, returning the lines to print.
fn run(cli: &Cli, config: &Config) -> anyhow::Result<Vec<String>> {
	let mode = match (cli.mode, &cli.url) {
		(Some(Mode::Headers), Some(_)) => bail!("--url can't be used with --mode headers"),
		(_, Some(_)) => Mode::Query,
		(Some(mode), None) => mode,
		(None, None) => config.mode,
	};

	let mut items = config.items();
	items.extend(cli.items.iter().cloned());

	let encoded = Encoded::new(&items);
	tracing::info!(items = items.len(), fragments = encoded.len(), ?mode, "encoded");

	Ok(match (mode, &cli.url) {
		(Mode::Query, Some(url)) => {
			let mut url = url.clone();
			cmcd::apply_query(&mut url, &encoded);
			vec![url.to_string()]
		}
		(Mode::Query, None) => vec![encoded.query()],
		(Mode::Headers, _) => encoded
			.headers()
			.into_iter()
			.map(|(name, value)| format!("{name}: {value}"))
			.collect(),
	})
}
