#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use std::{env, process};

use anyhow::Result;
use clap::Parser;

mod checks;
mod docker;
mod reference;
mod version;

use docker::Builder;
use reference::ImageReference;

#[derive(Debug, Parser)]
#[clap(
	name = "traefik-baseimage",
	version,
	about = "Build and tag the Traefik base Docker image"
)]
struct Cli {
	/// Name for the built image, in the form 'repository/image:version'
	#[clap(short, long)]
	tag: String,

	/// Additionally tag the result as ':latest'
	#[clap(short, long)]
	latest: bool,

	/// Additionally tag the result as ':edge'
	#[clap(short, long)]
	edge: bool,
}

fn main() {
	// The usage screen shares the failure exit path, so `--help` and flag
	// errors both leave a non-zero status.
	let cli = match Cli::try_parse() {
		Ok(cli) => cli,
		Err(err) => {
			let _ = err.print();
			process::exit(1);
		}
	};

	if let Err(err) = run(cli) {
		eprintln!("{err}");
		process::exit(1);
	}
}

fn run(cli: Cli) -> Result<()> {
	let reference = ImageReference::parse(&cli.tag);
	if reference.has_reserved_tag() {
		return Err(docker::Error::ReservedTag(reference.tag).into());
	}

	let base_image =
		env::var("BASE_IMAGE").unwrap_or_else(|_| checks::DEFAULT_BASE_IMAGE.to_string());
	checks::check(&base_image)?;

	let mut names = Builder::new(reference, base_image)
		.tag_latest(cli.latest)
		.tag_edge(cli.edge)
		.build()?
		.into_iter();

	if let Some(name) = names.next() {
		println!("Image built as {name}");
	}
	for name in names {
		println!("Tagged as {name}");
	}

	Ok(())
}
