mod builder;

use std::{
	io,
	path::Path,
	process::{Command, Stdio},
};

use serde::Deserialize;

pub use builder::Builder;

/// Errors that can occur when interacting with the docker CLI.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Could not find the docker binary. Is Docker installed and on your PATH?")]
	NotInstalled,

	#[error("Could not connect to Docker. Is the docker daemon running?")]
	NotRunning,

	#[error("Tag '{0}' is reserved. Request it with --latest or --edge instead of --tag.")]
	ReservedTag(String),

	#[error("No checksum is recorded for version '{0}'. Check the requested tag against the released versions.")]
	UnknownVersion(String),

	#[error("docker build exited with status {0}")]
	BuildFailed(i32),

	#[error("{0}")]
	Command(String),

	#[error("Failed to run command: {0}")]
	Spawn(io::Error),

	#[error("Failed to prepare the build context: {0}")]
	BuildContext(#[from] io::Error),

	#[error("Failed to parse output from command: {0}")]
	ToString(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Deserialize)]
struct VersionReport {
	#[serde(rename = "Server")]
	server: Option<ServerVersion>,
}

#[derive(Debug, Deserialize)]
struct ServerVersion {
	#[serde(rename = "Version")]
	version: String,
}

/// A wrapper around the docker CLI.
pub struct Docker {}

impl Docker {
	/// Report the version of the docker engine (not the client).
	///
	/// # Errors
	///
	/// Returns an error if the docker binary is missing or the daemon is not running.
	pub fn server_version() -> Result<String, Error> {
		let output = Command::new("docker")
			.arg("version")
			.args(["--format", "{{json .}}"])
			.output()
			.map_err(spawn_error)?;

		// With the daemon down, `docker version` still prints the client block
		// and leaves `Server` null.
		let report: VersionReport =
			serde_json::from_slice(&output.stdout).map_err(|_| Error::NotRunning)?;

		report
			.server
			.map(|server| server.version)
			.ok_or(Error::NotRunning)
	}

	/// Check whether the given image is available locally, without pulling.
	///
	/// # Errors
	///
	/// Returns an error if the docker binary is missing or inspection fails
	/// for any reason other than the image being absent.
	pub fn image_exists(image: &str) -> Result<bool, Error> {
		let output = Command::new("docker")
			.arg("image")
			.arg("inspect")
			.arg(image)
			.stdout(Stdio::null())
			.output()
			.map_err(spawn_error)?;

		if output.status.success() {
			return Ok(true);
		}

		let stderr = String::from_utf8(output.stderr)?;
		if stderr.contains("No such image") {
			return Ok(false);
		}

		Err(Error::Command(format!(
			"Failed to inspect image: {}",
			stderr.trim()
		)))
	}

	/// Build the given context directory into an image with the given name,
	/// streaming build output through to the caller.
	///
	/// # Errors
	///
	/// Returns an error carrying the engine's exit status if the build fails.
	pub fn build(context: &Path, name: &str) -> Result<(), Error> {
		let status = Command::new("docker")
			.arg("build")
			.args(["--tag", name])
			.arg(context)
			.stdout(Stdio::inherit())
			.stderr(Stdio::inherit())
			.status()
			.map_err(spawn_error)?;

		if !status.success() {
			return Err(Error::BuildFailed(status.code().unwrap_or(1)));
		}

		Ok(())
	}

	/// Apply an additional name to an already built image.
	///
	/// # Errors
	///
	/// Returns an error if the engine rejects the tag.
	pub fn tag(source: &str, target: &str) -> Result<(), Error> {
		let output = Command::new("docker")
			.arg("tag")
			.arg(source)
			.arg(target)
			.output()
			.map_err(spawn_error)?;

		if !output.status.success() {
			return Err(Error::Command(format!(
				"Failed to tag image: {}",
				String::from_utf8(output.stderr)?.trim()
			)));
		}

		Ok(())
	}
}

fn spawn_error(err: io::Error) -> Error {
	if err.kind() == io::ErrorKind::NotFound {
		Error::NotInstalled
	} else {
		Error::Spawn(err)
	}
}
