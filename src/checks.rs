use anyhow::{bail, Result};

use crate::{docker::Docker, version::Version};

/// Base filesystem image required before a build, unless `BASE_IMAGE` overrides it.
pub const DEFAULT_BASE_IMAGE: &str = "alpine:3.22";

// Multi-stage builds landed in Docker 17.05. Fixed capability threshold,
// not user-configurable.
const MIN_ENGINE_MAJOR: u64 = 17;
const MIN_ENGINE_MINOR: u64 = 5;

/// Verify the environment can run the build: the engine must be reachable,
/// recent enough for multi-stage builds, and hold the base image locally.
///
/// Nothing is remediated here; each failure names the manual fix.
///
/// # Errors
///
/// Returns a distinct error for a missing docker binary, an unreachable
/// daemon, an engine below the multi-stage threshold, and an absent base image.
pub fn check(base_image: &str) -> Result<()> {
	let reported = Docker::server_version()?;

	if !supports_multi_stage(&Version::parse(&reported)) {
		bail!("Docker {reported} does not support multi-stage builds. Upgrade to Docker 17.05 or newer.");
	}

	if !Docker::image_exists(base_image)? {
		bail!("Required base image '{base_image}' was not found locally. Pull it first with 'docker pull {base_image}'.");
	}

	Ok(())
}

fn supports_multi_stage(version: &Version) -> bool {
	let major = version.major.parse::<u64>().unwrap_or(0);
	let minor = version.minor.parse::<u64>().unwrap_or(0);

	major > MIN_ENGINE_MAJOR || (major == MIN_ENGINE_MAJOR && minor >= MIN_ENGINE_MINOR)
}
