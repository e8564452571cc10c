use std::{
	fs,
	path::{Path, PathBuf},
};

use super::{Docker, Error};
use crate::{reference::ImageReference, version::Version};

const DOCKERFILE_TEMPLATE: &str = include_str!("../templates/Dockerfile");
const ENTRYPOINT: &str = include_str!("../templates/entrypoint.sh");
const CHECKSUM_MANIFEST: &str = include_str!("../templates/traefik.sha256");

/// Materializes a build context for the requested version and drives the
/// engine through build and tagging.
pub struct Builder {
	reference: ImageReference,
	base_image: String,
	latest: bool,
	edge: bool,
}

impl Builder {
	#[must_use]
	pub const fn new(reference: ImageReference, base_image: String) -> Self {
		Self {
			reference,
			base_image,
			latest: false,
			edge: false,
		}
	}

	#[must_use]
	pub fn tag_latest(mut self, latest: bool) -> Self {
		self.latest = latest;
		self
	}

	#[must_use]
	pub fn tag_edge(mut self, edge: bool) -> Self {
		self.edge = edge;
		self
	}

	/// Build the image and apply any extra tags, returning every name the
	/// result was tagged with (the build name first).
	///
	/// # Errors
	///
	/// Returns an error if the tag is reserved, the requested version has no
	/// recorded checksum, the build context cannot be written, or the engine
	/// reports a failure.
	pub fn build(&self) -> Result<Vec<String>, Error> {
		// Enforced again here so the builder stays safe if the CLI check is
		// ever bypassed.
		if self.reference.has_reserved_tag() {
			return Err(Error::ReservedTag(self.reference.tag.clone()));
		}

		let version = Version::parse(&self.reference.tag);
		let checksum = resolve_checksum(CHECKSUM_MANIFEST, &version)
			.ok_or_else(|| Error::UnknownVersion(self.reference.tag.clone()))?;

		let context = self.materialize_context(&version, checksum)?;

		let build_name = self.reference.build_name();
		Docker::build(&context, &build_name)?;

		let mut names = vec![build_name];
		if self.latest {
			names.push(self.apply_tag("latest", &names[0])?);
		}
		if self.edge {
			names.push(self.apply_tag("edge", &names[0])?);
		}

		Ok(names)
	}

	fn apply_tag(&self, tag: &str, source: &str) -> Result<String, Error> {
		let target = format!("{}:{tag}", self.reference.build_base());
		Docker::tag(source, &target)?;

		Ok(target)
	}

	/// Write the rendered Dockerfile and the entrypoint script into a fresh
	/// directory under the OS temp root. The directory is left behind for the
	/// OS temp lifecycle to reclaim.
	fn materialize_context(&self, version: &Version, checksum: &str) -> Result<PathBuf, Error> {
		let context = tempfile::Builder::new()
			.prefix("traefik-baseimage-")
			.tempdir()?
			.into_path();

		fs::write(
			context.join("Dockerfile"),
			render_dockerfile(&self.base_image, version, checksum),
		)?;

		write_entrypoint(&context)?;

		Ok(context)
	}
}

fn render_dockerfile(base_image: &str, version: &Version, checksum: &str) -> String {
	DOCKERFILE_TEMPLATE
		.replace("{:base_image}", base_image)
		.replace("{:version}", &version.to_string())
		.replace("{:checksum}", checksum)
}

/// Find the checksum column of the manifest line whose artifact matches the
/// version. Matching on `vMAJOR.MINOR.PATCH_` keeps `v3.2.8` from catching a
/// `v3.2.80` artifact.
fn resolve_checksum<'a>(manifest: &'a str, version: &Version) -> Option<&'a str> {
	let needle = format!("v{version}_");

	manifest.lines().find_map(|line| {
		let mut fields = line.split_whitespace();
		let checksum = fields.next()?;
		let artifact = fields.next()?;

		artifact.contains(&needle).then_some(checksum)
	})
}

fn write_entrypoint(context: &Path) -> Result<(), Error> {
	let path = context.join("entrypoint.sh");
	fs::write(&path, ENTRYPOINT)?;

	#[cfg(unix)]
	{
		use std::os::unix::fs::PermissionsExt;

		fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
	}

	Ok(())
}
