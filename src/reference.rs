/// A `[REPO/]IMAGE[:TAG]` reference split into its parts.
///
/// `repository` is empty when the input carries no `/`, and `tag` is empty
/// when it carries no `:`. Parsing never fails; validation of the tag value
/// happens at the call sites that care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
	pub repository: String,
	pub image: String,
	pub tag: String,
}

/// Tags that must be requested through their dedicated flags.
const RESERVED_TAGS: [&str; 2] = ["latest", "edge"];

impl ImageReference {
	#[must_use]
	pub fn parse(input: &str) -> Self {
		let (repository, rest) = match input.split_once('/') {
			Some((repository, rest)) => (repository.to_string(), rest),
			None => (String::new(), input),
		};

		let (image, tag) = match rest.split_once(':') {
			Some((image, tag)) => (image.to_string(), tag.to_string()),
			None => (rest.to_string(), String::new()),
		};

		Self { repository, image, tag }
	}

	/// The image name without its tag, e.g. `myrepo/traefik`.
	#[must_use]
	pub fn build_base(&self) -> String {
		if self.repository.is_empty() {
			self.image.clone()
		} else {
			format!("{}/{}", self.repository, self.image)
		}
	}

	/// The fully tagged name handed to `docker build`, e.g. `myrepo/traefik:3.2.8`.
	#[must_use]
	pub fn build_name(&self) -> String {
		format!("{}:{}", self.build_base(), self.tag)
	}

	/// Whether the tag names one of the floating tags only the dedicated
	/// flags may apply.
	#[must_use]
	pub fn has_reserved_tag(&self) -> bool {
		RESERVED_TAGS.contains(&self.tag.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_repo_image_and_tag() {
		let reference = ImageReference::parse("myrepo/traefik:3.2.8");

		assert_eq!(reference.repository, "myrepo");
		assert_eq!(reference.image, "traefik");
		assert_eq!(reference.tag, "3.2.8");
	}

	#[test]
	fn repository_is_empty_without_slash() {
		let reference = ImageReference::parse("traefik:3.2.8");

		assert_eq!(reference.repository, "");
		assert_eq!(reference.image, "traefik");
		assert_eq!(reference.tag, "3.2.8");
	}

	#[test]
	fn tag_is_empty_without_colon() {
		let reference = ImageReference::parse("traefik");

		assert_eq!(reference.repository, "");
		assert_eq!(reference.image, "traefik");
		assert_eq!(reference.tag, "");
	}

	#[test]
	fn splits_on_first_slash_only() {
		let reference = ImageReference::parse("registry/team/traefik:v3");

		assert_eq!(reference.repository, "registry");
		assert_eq!(reference.image, "team/traefik");
		assert_eq!(reference.tag, "v3");
	}

	#[test]
	fn build_base_omits_empty_repository() {
		assert_eq!(ImageReference::parse("traefik:3.2.8").build_base(), "traefik");
		assert_eq!(
			ImageReference::parse("myrepo/traefik:3.2.8").build_base(),
			"myrepo/traefik"
		);
	}

	#[test]
	fn build_name_reassembles_reference() {
		assert_eq!(
			ImageReference::parse("myrepo/traefik:3.2.8").build_name(),
			"myrepo/traefik:3.2.8"
		);
	}

	#[test]
	fn latest_and_edge_tags_are_reserved() {
		assert!(ImageReference::parse("myrepo/traefik:latest").has_reserved_tag());
		assert!(ImageReference::parse("traefik:edge").has_reserved_tag());
		assert!(!ImageReference::parse("traefik:3.2.8").has_reserved_tag());
		assert!(!ImageReference::parse("traefik").has_reserved_tag());
	}
}
