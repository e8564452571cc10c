use std::fmt;

/// Version components split out of a `MAJOR.MINOR.PATCH[-SUFFIX]` string.
///
/// Components stay opaque strings; nothing here checks that they are numeric.
/// Callers that need numbers (the engine version gate) parse on their side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
	pub major: String,
	pub minor: String,
	pub patch: String,
}

impl Version {
	/// Split a version string on its `.` delimiters.
	///
	/// `major` is everything before the first `.`, `minor` sits between the
	/// first and second `.`, and `patch` is truncated at the first `.` or `-`
	/// that follows it (`3.2.8-rc1` yields a patch of `8`).
	///
	/// An input with no `.` at all lands entirely in `major`, leaving the
	/// other components empty. Existing callers rely on that exact shape.
	#[must_use]
	pub fn parse(input: &str) -> Self {
		let mut parts = input.splitn(3, '.');

		let major = parts.next().unwrap_or_default().to_string();
		let minor = parts.next().unwrap_or_default().to_string();
		let patch = parts
			.next()
			.and_then(|rest| rest.split(['.', '-']).next())
			.unwrap_or_default()
			.to_string();

		Self { major, minor, patch }
	}
}

impl fmt::Display for Version {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_plain_version() {
		let version = Version::parse("3.2.8");

		assert_eq!(version.major, "3");
		assert_eq!(version.minor, "2");
		assert_eq!(version.patch, "8");
	}

	#[test]
	fn strips_prerelease_suffix_from_patch() {
		let version = Version::parse("3.2.8-rc1");

		assert_eq!(version.major, "3");
		assert_eq!(version.minor, "2");
		assert_eq!(version.patch, "8");
	}

	#[test]
	fn truncates_patch_at_extra_dot() {
		let version = Version::parse("17.05.0-ce");
		assert_eq!(version.patch, "0");

		let version = Version::parse("1.2.3.4");
		assert_eq!(version.patch, "3");
	}

	#[test]
	fn keeps_leading_zeros() {
		let version = Version::parse("17.05.0");

		assert_eq!(version.minor, "05");
	}

	#[test]
	fn undotted_input_is_all_major() {
		let version = Version::parse("nightly");

		assert_eq!(version.major, "nightly");
		assert_eq!(version.minor, "");
		assert_eq!(version.patch, "");
	}

	#[test]
	fn single_dot_leaves_patch_empty() {
		let version = Version::parse("3.2");

		assert_eq!(version.major, "3");
		assert_eq!(version.minor, "2");
		assert_eq!(version.patch, "");
	}

	#[test]
	fn displays_normalized_form() {
		assert_eq!(Version::parse("3.2.8-rc1").to_string(), "3.2.8");
	}
}
