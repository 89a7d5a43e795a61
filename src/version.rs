//! Build metadata embedded by `build.rs`.
//!
//! Git fields read [`UNKNOWN`] when the crate is built outside a checkout
//! (for example from a packaged tarball).

/// Placeholder for git metadata that was not available at build time.
pub const UNKNOWN: &str = "unknown";

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git branch at build time.
pub const GIT_BRANCH: &str = match option_env!("VERGEN_GIT_BRANCH") {
    Some(branch) => branch,
    None => UNKNOWN,
};

/// Git commit SHA at build time.
pub const GIT_SHA: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(sha) => sha,
    None => UNKNOWN,
};

const SHORT_SHA_LEN: usize = 7;

/// Whether the working tree had uncommitted changes at build time.
pub fn git_dirty() -> bool {
    option_env!("VERGEN_GIT_DIRTY") == Some("true")
}

/// Whether git metadata was captured at all.
pub fn built_from_checkout() -> bool {
    GIT_SHA != UNKNOWN
}

/// Abbreviated commit SHA.
pub fn short_sha() -> &'static str {
    GIT_SHA.get(..SHORT_SHA_LEN).unwrap_or(GIT_SHA)
}

/// `{version}+{branch}.{sha}`, suffixed `.dirty` for a modified tree.
///
/// `0.1.0+unknown.unknown` when built outside a checkout.
pub fn version_string() -> String {
    let dirty = if git_dirty() { ".dirty" } else { "" };
    format!("{PKG_VERSION}+{GIT_BRANCH}.{}{dirty}", short_sha())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_pkg_version() {
        assert!(version_string().starts_with(&format!("{PKG_VERSION}+{GIT_BRANCH}.")));
    }

    #[test]
    fn git_sha_is_hex_when_captured() {
        if built_from_checkout() {
            assert!(GIT_SHA.len() >= SHORT_SHA_LEN, "sha too short: {GIT_SHA}");
            assert!(GIT_SHA.chars().all(|c| c.is_ascii_hexdigit()), "not hex: {GIT_SHA}");
            assert_ne!(GIT_BRANCH, UNKNOWN, "branch missing alongside sha");
        } else {
            assert_eq!(short_sha(), UNKNOWN);
        }
    }

    #[test]
    fn short_sha_is_a_prefix() {
        assert!(GIT_SHA.starts_with(short_sha()));
        assert!(short_sha().len() <= SHORT_SHA_LEN);
    }

    #[test]
    fn dirty_suffix_matches_flag() {
        assert_eq!(version_string().ends_with(".dirty"), git_dirty());
    }
}
