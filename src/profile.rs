//! OS profile extraction from the banner output.
//!
//! The banner plugin dumps every kernel version string found in the image.
//! The first line carrying the `Linux version` marker identifies the OS:
//! the token after the marker is the kernel version, a known distribution
//! name on the same line identifies the distro, and an Ubuntu-style
//! `#<build>~<version>` fragment carries the distribution version.
//!
//! Absence of the marker anywhere is a hard `ProfileNotFound`; a marker
//! line that only partially matches degrades field-by-field to "Unknown".

use crate::document::ProfileInfo;
use crate::error::{DumpsightError, Result};
use regex::Regex;
use std::sync::OnceLock;

const KERNEL_MARKER: &str = "Linux version ";

/// Placeholder for profile fields the banner line does not reveal.
pub const UNKNOWN: &str = "Unknown";

/// Distribution names recognized in banner lines, checked in order.
const DISTRIBUTIONS: &[&str] = &[
    "Ubuntu", "Debian", "Fedora", "CentOS", "Red Hat", "SUSE", "Arch",
];

/// Matches the `#<build>~<version>` build tag, e.g. "#83~20.04.1-Ubuntu".
fn build_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#\d+~(\d+(?:\.\d+)*)").expect("valid build tag regex"))
}

/// Extract the OS profile from the full captured banner text.
pub fn extract_profile(banner_text: &str) -> Result<ProfileInfo> {
    let line = banner_text
        .lines()
        .find(|line| line.contains(KERNEL_MARKER))
        .ok_or(DumpsightError::ProfileNotFound)?;

    let after_marker = match line.find(KERNEL_MARKER) {
        Some(at) => &line[at + KERNEL_MARKER.len()..],
        None => "",
    };

    let kernel_version = after_marker
        .split_whitespace()
        .next()
        .unwrap_or(UNKNOWN)
        .to_string();

    let distribution = DISTRIBUTIONS
        .iter()
        .find(|name| line.contains(*name))
        .map_or(UNKNOWN, |name| *name)
        .to_string();

    let distro_version = build_tag_regex()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map_or(UNKNOWN, |m| m.as_str())
        .to_string();

    Ok(ProfileInfo {
        kernel_version,
        distribution,
        distro_version,
        full_version: line.trim().to_string(),
    })
}
