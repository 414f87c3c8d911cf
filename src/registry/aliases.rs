//! Non-standard license names seen in the wild.
//!
//! Heuristic license detectors label some well-known licenses with their own
//! shorthand. These map to the SPDX id the shorthand stands for.

/// Prefix some heuristic detectors put in front of an SPDX id.
pub const HEURISTIC_PREFIX: &str = "spdx";

const HEURISTIC_ALIASES: &[(&str, &str)] = &[
    ("spdxBSD3", "BSD-3-Clause"),
    ("Apache-2", "Apache-2.0"),
    ("Apache 2.0", "Apache-2.0"),
    ("BSD1", "BSD-1-Clause"),
    ("BSD2", "BSD-2-Clause"),
    ("BSD3", "BSD-3-Clause"),
    ("BSD4", "BSD-4-Clause"),
];

/// Look up the SPDX id a known alias stands for.
pub fn alias_target(text: &str) -> Option<&'static str> {
    HEURISTIC_ALIASES
        .iter()
        .find(|(alias, _)| *alias == text)
        .map(|(_, id)| *id)
}

/// Strip the heuristic prefix, returning the remainder when it is non-empty.
pub fn strip_heuristic_prefix(text: &str) -> Option<&str> {
    text.strip_prefix(HEURISTIC_PREFIX)
        .filter(|rest| !rest.is_empty())
}
