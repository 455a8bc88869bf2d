//! Formatted output helpers for CLI commands.

use std::collections::BTreeMap;
use std::fmt::Write;

use manifestd_common::manifest::StoredManifest;

/// Renders registered manifests as a fixed-width table, one row per name.
#[must_use]
pub fn status_table(manifests: &BTreeMap<String, StoredManifest>) -> String {
    let mut out = format!(
        "{:<24} {:<40} {:<8} {:<25}\n",
        "NAME", "IMAGE", "PORT", "REGISTERED"
    );
    for (name, record) in manifests {
        let port = record.port.map_or_else(|| "-".to_owned(), |p| p.to_string());
        let _ = writeln!(
            out,
            "{:<24} {:<40} {:<8} {:<25}",
            name,
            record.manifest.image(),
            port,
            record.registered_at
        );
    }
    out
}
