//! Build script for whatsnew.
//!
//! Generates a compile-time release notes table from `CHANGELOG.md` so the
//! demo application can register its sections without parsing markdown at
//! runtime.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
struct ChangelogSection {
    version: String,
    date: Option<String>,
    entries: Vec<ChangelogLine>,
}

#[derive(Debug, Clone)]
struct ChangelogLine {
    text: String,
    level: u16,
    highlight: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=CHANGELOG.md");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let current_version = env::var("CARGO_PKG_VERSION")?;

    let changelog_path = manifest_dir.join("CHANGELOG.md");
    let changelog = fs::read_to_string(&changelog_path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("Failed to read {}: {e}", changelog_path.display()),
        )
    })?;

    let mut sections = parse_changelog_sections(&changelog);
    assert_changelog_contains_version(&sections, &current_version, &changelog_path)?;

    // CHANGELOG.md is newest first; version indices count up from the oldest.
    sections.reverse();

    let out_path = out_dir.join("release_notes.rs");
    let contents = generate_release_notes_rs(&sections)?;
    fs::write(&out_path, contents).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("Failed to write {}: {e}", out_path.display()),
        )
    })?;

    Ok(())
}

fn assert_changelog_contains_version(
    sections: &[ChangelogSection],
    version: &str,
    changelog_path: &Path,
) -> io::Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for section in sections {
        if !seen.insert(section.version.as_str()) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Duplicate changelog section for version {} in {}",
                    section.version,
                    changelog_path.display()
                ),
            ));
        }
    }

    if !seen.contains(version) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Missing changelog section for version {} in {}",
                version,
                changelog_path.display()
            ),
        ));
    }

    Ok(())
}

fn parse_changelog_sections(changelog: &str) -> Vec<ChangelogSection> {
    let mut sections: Vec<ChangelogSection> = Vec::new();

    for line in changelog.lines() {
        if let Some((version, date)) = parse_version_heading(line) {
            sections.push(ChangelogSection {
                version,
                date,
                entries: Vec::new(),
            });
            continue;
        }

        let Some(section) = sections.last_mut() else {
            continue;
        };

        let trimmed = line.trim_end();
        if trimmed.trim().is_empty() {
            continue;
        }

        if let Some(heading) = trimmed.strip_prefix("### ") {
            section.entries.push(ChangelogLine {
                text: heading.trim().to_string(),
                level: 0,
                highlight: true,
            });
            continue;
        }

        let indent = trimmed.len() - trimmed.trim_start().len();
        let content = trimmed.trim_start();
        if let Some(bullet) = content
            .strip_prefix("- ")
            .or_else(|| content.strip_prefix("* "))
        {
            let (text, highlight) = strip_emphasis(bullet.trim());
            section.entries.push(ChangelogLine {
                text: text.to_string(),
                level: u16::try_from(indent / 2).unwrap_or(u16::MAX),
                highlight,
            });
            continue;
        }

        // Wrapped continuation of the previous bullet.
        if let Some(previous) = section.entries.last_mut() {
            previous.text.push(' ');
            previous.text.push_str(content);
        }
    }

    sections
}

fn strip_emphasis(text: &str) -> (&str, bool) {
    match text.strip_prefix("**").and_then(|t| t.strip_suffix("**")) {
        Some(inner) if !inner.is_empty() => (inner, true),
        _ => (text, false),
    }
}

fn parse_version_heading(line: &str) -> Option<(String, Option<String>)> {
    let trimmed = line.trim_end();
    if !trimmed.starts_with("## [") {
        return None;
    }

    let after_prefix = &trimmed[4..];
    let end_bracket = after_prefix.find(']')?;
    let version = &after_prefix[..end_bracket];
    if !is_simple_semver(version) {
        return None;
    }

    let mut date: Option<String> = None;
    let rest = after_prefix[end_bracket + 1..].trim();
    if let Some(after_dash) = rest.strip_prefix('-') {
        let value = after_dash.trim();
        if !value.is_empty() {
            date = Some(value.to_string());
        }
    }

    Some((version.to_string(), date))
}

fn is_simple_semver(value: &str) -> bool {
    let parts: Vec<&str> = value.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|ch| ch.is_ascii_digit()))
}

fn generate_release_notes_rs(sections: &[ChangelogSection]) -> io::Result<String> {
    use std::fmt::Write as _;

    let mut out = String::new();
    writeln!(&mut out, "// @generated").map_err(io::Error::other)?;
    writeln!(&mut out, "//").map_err(io::Error::other)?;
    writeln!(&mut out, "// Generated from CHANGELOG.md by build.rs.").map_err(io::Error::other)?;
    writeln!(&mut out).map_err(io::Error::other)?;
    writeln!(&mut out, "const RELEASE_NOTES: &[ReleaseNoteSection] = &[")
        .map_err(io::Error::other)?;
    for section in sections {
        let version = raw_string_literal(&section.version)?;
        let date = section.date.as_deref().map_or_else(
            || Ok("None".to_string()),
            |value| raw_string_literal(value).map(|literal| format!("Some({literal})")),
        )?;

        writeln!(&mut out, "    ReleaseNoteSection {{").map_err(io::Error::other)?;
        writeln!(&mut out, "        version: {version},").map_err(io::Error::other)?;
        writeln!(&mut out, "        date: {date},").map_err(io::Error::other)?;
        writeln!(&mut out, "        entries: &[").map_err(io::Error::other)?;
        for entry in &section.entries {
            let text = raw_string_literal(&entry.text)?;
            writeln!(
                &mut out,
                "            ReleaseNoteEntry {{ text: {text}, level: {}, highlight: {} }},",
                entry.level, entry.highlight
            )
            .map_err(io::Error::other)?;
        }
        writeln!(&mut out, "        ],").map_err(io::Error::other)?;
        writeln!(&mut out, "    }},").map_err(io::Error::other)?;
    }
    writeln!(&mut out, "];").map_err(io::Error::other)?;
    Ok(out)
}

fn raw_string_literal(value: &str) -> io::Result<String> {
    for hashes in 0..=10 {
        let hash_str = "#".repeat(hashes);
        let closing = format!("\"{hash_str}");
        if !value.contains(&closing) {
            return Ok(format!("r{hash_str}\"{value}\"{hash_str}"));
        }
    }

    Err(io::Error::new(
        io::ErrorKind::InvalidData,
        "Failed to generate raw string literal",
    ))
}
