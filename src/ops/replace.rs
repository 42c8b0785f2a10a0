use std::collections::BTreeMap;
use std::path::Path;

use crate::config::Tracker;
use crate::error::FatalError;
use crate::ops::manifest;
use crate::ops::version::TargetVersion;

/// Read the version out of the tracked files.
///
/// The first tracker is authoritative.  Later trackers that disagree
/// produce a warning, not an error.
pub fn current_version(trackers: &[Tracker], cwd: &Path) -> Result<String, FatalError> {
    if trackers.is_empty() {
        return Err(FatalError::NoTrackedFiles);
    }

    let mut current: Option<String> = None;
    for tracker in trackers {
        let file = cwd.join(&tracker.file);
        if !file.exists() {
            return Err(FatalError::FileNotFound(file));
        }
        let data = std::fs::read_to_string(&file)?;
        let version = manifest::read_version(&data, &tracker.pattern())?;
        match current.as_deref() {
            None => current = Some(version),
            Some(expected) if expected != version.as_str() => {
                let _ = crate::ops::shell::warn(format!(
                    "{} is at {}, expected {}",
                    tracker.file.display(),
                    version,
                    expected
                ));
            }
            Some(_) => {}
        }
    }
    Ok(current.expect("trackers is non-empty"))
}

/// Write `version` into every tracked file.
///
/// Files are processed in path order, read once each, and only written back
/// when their content actually changed.  With `dry_run` the files are left
/// alone and the pending change is shown instead, as a unified diff when
/// `noisy`.
pub fn do_version_replacements(
    trackers: &[Tracker],
    version: &str,
    cwd: &Path,
    noisy: bool,
    dry_run: bool,
) -> Result<bool, FatalError> {
    // Since we don't have a convenient insert-order map, let's do sorted, rather than random.
    let mut by_file = BTreeMap::new();
    for tracker in trackers {
        let file = tracker.file.clone();
        by_file.entry(file).or_insert_with(Vec::new).push(tracker);
    }

    for (path, trackers) in by_file.into_iter() {
        let file = cwd.join(&path);
        log::debug!("processing version update for file {}", file.display());
        if !file.exists() {
            return Err(FatalError::FileNotFound(file));
        }
        let data = std::fs::read_to_string(&file)?;
        let mut replaced = data.clone();

        for tracker in trackers {
            replaced = manifest::write_version(&replaced, &tracker.pattern(), version)?;
        }

        if data != replaced {
            if dry_run {
                let display_path = path.display().to_string();
                let data_lines: Vec<_> = data.lines().map(|s| format!("{}\n", s)).collect();
                let replaced_lines: Vec<_> = replaced.lines().map(|s| format!("{}\n", s)).collect();
                let diff = difflib::unified_diff(
                    &data_lines,
                    &replaced_lines,
                    display_path.as_str(),
                    display_path.as_str(),
                    "original",
                    "updated",
                    0,
                );
                if noisy {
                    let _ = crate::ops::shell::status(
                        "Updating",
                        format!(
                            "in {}\n{}",
                            path.display(),
                            itertools::join(diff.into_iter(), "")
                        ),
                    );
                } else {
                    let _ =
                        crate::ops::shell::status("Updating", format!("in {}", path.display()));
                }
            } else {
                std::fs::write(&file, replaced)?;
            }
        } else {
            log::trace!("{} is unchanged", file.display());
        }
    }
    Ok(true)
}

/// Resolve `target` against the tracked files' current version and apply it.
///
/// Returns the new version, or `None` when the target resolves to the
/// version already present.
pub fn bump_tracked_files(
    trackers: &[Tracker],
    target: &TargetVersion,
    cwd: &Path,
    noisy: bool,
    dry_run: bool,
) -> Result<Option<semver::Version>, FatalError> {
    let current = current_version(trackers, cwd)?;
    let current = semver::Version::parse(&current)?;
    if let Some(next) = target.bump(&current) {
        do_version_replacements(trackers, &next.to_string(), cwd, noisy, dry_run)?;
        Ok(Some(next))
    } else {
        log::debug!("tracked files already at {}", current);
        Ok(None)
    }
}
