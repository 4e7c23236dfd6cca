//! Dated artifact files under the output directory.

use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;

use crate::constants;
use crate::state::Artifact;

/// The output directory pinned to one calendar day.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    date: NaiveDate,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>, date: NaiveDate) -> Self {
        Self {
            root: root.into(),
            date,
        }
    }

    /// Workspace for today's local date.
    pub fn today(root: impl Into<PathBuf>) -> Self {
        Self::new(root, chrono::Local::now().date_naive())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// `<root>/<prefix>_<YYYY-MM-DD>.txt` for the workspace date.
    pub fn path(&self, artifact: Artifact) -> PathBuf {
        self.path_for(artifact, self.date)
    }

    fn path_for(&self, artifact: Artifact, date: NaiveDate) -> PathBuf {
        self.root.join(format!(
            "{}_{}.{}",
            artifact.prefix(),
            date.format(constants::DATE_FORMAT),
            constants::ARTIFACT_EXT
        ))
    }

    /// Scratch directory for per-run temporary files.
    pub fn scratch_dir(&self) -> PathBuf {
        self.root.join(constants::SCRATCH_DIR_NAME)
    }

    /// Creates the output directory if needed.
    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .wrap_err_with(|| format!("Failed to create output directory {}", self.root.display()))
    }

    /// Whether today's artifact exists and holds at least one non-blank line.
    pub fn has_content(&self, artifact: Artifact) -> bool {
        self.line_count(artifact) > 0
    }

    /// Non-blank line count of today's artifact; 0 when missing.
    pub fn line_count(&self, artifact: Artifact) -> usize {
        count_lines(&self.path(artifact))
    }

    /// Appends raw tool output to today's artifact, creating it on first write.
    /// A missing trailing newline is added so the next append starts a new line.
    pub fn append(&self, artifact: Artifact, bytes: &[u8]) -> Result<()> {
        let path = self.path(artifact);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .wrap_err_with(|| format!("Failed to open {}", path.display()))?;

        if bytes.is_empty() {
            return Ok(());
        }
        file.write_all(bytes)
            .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
        if !bytes.ends_with(b"\n") {
            file.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Replaces today's artifact with the given lines.
    pub fn write_lines(&self, artifact: Artifact, lines: &[String]) -> Result<()> {
        let path = self.path(artifact);
        let mut content = lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        fs::write(&path, content).wrap_err_with(|| format!("Failed to write {}", path.display()))
    }

    /// Sort-unique pass over today's artifact. Lines are kept byte for byte;
    /// only whitespace-only lines are dropped. A missing file is left missing.
    pub fn sort_unique(&self, artifact: Artifact) -> Result<usize> {
        let path = self.path(artifact);
        if !path.is_file() {
            return Ok(0);
        }
        let content = fs::read_to_string(&path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        let unique: Vec<String> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(ToString::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        self.write_lines(artifact, &unique)?;
        Ok(unique.len())
    }

    /// Most recent file for `artifact` dated strictly before the workspace date.
    pub fn latest_prior(&self, artifact: Artifact) -> Option<PathBuf> {
        let entries = fs::read_dir(&self.root).ok()?;
        let prefix = format!("{}_", artifact.prefix());
        let suffix = format!(".{}", constants::ARTIFACT_EXT);

        entries
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name();
                let name = name.to_str()?;
                let stamp = name.strip_prefix(&prefix)?.strip_suffix(&suffix)?;
                let date = NaiveDate::parse_from_str(stamp, constants::DATE_FORMAT).ok()?;
                (date < self.date && entry.path().is_file()).then_some(date)
            })
            .max()
            .map(|date| self.path_for(artifact, date))
    }

    /// Removes everything inside the output directory, keeping the directory.
    /// Returns the number of entries removed.
    pub fn clean(&self) -> Result<usize> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(e).wrap_err_with(|| format!("Failed to read {}", self.root.display()))
            }
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            let result = if path.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            result.wrap_err_with(|| format!("Failed to remove {}", path.display()))?;
            removed += 1;
        }
        Ok(removed)
    }
}

/// Counts non-blank lines, treating a missing or unreadable file as empty.
pub fn count_lines(path: &Path) -> usize {
    let Ok(file) = fs::File::open(path) else {
        return 0;
    };
    BufReader::new(file)
        .lines()
        .map_while(std::result::Result::ok)
        .filter(|line| !line.trim().is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn scratch() -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("output");
        (tmp, root)
    }

    #[test]
    fn test_artifact_path() {
        let ws = Workspace::new("output", date("2024-03-07"));
        assert_eq!(
            ws.path(Artifact::Subdomains),
            PathBuf::from("output/subdomains_2024-03-07.txt")
        );
        assert_eq!(
            ws.path(Artifact::NucleiResults),
            PathBuf::from("output/nuclei_results_2024-03-07.txt")
        );
    }

    #[test]
    fn test_append_and_sort_unique() {
        let (_tmp, root) = scratch();
        let ws = Workspace::new(&root, date("2024-03-07"));
        ws.ensure().unwrap();

        ws.append(Artifact::Subdomains, b"b.example.com\na.example.com").unwrap();
        ws.append(Artifact::Subdomains, b"a.example.com\n\nc.example.com\n").unwrap();
        assert_eq!(ws.line_count(Artifact::Subdomains), 4);

        assert_eq!(ws.sort_unique(Artifact::Subdomains).unwrap(), 3);
        let content = fs::read_to_string(ws.path(Artifact::Subdomains)).unwrap();
        assert_eq!(content, "a.example.com\nb.example.com\nc.example.com\n");
    }

    #[test]
    fn test_sort_unique_keeps_line_content() {
        let (_tmp, root) = scratch();
        let ws = Workspace::new(&root, date("2024-03-07"));
        ws.ensure().unwrap();

        ws.append(
            Artifact::Endpoints,
            b"https://example.com/a \n  \nhttps://example.com/a \nhttps://example.com/a\n",
        )
        .unwrap();
        assert_eq!(ws.sort_unique(Artifact::Endpoints).unwrap(), 2);
        let content = fs::read_to_string(ws.path(Artifact::Endpoints)).unwrap();
        assert_eq!(content, "https://example.com/a\nhttps://example.com/a \n");
    }

    #[test]
    fn test_append_empty_creates_file() {
        let (_tmp, root) = scratch();
        let ws = Workspace::new(&root, date("2024-03-07"));
        ws.ensure().unwrap();

        ws.append(Artifact::Ports, b"").unwrap();
        assert!(ws.path(Artifact::Ports).is_file());
        assert!(!ws.has_content(Artifact::Ports));
    }

    #[test]
    fn test_latest_prior_picks_newest_before_today() {
        let (_tmp, root) = scratch();
        fs::create_dir_all(&root).unwrap();
        for name in [
            "subdomains_2024-01-01.txt",
            "subdomains_2024-03-01.txt",
            "subdomains_2024-03-07.txt",
            "subdomains_2024-04-01.txt",
            "subdomains_garbage.txt",
            "new_subdomains_2024-03-06.txt",
        ] {
            fs::write(root.join(name), "x\n").unwrap();
        }

        let ws = Workspace::new(&root, date("2024-03-07"));
        assert_eq!(
            ws.latest_prior(Artifact::Subdomains),
            Some(root.join("subdomains_2024-03-01.txt"))
        );
    }

    #[test]
    fn test_latest_prior_none() {
        let (_tmp, root) = scratch();
        let ws = Workspace::new(&root, date("2024-03-07"));
        assert_eq!(ws.latest_prior(Artifact::Subdomains), None);

        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("subdomains_2024-03-07.txt"), "x\n").unwrap();
        assert_eq!(ws.latest_prior(Artifact::Subdomains), None);
    }

    #[test]
    fn test_clean_keeps_directory() {
        let (_tmp, root) = scratch();
        fs::create_dir_all(root.join(".scratch")).unwrap();
        fs::write(root.join("ports_2024-03-07.txt"), "1.2.3.4:80\n").unwrap();
        fs::write(root.join(".scratch").join("targets.txt"), "x\n").unwrap();

        let ws = Workspace::new(&root, date("2024-03-07"));
        assert_eq!(ws.clean().unwrap(), 2);
        assert!(root.is_dir());
        assert_eq!(fs::read_dir(&root).unwrap().count(), 0);
    }

    #[test]
    fn test_clean_missing_directory() {
        let (_tmp, root) = scratch();
        let ws = Workspace::new(root, date("2024-03-07"));
        assert_eq!(ws.clean().unwrap(), 0);
    }
}
