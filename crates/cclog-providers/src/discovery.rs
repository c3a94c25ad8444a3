use std::path::{Path, PathBuf};

use cclog_types::Project;
use chrono::{DateTime, Utc};
use walkdir::WalkDir;

use crate::paths::{decode_project_path, project_name};
use crate::sessions::is_session_file;
use crate::{Error, Result};

/// Ordering for [`ClaudeDir::list_projects`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectSort {
    /// Most recently modified first
    #[default]
    LastModified,
    Name,
    /// Most sessions first
    SessionCount,
}

/// A Claude Code data directory (usually `~/.claude`).
#[derive(Debug, Clone)]
pub struct ClaudeDir {
    root: PathBuf,
}

impl ClaudeDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.root.join("projects")
    }

    pub fn project_dir(&self, project: &Project) -> PathBuf {
        self.projects_dir().join(&project.encoded_path)
    }

    /// Every project directory, with its session count and modification time.
    pub fn list_projects(&self, sort: ProjectSort) -> Result<Vec<Project>> {
        let projects_dir = self.projects_dir();
        if !projects_dir.is_dir() {
            return Err(Error::ProjectsDirNotFound(projects_dir));
        }

        let mut projects = Vec::new();
        for entry in WalkDir::new(&projects_dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let Ok(metadata) = entry.metadata() else {
                continue;
            };

            let encoded_path = entry.file_name().to_string_lossy().to_string();
            let path = decode_project_path(&encoded_path);
            projects.push(Project {
                name: project_name(&path).to_string(),
                session_count: count_session_files(entry.path()),
                last_modified: metadata.modified().ok().map(DateTime::<Utc>::from),
                path,
                encoded_path,
            });
        }

        sort_projects(&mut projects, sort);
        Ok(projects)
    }

    /// Exact name match first, then a case-insensitive substring of the path or name.
    pub fn find_project(&self, name: &str) -> Result<Option<Project>> {
        let projects = self.list_projects(ProjectSort::default())?;

        if let Some(project) = projects.iter().find(|p| p.name == name) {
            return Ok(Some(project.clone()));
        }

        let needle = name.to_lowercase();
        Ok(projects.into_iter().find(|p| {
            p.path.to_lowercase().contains(&needle) || p.name.to_lowercase().contains(&needle)
        }))
    }

    /// Either the named project or every project.
    pub fn projects_to_search(&self, name: Option<&str>) -> Result<Vec<Project>> {
        match name {
            Some(name) => Ok(self.find_project(name)?.into_iter().collect()),
            None => self.list_projects(ProjectSort::default()),
        }
    }

    /// Locate `<session_id>.jsonl`, returning its path and owning project.
    pub fn find_session_file(
        &self,
        session_id: &str,
        project: Option<&str>,
    ) -> Result<Option<(PathBuf, Project)>> {
        for project in self.projects_to_search(project)? {
            let path = self.project_dir(&project).join(format!("{}.jsonl", session_id));
            if path.is_file() {
                return Ok(Some((path, project)));
            }
        }
        Ok(None)
    }
}

/// Main session files (`<uuid>.jsonl`) directly inside a project directory.
fn count_session_files(project_dir: &Path) -> usize {
    WalkDir::new(project_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_session_file(e.path()).is_some())
        .count()
}

fn sort_projects(projects: &mut [Project], sort: ProjectSort) {
    match sort {
        ProjectSort::Name => projects.sort_by(|a, b| a.name.cmp(&b.name)),
        ProjectSort::SessionCount => {
            projects.sort_by(|a, b| b.session_count.cmp(&a.session_count))
        }
        ProjectSort::LastModified => {
            projects.sort_by(|a, b| b.last_modified.cmp(&a.last_modified))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cclog_testing::{RecordBuilder, SESSION_ID, SessionWorld};

    #[test]
    fn test_list_projects() {
        let world = SessionWorld::new()
            .with_session("-Users-me-code-api", SESSION_ID, &[RecordBuilder::user("u1")])
            .with_raw_file("-Users-me-code-api", "agent-1234.jsonl", "")
            .with_raw_file("-Users-me-code-api", "notes.jsonl", "")
            .with_project("-Users-me-code-web");

        let dir = ClaudeDir::new(world.claude_dir());
        let projects = dir.list_projects(ProjectSort::Name).unwrap();

        let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["api", "web"]);
        assert_eq!(projects[0].path, "/Users/me/code/api");
        assert_eq!(projects[0].encoded_path, "-Users-me-code-api");
        assert_eq!(projects[0].session_count, 1);
        assert!(projects[0].last_modified.is_some());

        let by_count = dir.list_projects(ProjectSort::SessionCount).unwrap();
        assert_eq!(by_count[0].name, "api");
    }

    #[test]
    fn test_find_project() {
        let world = SessionWorld::new()
            .with_project("-Users-me-code-api")
            .with_project("-srv-Billing-service");
        let dir = ClaudeDir::new(world.claude_dir());

        let exact = dir.find_project("api").unwrap().unwrap();
        assert_eq!(exact.encoded_path, "-Users-me-code-api");

        let partial = dir.find_project("billing").unwrap().unwrap();
        assert_eq!(partial.path, "/srv/Billing/service");

        assert!(dir.find_project("nothing-like-this").unwrap().is_none());
    }

    #[test]
    fn test_missing_projects_dir() {
        let dir = ClaudeDir::new("/definitely/not/here");
        assert!(matches!(
            dir.list_projects(ProjectSort::default()),
            Err(Error::ProjectsDirNotFound(_))
        ));
    }

    #[test]
    fn test_find_session_file() {
        let world = SessionWorld::new()
            .with_project("-a-first")
            .with_session("-a-second", SESSION_ID, &[RecordBuilder::user("u1")]);
        let dir = ClaudeDir::new(world.claude_dir());

        let (path, project) = dir.find_session_file(SESSION_ID, None).unwrap().unwrap();
        assert_eq!(project.name, "second");
        assert!(path.ends_with(format!("{}.jsonl", SESSION_ID)));

        assert!(dir.find_session_file(SESSION_ID, Some("first")).unwrap().is_none());
        assert!(dir.find_session_file("missing", None).unwrap().is_none());
    }
}
