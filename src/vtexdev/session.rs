//! # Session
//!
//! The account and workspace remembered between invocations. A [`Session`] is
//! plain data: the CLI loads it, hands it to the orchestrator, and saves it back
//! after a successful run. Plan construction reads it to fill in defaults
//! (`link` without `--workspace` reuses the last one), so there is no ambient
//! "current account" anywhere in the process.

use crate::error::Result;
use crate::request::{CommandKind, ResolvedOptions};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const SESSION_FILENAME: &str = "session.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub workspace: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(SESSION_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(SESSION_FILENAME), content)?;
        Ok(())
    }

    /// Folds the effect of a successful command into the session.
    /// Returns `true` when something changed.
    pub fn record(&mut self, options: &ResolvedOptions) -> bool {
        let before = (self.account.clone(), self.workspace.clone());

        match options.command() {
            CommandKind::Login => {
                if let Some(account) = options.text("account") {
                    self.account = Some(account.to_string());
                }
            }
            CommandKind::Link | CommandKind::Deploy => {
                if let Some(workspace) = options.text("workspace") {
                    self.workspace = Some(workspace.to_string());
                }
            }
            CommandKind::Unlink => {
                if options.flag("all") {
                    self.workspace = None;
                }
            }
            _ => {}
        }

        let changed = before != (self.account.clone(), self.workspace.clone());
        if changed {
            self.updated_at = Some(Utc::now());
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::CommandRequest;

    fn resolved(request: CommandRequest) -> ResolvedOptions {
        request.resolve().unwrap()
    }

    #[test]
    fn login_records_account() {
        let mut session = Session::default();
        let changed = session.record(&resolved(
            CommandRequest::new(CommandKind::Login).with("account", "mystore"),
        ));
        assert!(changed);
        assert_eq!(session.account.as_deref(), Some("mystore"));
        assert!(session.updated_at.is_some());
    }

    #[test]
    fn link_records_workspace_and_unlink_all_clears_it() {
        let mut session = Session::default();
        session.record(&resolved(
            CommandRequest::new(CommandKind::Link).with("workspace", "feature-x"),
        ));
        assert_eq!(session.workspace.as_deref(), Some("feature-x"));

        session.record(&resolved(CommandRequest::new(CommandKind::Unlink)));
        assert_eq!(session.workspace.as_deref(), Some("feature-x"));

        session.record(&resolved(
            CommandRequest::new(CommandKind::Unlink).with("all", true),
        ));
        assert_eq!(session.workspace, None);
    }

    #[test]
    fn unrelated_commands_leave_session_untouched() {
        let mut session = Session::default();
        assert!(!session.record(&resolved(CommandRequest::new(CommandKind::Build))));
        assert_eq!(session, Session::default());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session {
            account: Some("mystore".into()),
            workspace: Some("dev".into()),
            updated_at: None,
        };
        session.save(dir.path().join("nested")).unwrap();
        let loaded = Session::load(dir.path().join("nested")).unwrap();
        assert_eq!(loaded, session);

        let missing = Session::load(dir.path().join("absent")).unwrap();
        assert_eq!(missing, Session::default());
    }
}
