//! Command dispatch: parse, gate, route to handlers.
//!
//! Order of checks for every line: unsupported syntax, then parse, then
//! the feature gate, then permissions inside the handler. The gate runs
//! before permission checks and reports gated names exactly like missing
//! ones, so a restricted session cannot tell the difference.

mod fs;
mod system;

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use termfolio_session::Session;
use termfolio_vfs::{canonical, check, resolve_segments, AccessKind, Node, Tree, VfsError};

use crate::command::{Command, ParseError};
use crate::record::ResultRecord;
use crate::shell::Shell;

/// Directory names invisible while restricted.
pub(crate) const GATED_DIRS: &[&str] = &["sys"];

/// Commands rejected while restricted.
pub(crate) const GATED_COMMANDS: &[&str] = &["touch", "mkdir", "chmod", "chown"];

/// Every command name, for completion and `help`.
pub(crate) const COMMAND_NAMES: &[&str] = &[
    "cat", "cd", "chmod", "chown", "clear", "date", "echo", "exit", "help", "history", "id",
    "lang", "logout", "ls", "man", "mkdir", "pwd", "rm", "sudo", "touch", "uname", "unlock",
    "whoami",
];

/// The gated command's name, when the parsed command is gated.
fn gated_command_name(cmd: &Command) -> Option<&'static str> {
    match cmd {
        Command::Touch { .. } => Some("touch"),
        Command::Mkdir { .. } => Some("mkdir"),
        Command::Chmod { .. } => Some("chmod"),
        Command::Chown { .. } => Some("chown"),
        _ => None,
    }
}

/// Resolve a path expression the way the session is allowed to see it:
/// the feature gate first, then traverse permission on every directory
/// walked through, then the target node.
pub(crate) fn resolve_visible<'t>(
    tree: &'t Tree,
    session: &Session,
    expr: &str,
) -> Result<(String, &'t Node), VfsError> {
    let segments = resolve_segments(expr, session.cwd());

    if !session.feature_level().is_full()
        && segments
            .first()
            .map_or(false, |s| GATED_DIRS.contains(&s.as_str()))
    {
        // indistinguishable from genuine absence
        return Err(VfsError::NotFound);
    }

    let actor = session.actor_ref();
    let mut current = tree.root();
    for segment in &segments {
        let dir = current.as_directory().ok_or(VfsError::NotADirectory)?;
        if !check(current, &actor, AccessKind::Execute) {
            return Err(VfsError::PermissionDenied);
        }
        current = dir.children.get(segment).ok_or(VfsError::NotFound)?;
    }
    Ok((canonical(&segments), current))
}

/// Whether a child name is visible to this session's listings and
/// completion.
pub(crate) fn name_visible(session: &Session, name: &str, show_hidden: bool) -> bool {
    if name.starts_with('.') && !show_hidden {
        return false;
    }
    if !session.feature_level().is_full() && GATED_DIRS.contains(&name) {
        return false;
    }
    true
}

impl Shell {
    /// Parse and run one line. Used by `execute` and re-entered by the
    /// auth flow for the stored command.
    pub(crate) fn dispatch_line(&mut self, line: &str, now_ms: u64) -> Vec<ResultRecord> {
        let cmd = match Command::parse(line) {
            Ok(cmd) => cmd,
            Err(ParseError::EmptyLine) => return Vec::new(),
            Err(err) => return vec![ResultRecord::error(format!("{}", err))],
        };

        if !self.session.feature_level().is_full() {
            if let Some(name) = gated_command_name(&cmd) {
                log::debug!("gated command rejected: {}", name);
                let err = ParseError::CommandNotFound {
                    command: String::from(name),
                };
                return vec![ResultRecord::error(format!("{}", err))];
            }
        }

        self.run_command(cmd, now_ms)
    }

    fn run_command(&mut self, cmd: Command, now_ms: u64) -> Vec<ResultRecord> {
        match cmd {
            Command::Ls { all, long, path } => self.cmd_ls(all, long, path.as_deref()),
            Command::Cd { target } => self.cmd_cd(target.as_deref()),
            Command::Cat { paths } => self.cmd_cat(&paths),
            Command::Pwd => self.cmd_pwd(),
            Command::Whoami => self.cmd_whoami(),
            Command::Id => self.cmd_id(),
            Command::Date => self.cmd_date(now_ms),
            Command::Uname { all } => self.cmd_uname(all),
            Command::Echo { text } => self.cmd_echo(text),
            Command::Man { page } => self.cmd_man(page.as_deref()),
            Command::Sudo { line } => self.cmd_sudo(&line, now_ms),
            Command::Touch { path } => self.cmd_touch(&path),
            Command::Mkdir { path } => self.cmd_mkdir(&path),
            Command::Chmod { mode, path } => self.cmd_chmod(&mode, &path),
            Command::Chown { spec, path } => self.cmd_chown(&spec, &path),
            Command::Rm {
                recursive,
                force,
                paths,
            } => self.cmd_rm(recursive, force, &paths, now_ms),
            Command::History => self.cmd_history(),
            Command::Lang { code } => self.cmd_lang(code.as_deref()),
            Command::Unlock => self.cmd_unlock(now_ms),
            Command::Help => self.cmd_help(),
            Command::Clear => self.cmd_clear(),
            Command::Exit => self.cmd_exit(),
        }
    }

    /// Tab completion for a partial line: command names in the first
    /// token position, visible path segments afterwards.
    pub fn complete(&self, line: &str) -> Vec<String> {
        let split = line
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8());
        let (head, token) = match split {
            Some(i) => line.split_at(i),
            None => ("", line),
        };

        if head.trim().is_empty() {
            return COMMAND_NAMES
                .iter()
                .copied()
                .filter(|name| name.starts_with(token))
                .filter(|name| {
                    self.session.feature_level().is_full() || !GATED_COMMANDS.contains(name)
                })
                .map(String::from)
                .collect();
        }

        let (parent, prefix) = termfolio_vfs::split_last(token);
        let parent_expr = parent.unwrap_or("");
        let node = match resolve_visible(&self.tree, &self.session, parent_expr) {
            Ok((_, node)) => node,
            Err(_) => return Vec::new(),
        };
        let dir = match node.as_directory() {
            Some(dir) => dir,
            None => return Vec::new(),
        };
        if !check(node, &self.session.actor_ref(), AccessKind::Read) {
            return Vec::new();
        }

        let show_hidden = prefix.starts_with('.');
        dir.children
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .filter(|(name, _)| name_visible(&self.session, name, show_hidden))
            .map(|(name, child)| {
                let mut completed = String::new();
                if let Some(p) = parent {
                    completed.push_str(p);
                    if p != "/" {
                        completed.push('/');
                    }
                }
                completed.push_str(name);
                if child.is_directory() {
                    completed.push('/');
                }
                completed
            })
            .collect()
    }
}
