//! Handlers for the filesystem-facing commands.
//!
//! The create/modify family (`touch`, `mkdir`, `chmod`, `chown`, plain
//! `rm`) validates operands and permissions exactly as if it were going to
//! act, then reports without mutating: the tree's shape is fixed for the
//! lifetime of the session. Recursive-force `rm` is the one command with a
//! different fate - it starts the decoy sequence.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use termfolio_vfs::{check, split_last, AccessKind, Mode, Node, VfsError};

use crate::dispatch::{name_visible, resolve_visible};
use crate::record::{ListingEntry, ResultRecord};
use crate::scripts::decoy_sequence;
use crate::shell::Shell;
use crate::time::format_mtime;

fn long_line(entry: &ListingEntry) -> String {
    format!(
        "{} {:<6} {:<8} {:>6} {} {}",
        entry.mode,
        entry.owner,
        entry.group,
        entry.size,
        format_mtime(entry.modified_at),
        entry.name
    )
}

impl Shell {
    pub(super) fn cmd_ls(&self, all: bool, long: bool, path: Option<&str>) -> Vec<ResultRecord> {
        let expr = path.unwrap_or("");
        let operand = path.unwrap_or(".");

        let (resolved_path, node) = match resolve_visible(&self.tree, &self.session, expr) {
            Ok(ok) => ok,
            Err(VfsError::PermissionDenied) => {
                return vec![ResultRecord::error(format!(
                    "ls: cannot open directory '{}': Permission denied",
                    operand
                ))]
            }
            Err(err) => {
                return vec![ResultRecord::error(format!(
                    "ls: cannot access '{}': {}",
                    operand, err
                ))]
            }
        };

        match node {
            Node::File(_) => {
                let name = resolved_path.rsplit('/').next().unwrap_or(operand);
                let entry = ListingEntry::from_node(name, node);
                if long {
                    vec![ResultRecord::info(long_line(&entry))]
                } else {
                    vec![ResultRecord::listing(vec![entry])]
                }
            }
            Node::Directory(dir) => {
                if !check(node, &self.session.actor_ref(), AccessKind::Read) {
                    return vec![ResultRecord::error(format!(
                        "ls: cannot open directory '{}': Permission denied",
                        operand
                    ))];
                }

                // directories before files; lexicographic within each
                // (child maps iterate in name order already)
                let mut dirs = Vec::new();
                let mut files = Vec::new();
                for (name, child) in &dir.children {
                    if !name_visible(&self.session, name, all) {
                        continue;
                    }
                    let entry = ListingEntry::from_node(name, child);
                    if child.is_directory() {
                        dirs.push(entry);
                    } else {
                        files.push(entry);
                    }
                }
                dirs.extend(files);

                if long {
                    dirs.iter()
                        .map(|entry| ResultRecord::info(long_line(entry)))
                        .collect()
                } else {
                    vec![ResultRecord::listing(dirs)]
                }
            }
        }
    }

    pub(super) fn cmd_cd(&mut self, target: Option<&str>) -> Vec<ResultRecord> {
        let target = match target {
            None => "~",
            Some("-") => {
                return match self.session.swap_cwd() {
                    // the tree is fixed, so a previous cwd always resolves
                    Some(cwd) => vec![ResultRecord::info(String::from(cwd))],
                    None => vec![ResultRecord::error("cd: OLDPWD not set")],
                };
            }
            Some(t) => t,
        };

        match resolve_visible(&self.tree, &self.session, target) {
            Ok((path, node)) => {
                if !node.is_directory() {
                    return vec![ResultRecord::error(format!(
                        "cd: {}: Not a directory",
                        target
                    ))];
                }
                if !check(node, &self.session.actor_ref(), AccessKind::Execute) {
                    return vec![ResultRecord::error(format!(
                        "cd: {}: Permission denied",
                        target
                    ))];
                }
                self.session.set_cwd(path);
                Vec::new()
            }
            Err(err) => vec![ResultRecord::error(format!("cd: {}: {}", target, err))],
        }
    }

    pub(super) fn cmd_cat(&self, paths: &[String]) -> Vec<ResultRecord> {
        let mut records = Vec::new();
        for path in paths {
            match resolve_visible(&self.tree, &self.session, path) {
                Err(err) => {
                    records.push(ResultRecord::error(format!("cat: {}: {}", path, err)));
                    break;
                }
                Ok((_, node)) => {
                    let file = match node.as_file() {
                        Some(file) => file,
                        None => {
                            records
                                .push(ResultRecord::error(format!("cat: {}: Is a directory", path)));
                            break;
                        }
                    };
                    if !check(node, &self.session.actor_ref(), AccessKind::Read) {
                        records.push(ResultRecord::error(format!(
                            "cat: {}: Permission denied",
                            path
                        )));
                        break;
                    }
                    for line in file.lines.get(self.session.locale()) {
                        records.push(ResultRecord::info(line.clone()));
                    }
                }
            }
        }
        records
    }

    pub(super) fn cmd_touch(&self, path: &str) -> Vec<ResultRecord> {
        let actor = self.session.actor_ref();

        // existing target: a simulated mtime update needs write on the node
        if let Ok((_, node)) = resolve_visible(&self.tree, &self.session, path) {
            return if check(node, &actor, AccessKind::Write) {
                Vec::new()
            } else {
                vec![ResultRecord::error(format!(
                    "touch: cannot touch '{}': Permission denied",
                    path
                ))]
            };
        }

        // new name: needs write on the parent directory
        let (parent_expr, name) = split_last(path);
        if name.is_empty() {
            return vec![ResultRecord::error(format!(
                "touch: cannot touch '{}': No such file or directory",
                path
            ))];
        }
        match resolve_visible(&self.tree, &self.session, parent_expr.unwrap_or("")) {
            Ok((_, parent)) if parent.is_directory() => {
                if check(parent, &actor, AccessKind::Write) {
                    Vec::new()
                } else {
                    vec![ResultRecord::error(format!(
                        "touch: cannot touch '{}': Permission denied",
                        path
                    ))]
                }
            }
            Ok(_) => vec![ResultRecord::error(format!(
                "touch: cannot touch '{}': Not a directory",
                path
            ))],
            Err(err) => vec![ResultRecord::error(format!(
                "touch: cannot touch '{}': {}",
                path, err
            ))],
        }
    }

    pub(super) fn cmd_mkdir(&self, path: &str) -> Vec<ResultRecord> {
        let fail = |err: &dyn core::fmt::Display| {
            vec![ResultRecord::error(format!(
                "mkdir: cannot create directory '{}': {}",
                path, err
            ))]
        };

        if resolve_visible(&self.tree, &self.session, path).is_ok() {
            return fail(&"File exists");
        }

        let (parent_expr, name) = split_last(path);
        if name.is_empty() {
            return fail(&VfsError::NotFound);
        }
        match resolve_visible(&self.tree, &self.session, parent_expr.unwrap_or("")) {
            Ok((_, parent)) if parent.is_directory() => {
                if check(parent, &self.session.actor_ref(), AccessKind::Write) {
                    Vec::new()
                } else {
                    fail(&VfsError::PermissionDenied)
                }
            }
            Ok(_) => fail(&VfsError::NotADirectory),
            Err(err) => fail(&err),
        }
    }

    pub(super) fn cmd_chmod(&self, mode: &str, path: &str) -> Vec<ResultRecord> {
        if Mode::parse_octal(mode).or_else(|_| Mode::parse(mode)).is_err() {
            return vec![ResultRecord::error(format!(
                "chmod: invalid mode: '{}'",
                mode
            ))];
        }

        match resolve_visible(&self.tree, &self.session, path) {
            Err(err) => vec![ResultRecord::error(format!(
                "chmod: cannot access '{}': {}",
                path, err
            ))],
            Ok((_, node)) => {
                // only the owner (or an elevated session) may change modes
                if self.session.privileged() || self.session.actor() == node.owner() {
                    Vec::new()
                } else {
                    vec![ResultRecord::error(format!(
                        "chmod: changing permissions of '{}': Operation not permitted",
                        path
                    ))]
                }
            }
        }
    }

    pub(super) fn cmd_chown(&self, spec: &str, path: &str) -> Vec<ResultRecord> {
        let owner = spec.split(':').next().unwrap_or("");
        if owner.is_empty() {
            return vec![ResultRecord::error(format!(
                "chown: invalid owner: '{}'",
                spec
            ))];
        }

        match resolve_visible(&self.tree, &self.session, path) {
            Err(err) => vec![ResultRecord::error(format!(
                "chown: cannot access '{}': {}",
                path, err
            ))],
            Ok(_) => {
                if self.session.privileged() {
                    Vec::new()
                } else {
                    vec![ResultRecord::error(format!(
                        "chown: changing ownership of '{}': Operation not permitted",
                        path
                    ))]
                }
            }
        }
    }

    pub(super) fn cmd_rm(
        &mut self,
        recursive: bool,
        force: bool,
        paths: &[String],
        now_ms: u64,
    ) -> Vec<ResultRecord> {
        // any recursive-force spelling walks straight into the trap,
        // permission model and operand validity be damned
        if recursive && force {
            let target = paths.first().map(String::as_str).unwrap_or("~");
            log::warn!("decoy deletion triggered for '{}'", target);
            self.sequencer
                .schedule_chain(now_ms, self.entries.len(), decoy_sequence());
            return vec![ResultRecord::info(format!(
                "rm: descending into '{}' ...",
                target
            ))];
        }

        let actor = self.session.actor_ref();
        let mut records = Vec::new();
        for path in paths {
            match resolve_visible(&self.tree, &self.session, path) {
                Err(VfsError::PermissionDenied) => records.push(ResultRecord::error(format!(
                    "rm: cannot remove '{}': Permission denied",
                    path
                ))),
                Err(_) => {
                    if !force {
                        records.push(ResultRecord::error(format!(
                            "rm: cannot remove '{}': No such file or directory",
                            path
                        )));
                    }
                }
                Ok((resolved_path, node)) => {
                    if node.is_directory() && !recursive {
                        records.push(ResultRecord::error(format!(
                            "rm: cannot remove '{}': Is a directory",
                            path
                        )));
                        continue;
                    }
                    // removal is governed by write permission on the parent
                    let allowed = match split_last(&resolved_path) {
                        (Some(parent), _) => {
                            match resolve_visible(&self.tree, &self.session, parent) {
                                Ok((_, parent_node)) => {
                                    check(parent_node, &actor, AccessKind::Write)
                                }
                                Err(_) => false,
                            }
                        }
                        // the root itself: write on the root decides
                        (None, _) => check(node, &actor, AccessKind::Write),
                    };
                    if !allowed {
                        records.push(ResultRecord::error(format!(
                            "rm: cannot remove '{}': Permission denied",
                            path
                        )));
                    }
                    // allowed: simulated success, nothing changes
                }
            }
        }
        records
    }
}
