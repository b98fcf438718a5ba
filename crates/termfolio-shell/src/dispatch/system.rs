//! Handlers for introspection, locale, auth entry, and session commands.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use termfolio_vfs::Locale;

use crate::dispatch::GATED_COMMANDS;
use crate::record::ResultRecord;
use crate::scripts::startup_sequence;
use crate::shell::Shell;
use crate::time::format_timestamp;

/// What the guest's home expands to for `pwd`.
const HOME_PREFIX: &str = "/home/guest";

/// Fixed `uname -a` fields.
const UNAME_SYS: &str = "TermfolioOS";
const UNAME_RELEASE: &str = "0.4.1-folio";
const UNAME_MACHINE: &str = "wasm32";

fn man_page(name: &str) -> Option<&'static [&'static str]> {
    match name {
        "ls" => Some(&[
            "LS(1)",
            "",
            "NAME",
            "    ls - list directory contents",
            "",
            "SYNOPSIS",
            "    ls [-al] [path]",
            "",
            "    -a    include entries whose names begin with a dot",
            "    -l    long format: mode, owner, group, size, date",
        ]),
        "cd" => Some(&[
            "CD(1)",
            "",
            "NAME",
            "    cd - change the working directory",
            "",
            "SYNOPSIS",
            "    cd [path | - | ..]",
            "",
            "    With no argument, returns to ~. `cd -` swaps back to the",
            "    previous directory.",
        ]),
        "cat" => Some(&[
            "CAT(1)",
            "",
            "NAME",
            "    cat - print file contents",
            "",
            "SYNOPSIS",
            "    cat file...",
            "",
            "    Content follows the session locale; see lang(1).",
        ]),
        "sudo" => Some(&[
            "SUDO(1)",
            "",
            "NAME",
            "    sudo - execute a command as the superuser",
            "",
            "SYNOPSIS",
            "    sudo command...",
            "",
            "    Asks for a password. Three wrong answers and the request",
            "    is dropped. Choose wisely; passwords around here are",
            "    traditional.",
        ]),
        "rm" => Some(&[
            "RM(1)",
            "",
            "NAME",
            "    rm - remove files or directories",
            "",
            "SYNOPSIS",
            "    rm [-rf] file...",
            "",
            "    Removal is permanent. Probably. Try it and see.",
        ]),
        "lang" => Some(&[
            "LANG(1)",
            "",
            "NAME",
            "    lang - show or set the content locale",
            "",
            "SYNOPSIS",
            "    lang [en|zh]",
            "",
            "    Affects what cat prints; the filesystem itself never",
            "    changes.",
        ]),
        "unlock" => Some(&[
            "UNLOCK(1)",
            "",
            "NAME",
            "    unlock - enable the full feature set",
            "",
            "SYNOPSIS",
            "    unlock",
            "",
            "    Starts the maintenance services and reveals what they",
            "    maintain. One-way; there is no relock.",
        ]),
        "man" => Some(&[
            "MAN(1)",
            "",
            "NAME",
            "    man - show a manual page",
            "",
            "SYNOPSIS",
            "    man page",
        ]),
        _ => None,
    }
}

impl Shell {
    pub(super) fn cmd_pwd(&self) -> Vec<ResultRecord> {
        let cwd = self.session.cwd();
        let expanded = if cwd == "~" {
            String::from(HOME_PREFIX)
        } else {
            cwd.replacen('~', HOME_PREFIX, 1)
        };
        vec![ResultRecord::info(expanded)]
    }

    pub(super) fn cmd_whoami(&self) -> Vec<ResultRecord> {
        vec![ResultRecord::info(String::from(self.session.display_actor()))]
    }

    pub(super) fn cmd_id(&self) -> Vec<ResultRecord> {
        if self.session.privileged() {
            return vec![ResultRecord::info("uid=0(root) gid=0(root) groups=0(root)")];
        }
        let actor = self.session.actor();
        let groups: Vec<String> = self
            .session
            .groups()
            .iter()
            .enumerate()
            .map(|(i, g)| format!("{}({})", 1000 + i, g))
            .collect();
        vec![ResultRecord::info(format!(
            "uid=1000({}) gid=1000({}) groups={}",
            actor,
            actor,
            groups.join(",")
        ))]
    }

    pub(super) fn cmd_date(&self, now_ms: u64) -> Vec<ResultRecord> {
        vec![ResultRecord::info(format_timestamp(now_ms))]
    }

    pub(super) fn cmd_uname(&self, all: bool) -> Vec<ResultRecord> {
        let text = if all {
            format!(
                "{} {} {} #418 {} {}",
                UNAME_SYS,
                crate::shell::HOST_NAME,
                UNAME_RELEASE,
                UNAME_MACHINE,
                UNAME_SYS
            )
        } else {
            String::from(UNAME_SYS)
        };
        vec![ResultRecord::info(text)]
    }

    pub(super) fn cmd_echo(&self, text: String) -> Vec<ResultRecord> {
        vec![ResultRecord::info(text)]
    }

    pub(super) fn cmd_man(&self, page: Option<&str>) -> Vec<ResultRecord> {
        let page = match page {
            Some(page) => page,
            None => return vec![ResultRecord::error("What manual page do you want?")],
        };
        // gated commands have no visible manual either
        let hidden = !self.session.feature_level().is_full() && GATED_COMMANDS.contains(&page);
        match man_page(page).filter(|_| !hidden) {
            Some(lines) => lines
                .iter()
                .map(|line| ResultRecord::info(*line))
                .collect(),
            None => vec![ResultRecord::error(format!("No manual entry for {}", page))],
        }
    }

    pub(super) fn cmd_sudo(&mut self, line: &str, now_ms: u64) -> Vec<ResultRecord> {
        if self.session.privileged() {
            return self.dispatch_line(line, now_ms);
        }
        self.session.begin_challenge(line);
        vec![ResultRecord::info(format!(
            "[sudo] password for {}:",
            self.session.actor()
        ))]
    }

    pub(super) fn cmd_history(&self) -> Vec<ResultRecord> {
        self.session
            .history()
            .iter()
            .enumerate()
            .map(|(i, line)| ResultRecord::info(format!("{:>4}  {}", i + 1, line)))
            .collect()
    }

    pub(super) fn cmd_lang(&mut self, code: Option<&str>) -> Vec<ResultRecord> {
        let code = match code {
            None => return vec![ResultRecord::info(self.session.locale().code())],
            Some(code) => code,
        };
        match Locale::from_code(code) {
            Some(locale) => {
                self.session.set_locale(locale);
                vec![ResultRecord::success(format!("locale set to {}", code))]
            }
            None => vec![ResultRecord::error(format!(
                "lang: unsupported locale '{}' (expected en|zh)",
                code
            ))],
        }
    }

    pub(super) fn cmd_unlock(&mut self, now_ms: u64) -> Vec<ResultRecord> {
        if !self.session.unlock_features() {
            return vec![ResultRecord::info("Maintenance mode is already active.")];
        }
        self.sequencer
            .schedule_chain(now_ms, self.entries.len(), startup_sequence());
        vec![ResultRecord::info(
            "Starting foliod.service - portfolio maintenance daemon ...",
        )]
    }

    pub(super) fn cmd_help(&self) -> Vec<ResultRecord> {
        let mut lines: Vec<&str> = vec![
            "Browsing:",
            "  ls [-al] [path]     list a directory",
            "  cd [path | -]       change directory",
            "  cat <file>...       print file contents",
            "  pwd                 print the working directory",
            "",
            "Session:",
            "  whoami, id          who you are",
            "  date, uname [-a]    when and what this is",
            "  history             what you have typed",
            "  lang [en|zh]        content locale",
            "  sudo <cmd>          run a command elevated",
            "  man <page>          read the fine manual",
            "  clear, exit         housekeeping",
        ];
        if self.session.feature_level().is_full() {
            lines.extend([
                "",
                "Maintenance:",
                "  touch, mkdir        create things (allegedly)",
                "  chmod, chown        adjust things (allegedly)",
                "  rm [-rf]            remove things (carefully)",
            ]);
        }
        lines
            .into_iter()
            .map(ResultRecord::info)
            .collect()
    }

    pub(super) fn cmd_clear(&self) -> Vec<ResultRecord> {
        vec![ResultRecord::note(ResultRecord::CLEAR_SCREEN)]
    }

    pub(super) fn cmd_exit(&self) -> Vec<ResultRecord> {
        vec![
            ResultRecord::info("logout"),
            ResultRecord::note(ResultRecord::END_SESSION),
        ]
    }
}
