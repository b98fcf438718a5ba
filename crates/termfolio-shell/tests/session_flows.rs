//! End-to-end flows through the public shell surface.

use termfolio_shell::{Payload, RecordKind, ResultRecord, Shell};

fn texts(records: &[ResultRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.text().map(String::from))
        .collect()
}

fn listing_names(records: &[ResultRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.entries())
        .flatten()
        .map(|e| e.name.clone())
        .collect()
}

#[test]
fn restricted_listing_hides_the_gated_directory() {
    let mut shell = Shell::new();

    let names = listing_names(&shell.execute("ls", 0));
    assert_eq!(names, ["about", "contact", "projects", "skills"]);

    // gated and dotted entries stay hidden even with -a while restricted
    let all = listing_names(&shell.execute("ls -a", 0));
    assert!(all.contains(&".hint".to_string()));
    assert!(!all.contains(&"sys".to_string()));

    shell.execute("unlock", 0);
    let names = listing_names(&shell.execute("ls", 0));
    assert_eq!(names, ["about", "contact", "projects", "skills", "sys"]);
}

#[test]
fn gated_rejections_read_exactly_like_genuine_absence() {
    let mut shell = Shell::new();

    let gated_cmd = texts(&shell.execute("chmod 644 about", 0));
    let unknown_cmd = texts(&shell.execute("chmodx 644 about", 0));
    assert_eq!(gated_cmd, ["sh: chmod: command not found"]);
    assert_eq!(unknown_cmd, ["sh: chmodx: command not found"]);

    let gated_path = texts(&shell.execute("cd sys", 0));
    let missing_path = texts(&shell.execute("cd syz", 0));
    assert_eq!(gated_path, ["cd: sys: No such file or directory"]);
    assert_eq!(missing_path, ["cd: syz: No such file or directory"]);
}

#[test]
fn failed_cd_yields_one_record_and_keeps_cwd() {
    let mut shell = Shell::new();
    shell.execute("cd about", 0);

    let records = shell.execute("cd nonexistent", 0);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, RecordKind::Error);
    assert_eq!(shell.session().cwd(), "~/about");
    assert_eq!(shell.session().previous_cwd(), Some("~"));
}

#[test]
fn cd_dash_swaps_back_and_forth() {
    let mut shell = Shell::new();
    shell.execute("cd about", 0);
    shell.execute("cd ../projects/archive", 0);
    assert_eq!(shell.session().cwd(), "~/projects/archive");

    assert_eq!(texts(&shell.execute("cd -", 0)), ["~/about"]);
    assert_eq!(shell.session().cwd(), "~/about");
    assert_eq!(texts(&shell.execute("cd -", 0)), ["~/projects/archive"]);

    let mut fresh = Shell::new();
    assert_eq!(texts(&fresh.execute("cd -", 0)), ["cd: OLDPWD not set"]);
}

#[test]
fn locale_switch_flips_cat_output_without_touching_the_tree() {
    let mut shell = Shell::new();
    shell.execute("cd about", 0);
    let before = shell.tree().clone();

    let english = texts(&shell.execute("cat bio.txt", 0));
    assert!(english.iter().any(|l| l.contains("Systems engineer")));

    shell.execute("lang zh", 0);
    let chinese = texts(&shell.execute("cat bio.txt", 0));
    assert!(chinese.iter().any(|l| l.contains("系统工程师")));
    assert_ne!(english, chinese);

    // files without a zh variant fall back to English
    shell.execute("cd ../skills", 0);
    let fallback = texts(&shell.execute("cat languages.txt", 0));
    assert!(fallback.iter().any(|l| l.contains("Rust")));

    assert_eq!(shell.tree(), &before);
}

#[test]
fn sudo_challenge_grants_and_redispatches_in_one_action() {
    let mut shell = Shell::new();

    let denied = texts(&shell.execute("cat contact/private.key", 0));
    assert_eq!(denied, ["cat: contact/private.key: Permission denied"]);

    let prompt = texts(&shell.execute("sudo cat contact/private.key", 0));
    assert_eq!(prompt, ["[sudo] password for guest:"]);
    assert!(shell.session().echo_suppressed());

    // the secret both elevates and runs the stored command
    let granted = shell.execute("hunter2", 0);
    assert!(texts(&granted)
        .iter()
        .any(|l| l.contains("BEGIN OPENSSH PRIVATE KEY")));
    assert!(shell.session().privileged());
    assert_eq!(shell.prompt(), "root@folio:~$");

    // the secret was neither echoed nor recorded
    assert!(!shell.session().history().iter().any(|l| l.contains("hunter2")));
    assert!(shell.entries().iter().all(|e| !e.line.contains("hunter2")));
}

#[test]
fn three_wrong_secrets_lock_out_and_drop_the_pending_command() {
    let mut shell = Shell::new();
    shell.execute("sudo ls sys", 0);

    assert_eq!(
        texts(&shell.execute("password", 0)),
        ["Sorry, try again.", "[sudo] password for guest:"]
    );
    shell.execute("letmein", 0);
    let locked = texts(&shell.execute("12345", 0));
    assert_eq!(locked, ["sudo: 3 incorrect password attempts"]);
    assert!(!shell.session().challenge_active());

    // the correct secret now parses as an ordinary (unknown) command
    let after = texts(&shell.execute("hunter2", 0));
    assert_eq!(after, ["sh: hunter2: command not found"]);
    assert!(!shell.session().privileged());
}

#[test]
fn interrupt_aborts_the_challenge_without_an_attempt() {
    let mut shell = Shell::new();
    shell.execute("sudo ls sys", 0);
    assert!(shell.session().echo_suppressed());

    let records = shell.interrupt();
    assert_eq!(texts(&records), ["^C"]);
    assert!(!shell.session().challenge_active());

    // with no challenge open, interrupt is a no-op
    assert!(shell.interrupt().is_empty());
}

#[test]
fn recursive_force_delete_is_a_harmless_show() {
    let mut shell = Shell::new();
    let before = shell.tree().clone();

    let first = shell.execute("rm -rf ~", 0);
    assert_eq!(texts(&first), ["rm: descending into '~' ..."]);
    let entry_count = shell.entries().len();

    // play the whole choreography, however late the host polls
    let mut now = 0;
    while let Some(due) = shell.next_due() {
        now = due + 25;
        shell.tick(now);
    }

    // every appended record landed on the rm entry, in scheduled order
    assert_eq!(shell.entries().len(), entry_count);
    let rm_entry = &shell.entries()[entry_count - 1];
    let lines = texts(&rm_entry.records);
    let scare = lines.iter().position(|l| l.contains("all files deleted")).unwrap();
    let reveal = lines.iter().position(|l| l.contains("just kidding")).unwrap();
    assert!(scare < reveal);

    // and the tree never moved
    assert_eq!(shell.tree(), &before);
    let names = listing_names(&shell.execute("ls", now));
    assert_eq!(names, ["about", "contact", "projects", "skills"]);
}

#[test]
fn sequencer_steps_never_fire_early_or_out_of_order() {
    let mut shell = Shell::new();
    shell.execute("unlock", 1_000);
    let entry = shell.entries().len() - 1;

    assert!(!shell.tick(1_200), "nothing is due before the first delay");
    let first_due = shell.next_due().unwrap();
    assert!(shell.tick(first_due));

    let lines = texts(&shell.entries()[entry].records);
    assert!(lines.last().unwrap().contains("foliod.service"));

    // drain the rest and confirm the final success lands last
    while let Some(due) = shell.next_due() {
        shell.tick(due);
    }
    let lines = texts(&shell.entries()[entry].records);
    assert!(lines.iter().any(|l| l.contains("Full feature set unlocked")));
    assert!(lines
        .iter()
        .position(|l| l.contains("Started foliod"))
        .unwrap()
        < lines.iter().position(|l| l.contains("tree grew")).unwrap());
}

#[test]
fn unlock_is_idempotent_after_the_first_run() {
    let mut shell = Shell::new();
    shell.execute("unlock", 0);
    while let Some(due) = shell.next_due() {
        shell.tick(due);
    }
    let again = texts(&shell.execute("unlock", 10_000));
    assert_eq!(again, ["Maintenance mode is already active."]);
    assert!(shell.next_due().is_none());
}

#[test]
fn pipes_and_redirection_are_recognized_and_refused() {
    let mut shell = Shell::new();
    assert_eq!(
        texts(&shell.execute("ls | grep about", 0)),
        ["sh: '|' is not supported here"]
    );
    assert_eq!(
        texts(&shell.execute("echo hi > notes.txt", 0)),
        ["sh: '>' is not supported here"]
    );
}

#[test]
fn simulated_mutations_report_without_changing_anything() {
    let mut shell = Shell::new();
    shell.execute("unlock", 0);
    let before = shell.tree().clone();

    // guest can write nowhere
    assert_eq!(
        texts(&shell.execute("touch notes.txt", 0)),
        ["touch: cannot touch 'notes.txt': Permission denied"]
    );
    assert_eq!(
        texts(&shell.execute("mkdir about", 0)),
        ["mkdir: cannot create directory 'about': File exists"]
    );

    // elevated, the same commands "succeed" silently - and change nothing
    shell.execute("sudo touch notes.txt", 0);
    assert!(shell.execute("hunter2", 0).is_empty());
    assert!(shell.execute("mkdir lab", 0).is_empty());
    assert_eq!(
        texts(&shell.execute("cat notes.txt", 0)),
        ["cat: notes.txt: No such file or directory"]
    );
    assert_eq!(shell.tree(), &before);
}

#[test]
fn long_listing_is_text_and_plain_listing_is_structured() {
    let mut shell = Shell::new();

    let plain = shell.execute("ls about", 0);
    assert!(matches!(plain[0].payload, Payload::Listing(_)));

    let long = shell.execute("ls -l about", 0);
    assert!(long.iter().all(|r| r.text().is_some()));
    assert!(texts(&long)[0].starts_with("-rw-r--r-- mira"));
}

#[test]
fn exit_emits_the_terminal_system_note() {
    let mut shell = Shell::new();
    let records = shell.execute("exit", 0);
    let note = records
        .iter()
        .find(|r| r.kind == RecordKind::SystemNote)
        .unwrap();
    assert_eq!(note.text(), Some(ResultRecord::END_SESSION));

    shell.reset();
    assert!(shell.entries().is_empty());
    assert_eq!(shell.prompt(), "guest@folio:~$");
}

#[test]
fn absolute_paths_ignore_the_working_directory() {
    let mut shell = Shell::new();
    let from_root = texts(&shell.execute("cat /about/bio.txt", 0));
    shell.execute("cd projects/archive", 0);
    let from_deep = texts(&shell.execute("cat /about/bio.txt", 0));
    assert_eq!(from_root, from_deep);
    assert!(!from_root.is_empty());
}

#[test]
fn introspection_commands_answer_from_session_state() {
    let mut shell = Shell::new();
    assert_eq!(texts(&shell.execute("whoami", 0)), ["guest"]);
    assert_eq!(texts(&shell.execute("pwd", 0)), ["/home/guest"]);
    assert_eq!(
        texts(&shell.execute("id", 0)),
        ["uid=1000(guest) gid=1000(guest) groups=1000(guest),1001(visitor)"]
    );
    assert_eq!(texts(&shell.execute("uname", 0)), ["TermfolioOS"]);
    assert_eq!(
        texts(&shell.execute("date", 1_755_993_600_000)),
        ["Sun Aug 24 00:00:00 UTC 2025"]
    );
    assert_eq!(texts(&shell.execute("echo hello   world", 0)), ["hello world"]);

    let history = texts(&shell.execute("history", 0));
    assert_eq!(history.len(), 7);
    assert!(history[0].ends_with("whoami"));
    assert!(history[6].ends_with("history"));
}

#[test]
fn man_covers_a_fixed_page_set() {
    let mut shell = Shell::new();
    assert_eq!(texts(&shell.execute("man", 0)), ["What manual page do you want?"]);
    assert!(texts(&shell.execute("man sudo", 0))[0].contains("SUDO(1)"));
    assert_eq!(
        texts(&shell.execute("man xyzzy", 0)),
        ["No manual entry for xyzzy"]
    );
}

#[test]
fn help_grows_once_unlocked() {
    let mut shell = Shell::new();
    let restricted = texts(&shell.execute("help", 0));
    assert!(!restricted.iter().any(|l| l.contains("Maintenance")));
    shell.execute("unlock", 0);
    let full = texts(&shell.execute("help", 0));
    assert!(full.iter().any(|l| l.contains("Maintenance")));
    assert!(full.len() > restricted.len());
}

#[test]
fn lang_validates_its_operand() {
    let mut shell = Shell::new();
    assert_eq!(texts(&shell.execute("lang", 0)), ["en"]);
    assert_eq!(texts(&shell.execute("lang zh", 0)), ["locale set to zh"]);
    assert_eq!(texts(&shell.execute("lang", 0)), ["zh"]);
    assert_eq!(
        texts(&shell.execute("lang fr", 0)),
        ["lang: unsupported locale 'fr' (expected en|zh)"]
    );
}

#[test]
fn group_column_grants_the_visitor_dropbox() {
    let mut shell = Shell::new();
    let lines = texts(&shell.execute("cat contact/references.txt", 0));
    assert!(lines.iter().any(|l| l.contains("visitor group")));
}

#[test]
fn traversal_needs_execute_on_every_directory_walked() {
    let mut shell = Shell::new();
    shell.execute("unlock", 0);
    // sys/motd.txt is world-readable, but sys/ itself is not traversable
    assert_eq!(
        texts(&shell.execute("cat sys/motd.txt", 0)),
        ["cat: sys/motd.txt: Permission denied"]
    );
    shell.execute("sudo cat sys/motd.txt", 0);
    let lines = texts(&shell.execute("hunter2", 0));
    assert!(lines.iter().any(|l| l.contains("maintenance side")));
}
