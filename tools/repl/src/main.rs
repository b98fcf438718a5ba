//! Interactive driver for the termfolio core.
//!
//! The production presentation layer is a browser shell; this binary is
//! the same contract on a real terminal: read a line, `execute`, render
//! the records, and pump `tick` while a scripted chain is running.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;
use termfolio_shell::{Payload, RecordKind, ResultRecord, Shell};

#[derive(Parser)]
#[command(name = "termfolio", version, about = "Emulated shell over the portfolio filesystem")]
struct Args {
    /// Starting content locale (en or zh)
    #[arg(long, default_value = "en")]
    lang: String,

    /// Emit records as JSON lines instead of rendered text
    #[arg(long)]
    json: bool,

    /// Skip the welcome banner
    #[arg(long)]
    no_banner: bool,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn render(record: &ResultRecord, json: bool) {
    if json {
        println!("{}", record.to_json());
        return;
    }
    match &record.payload {
        Payload::Text(text) => match record.kind {
            RecordKind::Error => eprintln!("{}", text),
            RecordKind::Warning => println!("!! {}", text),
            RecordKind::SystemNote => {
                if text == ResultRecord::CLEAR_SCREEN {
                    print!("\x1B[2J\x1B[H");
                }
            }
            _ => println!("{}", text),
        },
        Payload::Listing(entries) => {
            let names: Vec<String> = entries
                .iter()
                .map(|e| {
                    if e.is_dir {
                        format!("{}/", e.name)
                    } else {
                        e.name.clone()
                    }
                })
                .collect();
            println!("{}", names.join("  "));
        }
    }
}

/// Play a running sequencer chain to completion, rendering each step's
/// records as they land on their entry.
fn animate(shell: &mut Shell, json: bool) {
    while let Some(due) = shell.next_due() {
        let now = now_ms();
        if due > now {
            thread::sleep(Duration::from_millis(due - now));
        }
        let counts: Vec<usize> = shell.entries().iter().map(|e| e.records.len()).collect();
        if !shell.tick(now_ms()) {
            continue;
        }
        for (i, entry) in shell.entries().iter().enumerate() {
            let seen = counts.get(i).copied().unwrap_or(0);
            for record in &entry.records[seen..] {
                render(record, json);
            }
        }
        let _ = io::stdout().flush();
    }
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut shell = Shell::new();
    if args.lang != "en" {
        // drop the output; a bad locale falls back to the default
        let _ = shell.execute(&format!("lang {}", args.lang), now_ms());
    }

    if !args.no_banner && !args.json {
        println!("termfolio - type `help` to look around, `exit` to leave.");
        println!();
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if shell.session().echo_suppressed() {
            print!("password: ");
        } else {
            print!("{} ", shell.prompt());
        }
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        let records = shell.execute(&line, now_ms());
        let ended = records.iter().any(|r| {
            r.kind == RecordKind::SystemNote && r.text() == Some(ResultRecord::END_SESSION)
        });
        for record in &records {
            render(record, args.json);
        }
        animate(&mut shell, args.json);

        if ended {
            break;
        }
    }

    Ok(())
}
