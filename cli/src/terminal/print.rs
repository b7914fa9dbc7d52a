//! Terminal rendering.
//!
//! Records (and map entries) are the program's result and go to stdout, one
//! item at a time, so they survive piping. Decoration such as headers and
//! summaries goes to stderr alongside the diagnostics.

use std::net::Ipv4Addr;
use std::time::Duration;

use colored::*;
use unicode_width::UnicodeWidthStr;

use adres_common::directory::{ComputerRecord, short_date};
use adres_common::success;

pub const TOTAL_WIDTH: usize = 64;

const KEY_WIDTH: usize = 7;

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let formatted = format!("⟦ {} ⟧", msg);
    let msg_len = UnicodeWidthStr::width(formatted.as_str());

    let dash_count = TOTAL_WIDTH.saturating_sub(msg_len);
    let left = dash_count / 2;
    let right = dash_count - left;

    let line = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    eprintln!("{line}");
}

pub fn fat_separator() {
    eprintln!("{}", "═".repeat(TOTAL_WIDTH).bright_black());
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    eprintln!("{space}{msg}");
}

pub fn no_results() {
    eprintln!("{}", "no records produced".red().bold());
}

/// One resolved computer. Quiet level 2 and up switches to a bare
/// tab-separated row for downstream tooling.
pub fn computer(idx: usize, record: &ComputerRecord, q_level: u8) {
    if q_level >= 2 {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            record.name,
            record.dns_host_name,
            record.operating_system,
            short_date(record.password_last_set),
            short_date(record.last_logon),
        );
        return;
    }

    tree_head(idx, &record.name);
    as_tree_one_level(vec![
        ("DNS".to_string(), record.dns_host_name.as_str().normal()),
        ("OS".to_string(), record.operating_system.as_str().normal()),
        (
            "PwdSet".to_string(),
            short_date(record.password_last_set).yellow(),
        ),
        ("Logon".to_string(), short_date(record.last_logon).yellow()),
    ]);
}

/// One address-map entry (`map` subcommand).
pub fn map_entry(addr: &Ipv4Addr, names: &str) {
    let addr = format!("{addr}");
    let dots = ".".repeat(17_usize.saturating_sub(addr.len()));
    println!(
        "{} {}{}{} {}",
        ">".bright_black(),
        addr.cyan(),
        dots.bright_black(),
        ":".bright_black(),
        names
    );
}

pub fn resolve_summary(records: usize, inputs: usize, total_time: Duration, q_level: u8) {
    let records = format!("{records} records").bold().green();
    let elapsed = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output = format!("{records} from {inputs} addresses in {elapsed}");

    match q_level {
        0 => {
            fat_separator();
            centerln(&output);
        }
        _ => success!("{}", output),
    }
}

fn tree_head(idx: usize, name: &str) {
    let idx_str = format!("[{}]", idx.to_string().cyan());
    println!("{} {}", idx_str.bright_black(), name.green());
}

fn as_tree_one_level(key_value_pair: Vec<(String, ColoredString)>) {
    for (i, (key, value)) in key_value_pair.iter().enumerate() {
        let last = i + 1 == key_value_pair.len();
        let branch = if last {
            "└─".bright_black()
        } else {
            "├─".bright_black()
        };
        println!(
            " {} {}{}{} {}",
            branch,
            key,
            ".".repeat(KEY_WIDTH.saturating_sub(key.len()))
                .bright_black(),
            ":".bright_black(),
            value
        );
    }
}
