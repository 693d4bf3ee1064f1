use std::path::Path;
use std::time::Duration;

use crate::terminal::{colors, format, logging::PRINT_TARGET};
use colored::*;
use ptrmap_common::config::Config;
use ptrmap_core::SubnetGraph;
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

const BANNER: &str = r#"
             _
  _ __  | |_  _ __  _ __ ___    __ _  _ __
 | '_ \ | __|| '__|| '_ ` _ \  / _` || '_ \
 | |_) || |_ | |   | | | | | || (_| || |_) |
 | .__/  \__||_|   |_| |_| |_| \__,_|| .__/
 |_|                                 |_|
"#;

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }

    let text_content: String = format!("⟦ PTRMAP v{} ⟧ ", env!("CARGO_PKG_VERSION"));
    let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
    let text: ColoredString = text_content.bright_green().bold();
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2).bright_black();
    let output: String = format!("{}{}{}", sep, text, sep);

    print(&format!("{}", BANNER.bright_green()));
    print(&output);
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = UnicodeWidthStr::width(formatted.as_str());

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&format!("{}", line));
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    print(&format!("{}", sep));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    let message: String = format!("{} {}", prefix, msg.as_ref().color(colors::TEXT_DEFAULT));
    print(&message);
}

pub fn tree_head(idx: usize, name: &str) {
    let idx_str: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
    let output: String = format!(
        "{} {}",
        idx_str.color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    );
    print(&output);
}

pub fn as_tree_one_level(key_value_pair: &[format::Detail]) {
    let key_width: usize = key_value_pair.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (i, (key, value)) in key_value_pair.iter().enumerate() {
        let last: bool = i + 1 == key_value_pair.len();
        let branch: ColoredString = if !last {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };
        let dots: String = ".".repeat(key_width + 1 - key.len());
        let output: String = format!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::IPV4_ADDR),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        );
        print(&output);
    }
}

pub fn centerln(msg: &ColoredString) {
    let width: usize = UnicodeWidthStr::width(&**msg);
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(width) / 2);
    print(&format!("{}{}{}", space, msg, space));
}

const NO_RESULTS: &str = r#"
         _   _  ___    _   _    _    __  __ _____ ____
        | \ | |/ _ \  | \ | |  / \  |  \/  | ____/ ___|
        |  \| | | | | |  \| | / _ \ | |\/| |  _| \___ \
        | |\  | |_| | | |\  |/ ___ \| |  | | |___ ___) |
        |_| \_|\___/  |_| \_/_/   \_\_|  |_|_____|____/
"#;

pub fn no_results() {
    print(&format!("{}", NO_RESULTS.red().bold()));
}

/// Lists every responding subnet with its hosts, then a one-line summary.
pub fn mapping_summary(graph: &SubnetGraph, total_time: Duration, cfg: &Config) {
    let subnet_count: usize = graph.subnet_nodes().count();
    let host_count: usize = graph.host_nodes().count();

    if graph.is_empty() {
        header("no hostnames resolved", cfg.quiet);
        if cfg.quiet == 0 {
            no_results();
        }
        return;
    }

    if cfg.quiet < 2 {
        header("resolved subnets", cfg.quiet);
        for (idx, subnet) in graph.subnet_nodes().enumerate() {
            tree_head(idx, &format::subnet_title(subnet));
            as_tree_one_level(&format::host_details(graph, subnet));
            if idx + 1 != subnet_count {
                mprint!();
            }
        }
    }

    let hosts: ColoredString = format!("{host_count} hosts").bold().green();
    let subnets: ColoredString = format!("{subnet_count} subnets").bold().green();
    let total_time: ColoredString = format::elapsed(total_time).bold().yellow();
    let output: ColoredString =
        format!("Mapping Complete: {hosts} in {subnets} resolved in {total_time}").color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            fat_separator();
            centerln(&output);
        }
        _ => {
            mprint!();
            print(&format!("{} {}", "[+]".green().bold(), output));
        }
    }
}

pub fn saved(paths: &[&Path], q_level: u8) {
    if q_level > 1 {
        return;
    }
    for path in paths {
        print_status(format!("Saved {}", path.display()));
    }
}

pub fn end_of_program() {
    print(&format!("{}", "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR)));
}
