use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::AuditReport;

pub const ALL_PRESENT: &str = "All files contain the license header.";
pub const MISSING_HEADER: &str = "Files missing the license header:";

const BOX_WIDTH: usize = 48;

/// Render the report: result lines on stdout, summary on stderr unless `quiet`.
pub fn render(report: &AuditReport, quiet: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(report, &mut out)?;
    out.flush()?;

    if !quiet {
        render_summary(report);
    }

    Ok(())
}

/// Write the result lines, one violation per line, in discovery order.
pub fn write_result<W: Write>(report: &AuditReport, out: &mut W) -> io::Result<()> {
    if report.is_clean() {
        writeln!(out, "{}", ALL_PRESENT)?;
        return Ok(());
    }

    writeln!(out, "{}", MISSING_HEADER)?;
    for path in &report.violations {
        writeln!(out, "{}", path.display())?;
    }
    Ok(())
}

fn render_summary(report: &AuditReport) {
    let missing = report.violations.len();
    let skipped = report.skipped.len();

    eprintln!(
        "\n {} v{}",
        "license-headers".bold(),
        env!("CARGO_PKG_VERSION")
    );
    eprintln!(
        " Scanned: {} (*{})\n",
        report.root.display(),
        report.extension
    );

    eprintln!(" ┌────────────────────────────────────────────────────┐");
    eprintln!("{}", box_row(&"SUMMARY".bold().to_string(), "SUMMARY"));
    let checked = format!("Files checked      : {:>4}", report.scanned);
    eprintln!("{}", box_row(&checked, &checked));
    let rows: [(&str, fn(&str) -> ColoredString, &str, usize); 3] = [
        ("✓", |g| g.green(), "Header present", report.conforming()),
        ("✗", |g| g.red(), "Header missing", missing),
        ("⚠", |g| g.yellow(), "Skipped       ", skipped),
    ];
    for (glyph, paint, label, count) in rows {
        let plain = format!("{}  {} : {:>4}", glyph, label, count);
        let styled = format!("{}  {} : {:>4}", paint(glyph), label, count);
        eprintln!("{}", box_row(&styled, &plain));
    }
    eprintln!(" └────────────────────────────────────────────────────┘\n");

    if skipped > 0 {
        eprintln!(" {} Entries that could not be read:\n", "[SKIP]".yellow().bold());
        eprintln!("{}", skipped_table(report));
        eprintln!();
    }
}

/// Pad on the visible text so ANSI escapes in `styled` do not skew the box.
fn box_row(styled: &str, plain: &str) -> String {
    let pad = BOX_WIDTH.saturating_sub(plain.chars().count());
    format!(" │  {}{} │", styled, " ".repeat(pad))
}

/// Colors are only used when stderr, where the summary goes, is a terminal.
/// `NO_COLOR` turns them off and `CLICOLOR_FORCE` turns them on regardless.
pub fn init_colors() {
    let enabled = should_colorize(
        io::stderr().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var_os("CLICOLOR_FORCE").is_some_and(|v| v != "0"),
    );
    colored::control::set_override(enabled);
}

fn should_colorize(stderr_is_terminal: bool, no_color: bool, force: bool) -> bool {
    if force {
        return true;
    }
    stderr_is_terminal && !no_color
}

fn skipped_table(report: &AuditReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Path").add_attribute(Attribute::Bold),
            Cell::new("Reason").add_attribute(Attribute::Bold),
        ]);

    for entry in &report.skipped {
        table.add_row(vec![
            Cell::new(entry.path.display()),
            Cell::new(&entry.reason).fg(Color::Yellow),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkippedEntry;
    use std::path::PathBuf;

    fn report(violations: &[&str]) -> AuditReport {
        let mut report = AuditReport::new(PathBuf::from("proj"), ".java".to_string());
        report.scanned = violations.len() + 1;
        report.violations = violations.iter().map(PathBuf::from).collect();
        report
    }

    fn result_text(report: &AuditReport) -> String {
        let mut buf = Vec::new();
        write_result(report, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_clean_report_is_single_line() {
        assert_eq!(
            result_text(&report(&[])),
            "All files contain the license header.\n"
        );
    }

    #[test]
    fn test_violations_one_per_line_in_order() {
        let text = result_text(&report(&["proj/b/B.java", "proj/A.java"]));
        assert_eq!(
            text,
            "Files missing the license header:\nproj/b/B.java\nproj/A.java\n"
        );
    }

    #[test]
    fn test_skipped_entries_are_not_listed_as_missing() {
        let mut r = report(&[]);
        r.skipped.push(SkippedEntry {
            path: PathBuf::from("proj/Bin.java"),
            reason: "stream did not contain valid UTF-8".to_string(),
        });
        assert_eq!(result_text(&r), "All files contain the license header.\n");

        let table = skipped_table(&r).to_string();
        assert!(table.contains("proj/Bin.java"));
        assert!(table.contains("valid UTF-8"));
    }

    #[test]
    fn test_box_rows_align_with_ansi_escapes() {
        let plain = format!("{}  Header missing : {:>4}", "✗", 3);
        let styled = format!("\u{1b}[31m{}\u{1b}[0m  Header missing : {:>4}", "✗", 3);
        let colored_row = box_row(&styled, &plain);
        let plain_row = box_row(&plain, &plain);

        assert_eq!(plain_row.chars().count(), BOX_WIDTH + 6);
        assert_eq!(colored_row.replace("\u{1b}[31m", "").replace("\u{1b}[0m", ""), plain_row);
    }

    #[test]
    fn test_colors_follow_stderr() {
        assert!(should_colorize(true, false, false));
        assert!(!should_colorize(false, false, false));
        assert!(!should_colorize(true, true, false));
        assert!(should_colorize(false, true, true));
    }
}
