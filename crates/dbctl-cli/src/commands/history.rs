//! History command implementation

use anyhow::{Context, Result};
use dbctl_core::ChangeLogEntry;

use crate::cli::{GlobalArgs, HistoryArgs, HistoryOutput};
use crate::context::RuntimeContext;

/// Characters of the content hash shown in table output
const SHORT_HASH_LEN: usize = 12;

/// Execute the history command
pub(crate) async fn execute(args: &HistoryArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;

    let mut entries = ctx
        .connection
        .connector()
        .fetch_change_log_entries(ctx.connection.connection_string())
        .await
        .context("Failed to read the change log")?;
    entries.sort_by_key(|e| e.change_date_time());

    match args.output {
        HistoryOutput::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        HistoryOutput::Table => {
            if entries.is_empty() {
                println!("No change log entries found.");
            } else {
                print!("{}", format_table(&entries));
            }
        }
    }
    Ok(())
}

fn format_table(entries: &[ChangeLogEntry]) -> String {
    let headers = ["VERSION", "DIRECTION", "APPLIED AT", "APPLIED BY", "HASH", "FILENAME"];
    let rows: Vec<[String; 6]> = entries
        .iter()
        .map(|e| {
            [
                e.version().to_string(),
                e.direction().to_string(),
                e.change_date_time().format("%Y-%m-%d %H:%M:%S").to_string(),
                e.applied_by().to_string(),
                e.content_hash().chars().take(SHORT_HASH_LEN).collect(),
                e.filename().to_string(),
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let mut push_line = |cells: Vec<&str>| {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    };

    push_line(headers.to_vec());
    for row in &rows {
        push_line(row.iter().map(String::as_str).collect());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_table_aligns_columns() {
        let at = Utc.with_ymd_and_hms(2020, 2, 14, 9, 5, 0).unwrap();
        let entries = vec![
            ChangeLogEntry::new("f-1.0.0-Initialize_database_change_log.ddl", "DbCtl", at, b"")
                .unwrap(),
            ChangeLogEntry::new("b-10.0.0-undo.sql", "ops", at, b"DROP TABLE t;").unwrap(),
        ];

        let table = format_table(&entries);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("VERSION  DIRECTION"));
        assert!(lines[1].starts_with("1.0.0    forward    2020-02-14 09:05:00  DbCtl"));
        assert!(lines[1].contains("e3b0c44298fc "));
        assert!(lines[2].starts_with("10.0.0   backward"));
        assert!(lines[2].ends_with("b-10.0.0-undo.sql"));
    }
}
