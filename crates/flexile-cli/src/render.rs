//! Plain-text rendering of the results table and the two charts.

use std::fmt::Write as _;

use flexile_tracker::History;

/// Width of the longest bar in the mode chart.
const BAR_WIDTH: usize = 40;

/// The saved-matches table, or the empty-history hint.
pub fn table(history: &History) -> String {
  if history.is_empty() {
    return format!("{}\n", History::empty_message());
  }

  let mut out = String::new();
  let _ = writeln!(
    out,
    "{:>5}  {:<6}  {:>5}  {:>7}  {:<10}",
    "id", "mode", "kills", "score", "match_date"
  );
  for r in &history.records {
    let _ = writeln!(
      out,
      "{:>5}  {:<6}  {:>5}  {:>7}  {:<10}",
      r.id,
      r.mode.as_ref(),
      r.kills,
      r.score,
      r.match_date.format("%Y-%m-%d")
    );
  }
  out
}

/// "Performance Over Time" and "Games Played by Mode", as text.
pub fn charts(history: &History) -> String {
  if history.is_empty() {
    return format!("{}\n", History::empty_message());
  }

  let mut out = String::from("Kills and Scores Over Time\n");
  let _ = writeln!(out, "{:>5}  {:>5}  {:>7}", "match", "kills", "score");
  for p in &history.performance {
    let _ = writeln!(out, "{:>5}  {:>5}  {:>7}", p.index, p.kills, p.score);
  }

  out.push_str("\nGames Played by Mode\n");
  let max = history.modes.iter().map(|m| m.matches).max().unwrap_or(0);
  for m in &history.modes {
    let _ = writeln!(
      out,
      "{:<6}  {:<width$}  {}",
      m.mode.as_ref(),
      bar(m.matches, max),
      m.matches,
      width = BAR_WIDTH
    );
  }
  out
}

/// A bar scaled so that `max` fills [`BAR_WIDTH`]; non-zero counts always
/// show at least one block.
fn bar(count: usize, max: usize) -> String {
  if max == 0 || count == 0 {
    return String::new();
  }
  let len = (count * BAR_WIDTH).div_ceil(max).clamp(1, BAR_WIDTH);
  "█".repeat(len)
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use flexile_core::record::{GameMode, MatchRecord, NewMatch};

  use super::*;

  fn history() -> History {
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let records = [
      (GameMode::Duos, 3, 1500),
      (GameMode::Duos, 1, 400),
      (GameMode::Solo, 0, 90),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (mode, kills, score))| {
      MatchRecord::new(i as i64 + 1, NewMatch { mode, kills, score, match_date: date })
    })
    .collect();
    History::from_records(records)
  }

  #[test]
  fn empty_history_shows_hint() {
    let empty = History::from_records(Vec::new());
    assert_eq!(table(&empty), format!("{}\n", History::empty_message()));
    assert_eq!(charts(&empty), format!("{}\n", History::empty_message()));
  }

  #[test]
  fn table_lists_every_record() {
    let out = table(&history());
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].contains("Duos"));
    assert!(lines[1].contains("1500"));
    assert!(lines[3].contains("Solo"));
    assert!(lines[3].trim_end().ends_with("2024-01-01"));
  }

  #[test]
  fn bars_scale_to_the_busiest_mode() {
    assert_eq!(bar(2, 2).chars().count(), BAR_WIDTH);
    assert_eq!(bar(1, 2).chars().count(), BAR_WIDTH / 2);
    assert_eq!(bar(1, 1000).chars().count(), 1);
    assert!(bar(0, 5).is_empty());
  }

  #[test]
  fn charts_include_both_sections() {
    let out = charts(&history());
    assert!(out.starts_with("Kills and Scores Over Time\n"));
    assert!(out.contains("\nGames Played by Mode\n"));
    let duos = out.lines().find(|l| l.starts_with("Duos")).unwrap();
    assert!(duos.trim_end().ends_with('2'));
  }
}
