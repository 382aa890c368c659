//! Chart data derived from a full scan of the store.
//!
//! Both views are pure functions of [`MatchStore::read_all`] output and carry
//! no state of their own.
//!
//! [`MatchStore::read_all`]: crate::store::MatchStore::read_all

use std::collections::HashMap;

use serde::Serialize;

use crate::record::{GameMode, MatchId, MatchRecord};

/// One point of the kills/score time series, keyed by row position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformancePoint {
  /// Zero-based position in `read_all` order.
  pub index:    usize,
  pub match_id: MatchId,
  pub kills:    u32,
  pub score:    u32,
}

/// Number of matches played in one mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeCount {
  pub mode:    GameMode,
  pub matches: usize,
}

pub fn performance_series(records: &[MatchRecord]) -> Vec<PerformancePoint> {
  records
    .iter()
    .enumerate()
    .map(|(index, r)| PerformancePoint {
      index,
      match_id: r.id,
      kills: r.kills,
      score: r.score,
    })
    .collect()
}

/// Matches per mode, most-played first. Modes never played are omitted; ties
/// keep the declaration order of [`GameMode`].
pub fn mode_breakdown(records: &[MatchRecord]) -> Vec<ModeCount> {
  let mut counts: HashMap<GameMode, usize> = HashMap::new();
  for r in records {
    *counts.entry(r.mode).or_default() += 1;
  }

  let mut breakdown: Vec<ModeCount> = counts
    .into_iter()
    .map(|(mode, matches)| ModeCount { mode, matches })
    .collect();
  breakdown.sort_by(|a, b| b.matches.cmp(&a.matches).then(a.mode.cmp(&b.mode)));
  breakdown
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::record::NewMatch;

  fn record(id: MatchId, mode: GameMode, kills: u32, score: u32) -> MatchRecord {
    MatchRecord::new(id, NewMatch {
      mode,
      kills,
      score,
      match_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
    })
  }

  #[test]
  fn series_follows_row_order() {
    let records = vec![
      record(4, GameMode::Solo, 1, 300),
      record(9, GameMode::Duos, 6, 2400),
    ];
    let series = performance_series(&records);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].index, 0);
    assert_eq!(series[0].match_id, 4);
    assert_eq!(series[1].index, 1);
    assert_eq!(series[1].kills, 6);
    assert_eq!(series[1].score, 2400);
  }

  #[test]
  fn breakdown_sorts_by_count_then_mode() {
    let records = vec![
      record(1, GameMode::Squads, 0, 0),
      record(2, GameMode::Duos, 0, 0),
      record(3, GameMode::Squads, 0, 0),
      record(4, GameMode::Solo, 0, 0),
    ];
    let breakdown = mode_breakdown(&records);
    assert_eq!(breakdown, vec![
      ModeCount { mode: GameMode::Squads, matches: 2 },
      ModeCount { mode: GameMode::Solo, matches: 1 },
      ModeCount { mode: GameMode::Duos, matches: 1 },
    ]);
  }

  #[test]
  fn empty_history_has_no_chart_data() {
    assert!(performance_series(&[]).is_empty());
    assert!(mode_breakdown(&[]).is_empty());
  }
}
