//! Map a parsed [`Table`] onto match records.

use flexile_core::{
  record::{Field, NewMatch},
  validate,
};

use crate::{
  Row, Table,
  error::{Error, Result, RowError},
};

/// Column names a batch upload must carry. Case-sensitive.
pub const REQUIRED_COLUMNS: [&str; 4] = [
  Field::REQUIRED[0].column(),
  Field::REQUIRED[1].column(),
  Field::REQUIRED[2].column(),
  Field::REQUIRED[3].column(),
];

/// Column positions of the required fields within one table.
struct Columns {
  mode:       usize,
  kills:      usize,
  score:      usize,
  match_date: usize,
}

impl Columns {
  fn locate(table: &Table) -> Result<Self> {
    let missing = table.missing_columns(&REQUIRED_COLUMNS);
    if !missing.is_empty() {
      return Err(Error::MissingColumns {
        missing: missing.into_iter().map(str::to_owned).collect(),
      });
    }

    let find = |field: Field| {
      table.column(field.column()).ok_or_else(|| Error::MissingColumns {
        missing: vec![field.column().to_owned()],
      })
    };
    Ok(Self {
      mode:       find(Field::Mode)?,
      kills:      find(Field::Kills)?,
      score:      find(Field::Score)?,
      match_date: find(Field::MatchDate)?,
    })
  }

  fn decode_row(&self, row: &Row) -> Result<NewMatch, Vec<RowError>> {
    let cell = |i: usize| row.fields.get(i).map_or("", String::as_str);

    validate::assemble(
      validate::mode(cell(self.mode)),
      validate::count_text(Field::Kills, cell(self.kills)),
      validate::count_text(Field::Score, cell(self.score)),
      validate::date(cell(self.match_date)),
    )
    .map_err(|errors| {
      errors
        .into_iter()
        .map(|error| RowError { row: row.number, line: row.line, error })
        .collect()
    })
  }
}

/// Decode every row of `table`, in source order. Any invalid row fails the
/// whole table.
pub(crate) fn decode_table(table: &Table) -> Result<Vec<NewMatch>> {
  let columns = Columns::locate(table)?;

  let mut matches = Vec::with_capacity(table.rows.len());
  let mut errors = Vec::new();
  for row in &table.rows {
    match columns.decode_row(row) {
      Ok(m) => matches.push(m),
      Err(row_errors) => errors.extend(row_errors),
    }
  }

  if errors.is_empty() {
    Ok(matches)
  } else {
    Err(Error::InvalidRows(errors))
  }
}
