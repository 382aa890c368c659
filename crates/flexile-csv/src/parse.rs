//! CSV record reader.
//!
//! Pipeline:
//!   raw &str
//!     └─ records()   → Vec<Record>   (quote-aware split into fields)
//!          └─ table() → Table         (header + width-checked rows)

use crate::{
  Row, Table,
  error::{Error, Result},
};

/// A physical record before the header/data distinction is made.
pub(crate) struct Record {
  /// Line on which the record starts.
  pub line:   usize,
  pub fields: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
  /// At the first character of a field.
  FieldStart,
  Unquoted,
  Quoted,
  /// Just read the closing quote of a quoted field.
  QuoteClosed,
}

struct Builder {
  records:     Vec<Record>,
  fields:      Vec<String>,
  field:       String,
  record_line: usize,
  /// The current record has a quoted field.
  quoted:      bool,
}

impl Builder {
  fn end_field(&mut self) { self.fields.push(std::mem::take(&mut self.field)); }

  /// Close the current record; blank or whitespace-only lines produce
  /// nothing.
  fn end_record(&mut self, next_line: usize) {
    self.end_field();
    let fields = std::mem::take(&mut self.fields);
    let blank = !self.quoted && fields.len() == 1 && fields[0].trim().is_empty();
    if !blank {
      self.records.push(Record { line: self.record_line, fields });
    }
    self.record_line = next_line;
    self.quoted = false;
  }
}

/// Split `input` into records (RFC 4180 quoting, CRLF or LF line endings, an
/// optional leading UTF-8 BOM). A `"` inside an unquoted field is kept
/// literally.
pub(crate) fn records(input: &str) -> Result<Vec<Record>> {
  let input = input.strip_prefix('\u{feff}').unwrap_or(input);

  let mut b = Builder {
    records:     Vec::new(),
    fields:      Vec::new(),
    field:       String::new(),
    record_line: 1,
    quoted:      false,
  };
  let mut line = 1usize;
  let mut state = State::FieldStart;
  let mut chars = input.chars().peekable();

  while let Some(c) = chars.next() {
    // CRLF outside quotes: let the LF end the record.
    if c == '\r' && state != State::Quoted && chars.peek() == Some(&'\n') {
      continue;
    }

    match (state, c) {
      (State::Quoted, '"') => {
        if chars.next_if_eq(&'"').is_some() {
          b.field.push('"');
        } else {
          state = State::QuoteClosed;
        }
      }
      (State::Quoted, _) => {
        if c == '\n' {
          line += 1;
        }
        b.field.push(c);
      }
      (State::FieldStart, '"') => {
        b.quoted = true;
        state = State::Quoted;
      }
      (_, ',') => {
        b.end_field();
        state = State::FieldStart;
      }
      (_, '\n' | '\r') => {
        line += 1;
        b.end_record(line);
        state = State::FieldStart;
      }
      (State::QuoteClosed, _) => return Err(Error::StrayQuote { line }),
      (_, _) => {
        b.field.push(c);
        state = State::Unquoted;
      }
    }
  }

  match state {
    State::Quoted => {
      return Err(Error::UnterminatedQuote { line: b.record_line });
    }
    State::FieldStart if b.fields.is_empty() => {}
    _ => b.end_record(line),
  }

  Ok(b.records)
}

/// Treat the first record as the header and check every data row has the
/// same width. Empty input yields a table with no columns.
pub(crate) fn table(input: &str) -> Result<Table> {
  let mut records = records(input)?.into_iter();

  let Some(header) = records.next() else {
    return Ok(Table { headers: Vec::new(), rows: Vec::new() });
  };
  let expected = header.fields.len();

  let rows = records
    .enumerate()
    .map(|(i, record)| {
      if record.fields.len() != expected {
        return Err(Error::FieldCount {
          line: record.line,
          expected,
          found: record.fields.len(),
        });
      }
      Ok(Row {
        number: i + 1,
        line:   record.line,
        fields: record.fields,
      })
    })
    .collect::<Result<Vec<_>>>()?;

  Ok(Table { headers: header.fields, rows })
}
