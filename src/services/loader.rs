use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::core::check_population;
use crate::error::LoadError;
use crate::models::Person;

/// Column layout and scale of a questionnaire export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyLayout {
    /// Leading columns to ignore (e.g. the submission timestamp)
    pub skip_columns: usize,
    pub likert_len: usize,
    pub likert_min: u8,
    pub likert_max: u8,
    pub has_header: bool,
    pub min_persons: usize,
}

impl Default for SurveyLayout {
    fn default() -> Self {
        Self {
            skip_columns: 1,
            likert_len: 5,
            likert_min: 1,
            likert_max: 5,
            has_header: true,
            min_persons: crate::core::MIN_PERSONS,
        }
    }
}

/// Reads survey answers into person records
///
/// CSV rows are laid out as: `skip_columns` ignored cells, the name,
/// `likert_len` ratings, the category. Rows with an empty cell are dropped.
/// JSON input is an array of `{name, likert, category}` objects.
#[derive(Debug, Clone, Default)]
pub struct SurveyLoader {
    layout: SurveyLayout,
}

impl SurveyLoader {
    pub fn new(layout: SurveyLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &SurveyLayout {
        &self.layout
    }

    /// Load from a file, picking the format from its extension (`.json` or CSV otherwise)
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Person>, LoadError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        tracing::info!("Loading survey from {}", path.display());

        if is_json {
            self.read_json(reader)
        } else {
            self.read_csv(reader)
        }
    }

    pub fn read_csv<R: Read>(&self, reader: R) -> Result<Vec<Person>, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(self.layout.has_header)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut persons = Vec::new();
        let mut dropped = 0usize;

        for (idx, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = idx + 1;
            match self.parse_row(row, &record)? {
                Some(person) => persons.push(person),
                None => {
                    dropped += 1;
                    tracing::debug!("Dropping row {} with empty cells", row);
                }
            }
        }

        if dropped > 0 {
            tracing::info!("Dropped {} incomplete rows", dropped);
        }

        self.finish(persons)
    }

    pub fn read_json<R: Read>(&self, reader: R) -> Result<Vec<Person>, LoadError> {
        let persons: Vec<Person> = serde_json::from_reader(reader)?;

        for (idx, person) in persons.iter().enumerate() {
            let row = idx + 1;
            if person.likert.len() != self.layout.likert_len {
                return Err(LoadError::WrongRatingCount {
                    row,
                    expected: self.layout.likert_len,
                    found: person.likert.len(),
                });
            }
            for (q, &value) in person.likert.iter().enumerate() {
                self.check_scale(row, q + 1, value as i64)?;
            }
        }

        self.finish(persons)
    }

    fn finish(&self, persons: Vec<Person>) -> Result<Vec<Person>, LoadError> {
        check_population(persons.len(), self.layout.min_persons)?;
        tracing::info!("Loaded {} persons", persons.len());
        Ok(persons)
    }

    /// Parse one data row, or `None` if any of its cells is empty
    fn parse_row(&self, row: usize, record: &csv::StringRecord) -> Result<Option<Person>, LoadError> {
        let layout = &self.layout;
        let expected = layout.skip_columns + layout.likert_len + 2;

        // A row of nothing but blanks is a spreadsheet artefact
        if record.iter().all(str::is_empty) {
            return Ok(None);
        }
        if record.len() < expected {
            return Err(LoadError::MissingColumns {
                row,
                expected,
                found: record.len(),
            });
        }

        let cells: Vec<&str> = record.iter().skip(layout.skip_columns).collect();
        if cells.iter().any(|c| c.is_empty()) {
            return Ok(None);
        }

        let name = cells[0];
        let mut likert = Vec::with_capacity(layout.likert_len);
        for (q, cell) in cells[1..=layout.likert_len].iter().enumerate() {
            let column = layout.skip_columns + 2 + q;
            let value = parse_rating(cell).ok_or_else(|| LoadError::InvalidRating {
                row,
                column,
                value: cell.to_string(),
            })?;
            likert.push(self.check_scale(row, column, value)?);
        }
        let category = cells[layout.likert_len + 1];

        Ok(Some(Person::new(name, likert, category)))
    }

    fn check_scale(&self, row: usize, column: usize, value: i64) -> Result<u8, LoadError> {
        let (min, max) = (self.layout.likert_min, self.layout.likert_max);
        if value < min as i64 || value > max as i64 {
            return Err(LoadError::RatingOutOfScale { row, column, value, min, max });
        }
        Ok(value as u8)
    }
}

/// Integer rating, accepting integral floats such as "4.0" from spreadsheet exports
fn parse_rating(cell: &str) -> Option<i64> {
    if let Ok(v) = cell.parse::<i64>() {
        return Some(v);
    }
    let f = cell.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 {
        Some(f as i64)
    } else {
        None
    }
}
