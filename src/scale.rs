//! Letter grade scales and the `LETTER[+|-]=>NUMBER, ...` pattern language.

use indexmap::{indexmap, IndexMap};
use itertools::Itertools;
use thiserror::Error;

/// Label shown in the grade selector before a grade is chosen. Never a grade.
pub const PLACEHOLDER: &str = "Select Grade";

/// Pattern text reported while the entered pattern does not parse.
pub const UNDEFINED_PATTERN: &str = "undefined";

pub const DEFAULT_PATTERN: &str = "A+=>4, A=>4, A-=>3.67, B+=>3.33, B=>3, B-=>2.67, \
                                   C+=>2.33, C=>2, C-=>1.67, D+=>1.33, D=>1, D-=>0.67";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScaleError {
    #[error("pattern contains no grade clause")]
    NoClauses,
    #[error("unexpected input at offset {offset}: {rest:?}")]
    Unmatched { offset: usize, rest: String },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GradeScale {
    values: IndexMap<String, f64>,
}

impl GradeScale {
    pub fn defaults() -> GradeScale {
        GradeScale {
            values: indexmap! {
                "A+".into() => 4.0,
                "A".into() => 4.0,
                "A-".into() => 3.67,
                "B+".into() => 3.33,
                "B".into() => 3.0,
                "B-".into() => 2.67,
                "C+".into() => 2.33,
                "C".into() => 2.0,
                "C-".into() => 1.67,
                "D+".into() => 1.33,
                "D".into() => 1.0,
                "D-".into() => 0.67,
            },
        }
    }

    pub fn value(&self, label: &str) -> Option<f64> {
        if label == PLACEHOLDER {
            return None;
        }
        self.values.get(label).copied()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A successfully parsed pattern: the scale and its canonical text.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedScale {
    pub scale: GradeScale,
    pub pattern: String,
}

struct Clause<'a> {
    label: &'a str,
    number: &'a str,
    value: f64,
}

/// Parses the whole of `text` as a sequence of grade clauses.
///
/// Clauses may be separated by any run of commas followed by any run of
/// whitespace. Nothing else may appear anywhere in the input, and a
/// malformed clause anywhere rejects the entire pattern.
pub fn parse(text: &str) -> Result<ParsedScale, ScaleError> {
    let mut clauses = Vec::new();
    let mut offset = 0;

    while offset < text.len() {
        let rest = &text[offset..];
        match clause(rest) {
            Some((clause, consumed)) => {
                clauses.push(clause);
                offset += consumed;
            }
            None => {
                return Err(ScaleError::Unmatched {
                    offset,
                    rest: rest.to_string(),
                })
            }
        }
    }

    if clauses.is_empty() {
        return Err(ScaleError::NoClauses);
    }

    let mut values = IndexMap::with_capacity(clauses.len());
    for clause in &clauses {
        values.insert(clause.label.to_string(), clause.value);
    }
    let pattern = clauses
        .iter()
        .map(|clause| format!("{}=>{}", clause.label, clause.number))
        .join(", ");

    Ok(ParsedScale {
        scale: GradeScale { values },
        pattern,
    })
}

/// Matches one clause plus its trailing separator at the start of `input`,
/// returning the clause and the number of bytes consumed.
fn clause(input: &str) -> Option<(Clause<'_>, usize)> {
    let bytes = input.as_bytes();

    let mut end = match bytes.first() {
        Some(b) if b.is_ascii_uppercase() => 1,
        _ => return None,
    };
    if matches!(bytes.get(end), Some(&b'+') | Some(&b'-')) {
        end += 1;
    }
    let label = &input[..end];

    if !input[end..].starts_with("=>") {
        return None;
    }
    let number_start = end + 2;

    let mut cursor = number_start;
    while bytes.get(cursor).map_or(false, u8::is_ascii_digit) {
        cursor += 1;
    }
    let fraction_digits = bytes[cursor..]
        .iter()
        .skip(1)
        .take_while(|b| b.is_ascii_digit())
        .count();
    if bytes.get(cursor) == Some(&b'.') && fraction_digits > 0 {
        cursor += 1 + fraction_digits;
    }
    if cursor == number_start {
        return None;
    }
    let number = &input[number_start..cursor];
    let value = number.parse::<f64>().ok()?;

    let separator = input[cursor..].trim_start_matches(',').trim_start();
    let consumed = input.len() - separator.len();

    Some((
        Clause {
            label,
            number,
            value,
        },
        consumed,
    ))
}

/// The active scale of the GPA form together with what the user sees of it.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleState {
    pub scale: GradeScale,
    pub pattern: String,
    pub invalid: bool,
}

impl Default for ScaleState {
    fn default() -> Self {
        ScaleState {
            scale: GradeScale::defaults(),
            pattern: DEFAULT_PATTERN.to_string(),
            invalid: false,
        }
    }
}

impl ScaleState {
    /// Replaces the active scale with `text` if it parses in full. Otherwise
    /// the scale is emptied, not kept, and the pattern becomes `undefined`.
    pub fn apply_pattern(&mut self, text: &str) -> Result<(), ScaleError> {
        match parse(text) {
            Ok(parsed) => {
                self.scale = parsed.scale;
                self.pattern = parsed.pattern;
                self.invalid = false;
                Ok(())
            }
            Err(err) => {
                self.scale = GradeScale::default();
                self.pattern = UNDEFINED_PATTERN.to_string();
                self.invalid = true;
                Err(err)
            }
        }
    }

    pub fn reset(&mut self) {
        *self = ScaleState::default();
    }
}
