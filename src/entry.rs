//! Keyed collections of form rows.

use indexmap::IndexMap;

use crate::scale::{GradeScale, PLACEHOLDER};

pub type EntryKey = u32;

/// A row shape that can be edited one field at a time and knows when it is
/// complete enough to take part in aggregation.
pub trait Record: Default {
    type Field;
    type Context: ?Sized;

    fn set(&mut self, field: Self::Field);

    fn is_complete(&self, context: &Self::Context) -> bool;
}

/// Rows in insertion order, keyed by a counter that never hands out a key
/// twice. Never holds fewer than one row.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryStore<E> {
    entries: IndexMap<EntryKey, E>,
    next_key: EntryKey,
}

impl<E: Record> EntryStore<E> {
    pub fn new(initial_count: usize) -> Self {
        let mut store = EntryStore {
            entries: IndexMap::with_capacity(initial_count),
            next_key: 0,
        };
        for _ in 0..initial_count.max(1) {
            store.add();
        }
        store
    }

    pub fn add(&mut self) -> EntryKey {
        let key = self.next_key;
        self.next_key += 1;
        self.entries.insert(key, E::default());
        key
    }

    /// Returns `false` when nothing was removed, either because `key` is
    /// unknown or because it is the last row.
    pub fn remove(&mut self, key: EntryKey) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }
        self.entries.shift_remove(&key).is_some()
    }

    /// Sets one field, creating an empty row for `key` first if needed.
    pub fn set_field(&mut self, key: EntryKey, field: E::Field) {
        if key >= self.next_key {
            self.next_key = key.saturating_add(1);
        }
        self.entries.entry(key).or_default().set(field);
    }

    pub fn get(&self, key: EntryKey) -> Option<&E> {
        self.entries.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryKey, &E)> {
        self.entries.iter().map(|(key, entry)| (*key, entry))
    }

    pub fn keys(&self) -> impl Iterator<Item = EntryKey> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn valid_keys(&self, context: &E::Context) -> Vec<EntryKey> {
        self.iter()
            .filter(|(_, entry)| entry.is_complete(context))
            .map(|(key, _)| key)
            .collect()
    }

    pub fn excluded_count(&self, context: &E::Context) -> usize {
        self.len() - self.valid_keys(context).len()
    }
}

// ------ GradeEntry ------

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GradeEntry {
    pub credit: Option<u8>,
    pub grade: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GradeField {
    Credit(u8),
    Grade(String),
}

impl GradeField {
    /// A credit keystroke only counts when it is a single digit.
    pub fn credit(raw: &str) -> Option<GradeField> {
        match raw.as_bytes() {
            [digit] if digit.is_ascii_digit() => Some(GradeField::Credit(digit - b'0')),
            _ => None,
        }
    }

    pub fn grade(raw: &str) -> GradeField {
        GradeField::Grade(raw.to_string())
    }
}

impl Record for GradeEntry {
    type Field = GradeField;
    type Context = GradeScale;

    fn set(&mut self, field: GradeField) {
        match field {
            GradeField::Credit(credit) => self.credit = Some(credit),
            GradeField::Grade(grade) => self.grade = Some(grade),
        }
    }

    fn is_complete(&self, scale: &GradeScale) -> bool {
        self.credit.is_some()
            && match &self.grade {
                Some(grade) => grade != PLACEHOLDER && scale.value(grade).is_some(),
                None => false,
            }
    }
}

// ------ SemesterEntry ------

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SemesterEntry {
    pub semester: Option<String>,
    pub grade: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SemesterField {
    Semester(Option<String>),
    Grade(Option<f64>),
}

impl SemesterField {
    pub fn semester(raw: &str) -> SemesterField {
        let name = raw.trim();
        SemesterField::Semester(if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        })
    }

    /// Blank input clears the grade; anything but a finite number is ignored.
    /// A grade of `0` is kept and charted like any other value.
    pub fn grade(raw: &str) -> Option<SemesterField> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Some(SemesterField::Grade(None));
        }
        match raw.parse::<f64>() {
            Ok(grade) if grade.is_finite() => Some(SemesterField::Grade(Some(grade))),
            _ => None,
        }
    }
}

impl Record for SemesterEntry {
    type Field = SemesterField;
    type Context = ();

    fn set(&mut self, field: SemesterField) {
        match field {
            SemesterField::Semester(semester) => self.semester = semester,
            SemesterField::Grade(grade) => self.grade = grade,
        }
    }

    fn is_complete(&self, _: &()) -> bool {
        self.semester.as_deref().map_or(false, |name| !name.is_empty()) && self.grade.is_some()
    }
}
