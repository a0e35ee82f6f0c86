use crate::entry::{EntryStore, GradeEntry};
use crate::scale::GradeScale;

/// Credit-weighted average of the complete entries.
///
/// With no complete entries the credit sum is zero and the result is NaN.
pub fn compute_gpa(entries: &EntryStore<GradeEntry>, scale: &GradeScale) -> f64 {
    let (weighted, credits) = entries
        .valid_keys(scale)
        .into_iter()
        .filter_map(|key| entries.get(key))
        .filter_map(|entry| {
            let credit = f64::from(entry.credit?);
            let value = scale.value(entry.grade.as_deref()?)?;
            Some((credit, value))
        })
        .fold((0.0, 0.0), |(weighted, credits), (credit, value)| {
            (weighted + credit * value, credits + credit)
        });
    weighted / credits
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GpaSummary {
    pub gpa: f64,
    /// Entries left out of the calculation.
    pub excluded: usize,
}

impl GpaSummary {
    pub fn new(entries: &EntryStore<GradeEntry>, scale: &GradeScale) -> Self {
        GpaSummary {
            gpa: compute_gpa(entries, scale),
            excluded: entries.excluded_count(scale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::GradeField;
    use crate::scale::parse;

    fn store(rows: &[(u8, &str)]) -> EntryStore<GradeEntry> {
        let mut store: EntryStore<GradeEntry> = EntryStore::new(rows.len());
        for (key, (credit, grade)) in rows.iter().enumerate() {
            store.set_field(key as u32, GradeField::Credit(*credit));
            store.set_field(key as u32, GradeField::grade(grade));
        }
        store
    }

    #[test]
    fn test_weighted_average() {
        let scale = parse("A=>4, B=>3").unwrap().scale;
        let gpa = compute_gpa(&store(&[(3, "A"), (4, "B")]), &scale);
        assert!((gpa - 24.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_incomplete_entries_are_ignored() {
        let scale = GradeScale::defaults();
        let mut entries = store(&[(2, "A"), (3, "Z")]);
        entries.add();
        let summary = GpaSummary::new(&entries, &scale);
        assert_eq!(summary.gpa, 4.0);
        assert_eq!(summary.excluded, 2);
    }

    #[test]
    fn test_no_valid_entries_is_nan() {
        let entries: EntryStore<GradeEntry> = EntryStore::new(4);
        let summary = GpaSummary::new(&entries, &GradeScale::defaults());
        assert!(summary.gpa.is_nan());
        assert_eq!(summary.excluded, 4);
    }

    #[test]
    fn test_zero_credits_is_nan() {
        let gpa = compute_gpa(&store(&[(0, "A")]), &GradeScale::defaults());
        assert!(gpa.is_nan());
    }

    #[test]
    fn test_empty_scale_excludes_everything() {
        let entries = store(&[(3, "A"), (4, "B")]);
        let summary = GpaSummary::new(&entries, &GradeScale::default());
        assert!(summary.gpa.is_nan());
        assert_eq!(summary.excluded, 2);
    }
}
