use serde::{Deserialize, Serialize};

use crate::entry::{EntryKey, EntryStore, SemesterEntry};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// Chart points in entry order, plus the keys of the entries they came from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub points: Vec<SeriesPoint>,
    pub keys: Vec<EntryKey>,
}

impl Series {
    pub fn includes(&self, key: EntryKey) -> bool {
        self.keys.contains(&key)
    }
}

pub fn build_series(entries: &EntryStore<SemesterEntry>) -> Series {
    let mut series = Series::default();
    for key in entries.valid_keys(&()) {
        if let Some(SemesterEntry {
            semester: Some(label),
            grade: Some(value),
        }) = entries.get(key)
        {
            series.points.push(SeriesPoint {
                label: label.clone(),
                value: *value,
            });
            series.keys.push(key);
        }
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::SemesterField;
    use serde_json::json;

    #[test]
    fn test_series_follows_entry_order() {
        let mut entries: EntryStore<SemesterEntry> = EntryStore::new(1);
        let fall = entries.add();
        let spring = entries.add();
        entries.set_field(fall, SemesterField::semester("Fall"));
        entries.set_field(spring, SemesterField::semester("Spring"));
        entries.set_field(spring, SemesterField::Grade(Some(3.8)));
        entries.set_field(fall, SemesterField::Grade(Some(3.5)));

        let series = build_series(&entries);
        assert_eq!(
            serde_json::to_value(&series.points).unwrap(),
            json!([
                { "label": "Fall", "value": 3.5 },
                { "label": "Spring", "value": 3.8 },
            ])
        );
        assert_eq!(series.keys, vec![fall, spring]);
        assert!(!series.includes(0));
    }

    #[test]
    fn test_incomplete_entries_are_left_out() {
        let mut entries: EntryStore<SemesterEntry> = EntryStore::new(3);
        entries.set_field(0, SemesterField::semester("Fall"));
        entries.set_field(1, SemesterField::Grade(Some(3.0)));
        entries.set_field(2, SemesterField::semester("Winter"));
        entries.set_field(2, SemesterField::Grade(Some(2.9)));

        let series = build_series(&entries);
        assert_eq!(
            series.points,
            vec![SeriesPoint {
                label: "Winter".to_string(),
                value: 2.9
            }]
        );
        assert!(series.includes(2));
        assert!(!series.includes(0));
    }

    #[test]
    fn test_removed_entry_leaves_series() {
        let mut entries: EntryStore<SemesterEntry> = EntryStore::new(2);
        for (key, name) in [(0, "Fall"), (1, "Spring")].iter() {
            entries.set_field(*key, SemesterField::semester(name));
            entries.set_field(*key, SemesterField::Grade(Some(3.0)));
        }
        entries.remove(0);
        let series = build_series(&entries);
        assert_eq!(series.keys, vec![1]);
        assert_eq!(series.points[0].label, "Spring");
    }
}
