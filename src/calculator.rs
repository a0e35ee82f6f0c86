use apply::Apply;
use enclose::enc;
use seed::{prelude::*, *};
use web_sys::HtmlInputElement;

use crate::entry::{EntryKey, EntryStore, GradeEntry, GradeField};
use crate::gpa::GpaSummary;
use crate::scale::{ScaleState, DEFAULT_PATTERN, PLACEHOLDER};
use crate::util;
use crate::DEFAULT_ENTRY_COUNT;

// ------ ------
//     Model
// ------ ------

pub struct Model {
    entries: EntryStore<GradeEntry>,
    scale: ScaleState,
    refs: Refs,
}

#[derive(Default)]
struct Refs {
    scale_pattern_input: ElRef<HtmlInputElement>,
}

impl Default for Model {
    fn default() -> Self {
        Model {
            entries: EntryStore::new(DEFAULT_ENTRY_COUNT),
            scale: ScaleState::default(),
            refs: Refs::default(),
        }
    }
}

impl Model {
    pub fn entries(&self) -> &EntryStore<GradeEntry> {
        &self.entries
    }

    pub fn scale(&self) -> &ScaleState {
        &self.scale
    }
}

// ------ ------
//    Update
// ------ ------

pub enum Msg {
    ScalePatternChanged(String),
    ResetScale,

    AddEntry,
    RemoveEntry(EntryKey),

    GradeSelected(EntryKey, String),
    CreditKeyUp(EntryKey, String),
}

pub fn update(msg: Msg, model: &mut Model) {
    match msg {
        Msg::ScalePatternChanged(pattern) => {
            if let Err(err) = model.scale.apply_pattern(&pattern) {
                log!("grade scale pattern rejected:", err.to_string());
            }
        }
        Msg::ResetScale => {
            if let Some(input) = model.refs.scale_pattern_input.get() {
                input.set_value("");
            }
            model.scale.reset();
        }

        Msg::AddEntry => {
            model.entries.add();
        }
        Msg::RemoveEntry(key) => {
            if !model.entries.remove(key) {
                log!("kept grade entry", key);
            }
        }

        Msg::GradeSelected(key, grade) => {
            model.entries.set_field(key, GradeField::grade(&grade));
        }
        Msg::CreditKeyUp(key, raw) => {
            if let Some(credit) = GradeField::credit(&raw) {
                model.entries.set_field(key, credit);
            }
        }
    }
}

// ------ ------
//     View
// ------ ------

pub fn view(model: &Model) -> Node<Msg> {
    let summary = GpaSummary::new(&model.entries, &model.scale.scale);
    let valid_keys = model.entries.valid_keys(&model.scale.scale);

    div![
        view_message(&model.scale, &model.refs, &summary),
        div![
            C!["gpa-calculator"],
            model.entries.iter().map(|(key, entry)| {
                view_entry(key, entry, &model.scale, valid_keys.contains(&key))
            }),
            button![
                C!["add-button"],
                attrs! {At::Type => "button"},
                ev(Ev::Click, |_| Msg::AddEntry),
                "Add a semester"
            ],
        ]
    ]
}

fn view_message(scale: &ScaleState, refs: &Refs, summary: &GpaSummary) -> Node<Msg> {
    div![
        C!["message"],
        div![
            input![
                el_ref(&refs.scale_pattern_input),
                C!["grade-scale-input", IF!(scale.invalid => "error")],
                attrs! {
                    At::Type => "text";
                    At::Placeholder => "input your grade scale pattern";
                },
                input_ev(Ev::Input, Msg::ScalePatternChanged),
            ],
            button![ev(Ev::Click, |_| Msg::ResetScale), "default grade scale"],
            p![format!(
                "Note that the scale pattern is a comma separated list of letter-grade=>value \
                 i.e(A+=>3, ..., Z-=>6.4). The Default is {}",
                DEFAULT_PATTERN
            )],
            p![format!("The current grade scale is {}", scale.pattern)],
        ],
        h3![
            style! {St::TextAlign => "center"},
            "The calculated GPA is ",
            em![
                style! {St::Color => "green"},
                summary.gpa.apply(util::format_gpa)
            ],
            ", without considering ",
            em![style! {St::Color => "green"}, summary.excluded.to_string()],
            " uninteracted with/erroneous entries."
        ],
        h3![b!["Select the grade and input the number of credits for each class"]],
    ]
}

fn view_entry(key: EntryKey, entry: &GradeEntry, scale: &ScaleState, valid: bool) -> Node<Msg> {
    let selected = entry.grade.as_deref().unwrap_or(PLACEHOLDER);

    div![
        el_key(&key),
        C!["entry", IF!(!valid => "error")],
        div![
            C!["row"],
            button![
                C!["delete-button"],
                attrs! {At::Type => "button"},
                ev(Ev::Click, move |_| Msg::RemoveEntry(key)),
                "x"
            ]
        ],
        div![
            C!["row"],
            select![
                C!["grade-selection"],
                std::iter::once(PLACEHOLDER)
                    .chain(scale.scale.labels())
                    .map(|label| {
                        option![
                            attrs! {
                                At::Value => label;
                                At::Selected => (label == selected).as_at_value();
                            },
                            label
                        ]
                    }),
                input_ev(
                    Ev::Change,
                    enc!((key) move |grade| Msg::GradeSelected(key, grade))
                ),
            ]
        ],
        div![
            C!["row"],
            input![
                C!["single-char"],
                attrs! {
                    At::Type => "text";
                    At::Name => "credit";
                    At::MaxLength => 1;
                },
                keyboard_ev(
                    Ev::KeyUp,
                    enc!((key) move |keyboard_event| Msg::CreditKeyUp(key, keyboard_event.key()))
                ),
            ]
        ],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::UNDEFINED_PATTERN;

    fn fill(model: &mut Model, key: EntryKey, credit: &str, grade: &str) {
        update(Msg::CreditKeyUp(key, credit.to_string()), model);
        update(Msg::GradeSelected(key, grade.to_string()), model);
    }

    #[test]
    fn test_update_fills_entries() {
        let mut model = Model::default();
        fill(&mut model, 0, "3", "A");
        fill(&mut model, 1, "4", "B");

        assert_eq!(
            model.entries().get(0),
            Some(&GradeEntry {
                credit: Some(3),
                grade: Some("A".to_string()),
            })
        );
        let summary = GpaSummary::new(model.entries(), &model.scale().scale);
        assert_eq!(util::format_gpa(summary.gpa), "3.429");
        assert_eq!(summary.excluded, DEFAULT_ENTRY_COUNT - 2);
    }

    #[test]
    fn test_update_ignores_non_digit_credit() {
        let mut model = Model::default();
        update(Msg::CreditKeyUp(0, "7".to_string()), &mut model);
        let before = model.entries().clone();

        update(Msg::CreditKeyUp(0, "a".to_string()), &mut model);
        update(Msg::CreditKeyUp(0, "Backspace".to_string()), &mut model);
        assert_eq!(model.entries(), &before);
        assert_eq!(model.entries().get(0).and_then(|entry| entry.credit), Some(7));
    }

    #[test]
    fn test_update_pattern_then_reset() {
        let mut model = Model::default();
        fill(&mut model, 0, "2", "E");

        update(Msg::ScalePatternChanged("E=>1.5, F=>0".to_string()), &mut model);
        assert_eq!(model.scale().pattern, "E=>1.5, F=>0");
        assert_eq!(GpaSummary::new(model.entries(), &model.scale().scale).gpa, 1.5);

        update(Msg::ResetScale, &mut model);
        assert_eq!(model.scale(), &ScaleState::default());
        assert_ne!(model.scale().pattern, UNDEFINED_PATTERN);
        assert!(GpaSummary::new(model.entries(), &model.scale().scale).gpa.is_nan());
    }

    #[test]
    fn test_update_adds_and_removes_entries() {
        let mut model = Model::default();
        update(Msg::AddEntry, &mut model);
        assert_eq!(model.entries().len(), DEFAULT_ENTRY_COUNT + 1);

        update(Msg::RemoveEntry(0), &mut model);
        assert_eq!(model.entries().len(), DEFAULT_ENTRY_COUNT);
        assert!(model.entries().get(0).is_none());
    }
}
