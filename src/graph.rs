use enclose::enc;
use seed::{prelude::*, *};

use crate::chart::ChartRenderer;
use crate::entry::{EntryKey, EntryStore, SemesterEntry, SemesterField};
use crate::series::{build_series, Series};
use crate::DEFAULT_ENTRY_COUNT;

// ------ ------
//     Model
// ------ ------

pub struct Model {
    entries: EntryStore<SemesterEntry>,
    series: Series,
    chart: ChartRenderer,
}

impl Default for Model {
    fn default() -> Self {
        let mut model = Model {
            entries: EntryStore::new(DEFAULT_ENTRY_COUNT),
            series: Series::default(),
            chart: ChartRenderer::default(),
        };
        model.refresh();
        model
    }
}

impl Model {
    pub fn entries(&self) -> &EntryStore<SemesterEntry> {
        &self.entries
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn chart(&self) -> &ChartRenderer {
        &self.chart
    }

    /// Rebuilds the series from the entries and hands it to the chart.
    fn refresh(&mut self) {
        self.series = build_series(&self.entries);
        self.chart.render(&self.series.points);
    }
}

// ------ ------
//    Update
// ------ ------

pub enum Msg {
    AddEntry,
    RemoveEntry(EntryKey),

    SemesterNameChanged(EntryKey, String),
    GradeChanged(EntryKey, String),
}

pub fn update(msg: Msg, model: &mut Model) {
    match msg {
        Msg::AddEntry => {
            model.entries.add();
        }
        Msg::RemoveEntry(key) => {
            if !model.entries.remove(key) {
                log!("kept semester entry", key);
            }
        }

        Msg::SemesterNameChanged(key, name) => {
            model.entries.set_field(key, SemesterField::semester(&name));
        }
        Msg::GradeChanged(key, raw) => {
            if let Some(grade) = SemesterField::grade(&raw) {
                model.entries.set_field(key, grade);
            }
        }
    }
    model.refresh();
}

// ------ ------
//     View
// ------ ------

pub fn view(model: &Model) -> Node<Msg> {
    div![
        div![C!["graph"], model.chart.view()],
        div![
            C!["gpa-calculator"],
            model
                .entries
                .keys()
                .map(|key| view_entry(key, model.series.includes(key))),
            button![
                C!["add-button"],
                attrs! {At::Type => "button"},
                ev(Ev::Click, |_| Msg::AddEntry),
                "Add a semester"
            ],
        ]
    ]
}

fn view_entry(key: EntryKey, graphed: bool) -> Node<Msg> {
    div![
        el_key(&key),
        C!["entry", IF!(!graphed => "error")],
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
            input![
                attrs! {
                    At::Type => "text";
                    At::Placeholder => "Semester Name";
                },
                input_ev(
                    Ev::Blur,
                    enc!((key) move |name| Msg::SemesterNameChanged(key, name))
                ),
            ]
        ],
        div![
            C!["row"],
            input![
                attrs! {
                    At::Type => "text";
                    At::Placeholder => "Semester Grade";
                },
                input_ev(
                    Ev::Blur,
                    enc!((key) move |grade| Msg::GradeChanged(key, grade))
                ),
            ]
        ],
    ]
}
