use seed::{prelude::*, *};

pub mod calculator;
pub mod chart;
pub mod entry;
pub mod gpa;
pub mod graph;
pub mod scale;
pub mod series;
pub mod util;

/// Rows each form starts with.
pub const DEFAULT_ENTRY_COUNT: usize = 4;

// ------ ------
//     Model
// ------ ------

#[derive(Default)]
struct Model {
    calculator: calculator::Model,
    graph: graph::Model,
}

// ------ ------
//     Init
// ------ ------

fn init(_: Url, _: &mut impl Orders<Msg>) -> Model {
    Model::default()
}

// ------ ------
//    Update
// ------ ------

enum Msg {
    Calculator(calculator::Msg),
    Graph(graph::Msg),
}

fn update(msg: Msg, model: &mut Model, _: &mut impl Orders<Msg>) {
    match msg {
        Msg::Calculator(msg) => calculator::update(msg, &mut model.calculator),
        Msg::Graph(msg) => graph::update(msg, &mut model.graph),
    }
}

// ------ ------
//     View
// ------ ------

fn view(model: &Model) -> Node<Msg> {
    div![
        C!["content"],
        h3!["GPA Facilities"],
        hr![],
        calculator::view(&model.calculator).map_msg(Msg::Calculator),
        hr![],
        hr![],
        hr![],
        h1!["Graphing of the GPA over different semesters"],
        graph::view(&model.graph).map_msg(Msg::Graph),
    ]
}

// ------ ------
//     Start
// ------ ------

/// Mounts the app on `#app`. Called from `index.html` once the module loaded.
#[wasm_bindgen]
pub fn start() {
    App::start("app", init, update, view);
}
