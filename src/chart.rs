//! SVG line chart of semester grades.
//!
//! [`ChartRenderer`] owns its scales and the last series it was given; every
//! call to [`ChartRenderer::render`] replaces both, and the view is drawn from
//! scratch out of that state.

use itertools::Itertools;
use seed::{prelude::*, *};

use crate::series::SeriesPoint;

const Y_TICK_COUNT: usize = 10;
const TICK_SIZE: f64 = 6.0;
const MARK_RADIUS: f64 = 5.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub x_padding: f64,
    /// Lowest upper bound of the y axis.
    pub y_floor: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        ChartLayout {
            width: 750.0,
            height: 350.0,
            margin: 50.0,
            x_padding: 0.3,
            y_floor: 4.1,
        }
    }
}

// ------ PointScale ------

/// Spreads distinct labels evenly across the range. Repeated labels share
/// the position of their first occurrence.
#[derive(Clone, Debug, PartialEq)]
pub struct PointScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding: f64,
}

impl PointScale {
    pub fn new(range: (f64, f64), padding: f64) -> Self {
        PointScale {
            domain: Vec::new(),
            range,
            padding,
        }
    }

    pub fn set_domain<'a>(&mut self, labels: impl IntoIterator<Item = &'a str>) {
        self.domain = labels.into_iter().unique().map(str::to_string).collect();
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        (self.range.1 - self.range.0) / (n - 1.0 + self.padding * 2.0).max(1.0)
    }

    pub fn position(&self, label: &str) -> Option<f64> {
        let index = self.domain.iter().position(|l| l == label)?;
        let step = self.step();
        let span = step * (self.domain.len() as f64 - 1.0);
        let start = self.range.0 + (self.range.1 - self.range.0 - span) / 2.0;
        Some(start + step * index as f64)
    }
}

// ------ LinearScale ------

#[derive(Clone, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn set_domain(&mut self, domain: (f64, f64)) {
        self.domain = domain;
    }

    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Round tick values covering the domain, about `count` of them.
    pub fn ticks(&self, count: usize) -> (Vec<f64>, f64) {
        let (start, stop) = self.domain;
        let step = tick_step(start, stop, count);
        if !step.is_finite() || step <= 0.0 {
            return (vec![start], 0.0);
        }
        let first = (start / step).ceil() as i64;
        let last = (stop / step).floor() as i64;
        let ticks = (first..=last).map(|i| i as f64 * step).collect();
        (ticks, step)
    }
}

fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count.max(1) as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    power * factor
}

fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10().floor()) as usize
    } else {
        0
    };
    format!("{:.*}", decimals, value)
}

// ------ line path ------

fn sign(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

fn secant(a: (f64, f64), b: (f64, f64)) -> f64 {
    let h = b.0 - a.0;
    if h == 0.0 {
        0.0
    } else {
        (b.1 - a.1) / h
    }
}

/// Tangent at `p1` that keeps the curve monotone between its neighbours.
fn interior_tangent(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let h0 = p1.0 - p0.0;
    let h1 = p2.0 - p1.0;
    let s0 = secant(p0, p1);
    let s1 = secant(p1, p2);
    let p = if h0 + h1 == 0.0 {
        0.0
    } else {
        (s0 * h1 + s1 * h0) / (h0 + h1)
    };
    let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if t.is_nan() {
        0.0
    } else {
        t
    }
}

fn end_tangent(a: (f64, f64), b: (f64, f64), neighbour: f64) -> f64 {
    if b.0 - a.0 == 0.0 {
        neighbour
    } else {
        (3.0 * secant(a, b) - neighbour) / 2.0
    }
}

/// SVG path data for a monotone cubic through `points`, in order.
pub fn monotone_path(points: &[(f64, f64)]) -> String {
    let (first, rest) = match points.split_first() {
        Some(split) => split,
        None => return String::new(),
    };
    let mut d = format!("M{},{}", first.0, first.1);
    if points.len() == 2 {
        d.push_str(&format!("L{},{}", rest[0].0, rest[0].1));
        return d;
    }
    if points.len() < 3 {
        return d;
    }

    let n = points.len();
    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        tangents[i] = interior_tangent(points[i - 1], points[i], points[i + 1]);
    }
    tangents[0] = end_tangent(points[0], points[1], tangents[1]);
    tangents[n - 1] = end_tangent(points[n - 2], points[n - 1], tangents[n - 2]);

    for (i, (a, b)) in points.iter().tuple_windows().enumerate() {
        let dx = (b.0 - a.0) / 3.0;
        d.push_str(&format!(
            "C{},{},{},{},{},{}",
            a.0 + dx,
            a.1 + dx * tangents[i],
            b.0 - dx,
            b.1 - dx * tangents[i + 1],
            b.0,
            b.1
        ));
    }
    d
}

// ------ ChartRenderer ------

#[derive(Clone, Debug)]
pub struct ChartRenderer {
    layout: ChartLayout,
    x: PointScale,
    y: LinearScale,
    series: Vec<SeriesPoint>,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        ChartRenderer::new(ChartLayout::default())
    }
}

impl ChartRenderer {
    pub fn new(layout: ChartLayout) -> Self {
        let x = PointScale::new((0.0, layout.width), layout.x_padding);
        let y = LinearScale::new((0.0, layout.y_floor), (layout.height, 0.0));
        ChartRenderer {
            layout,
            x,
            y,
            series: Vec::new(),
        }
    }

    /// Replaces the drawn series and the axis domains.
    pub fn render(&mut self, series: &[SeriesPoint]) {
        self.x.set_domain(series.iter().map(|point| point.label.as_str()));
        let top = series
            .iter()
            .map(|point| point.value)
            .fold(self.layout.y_floor, f64::max);
        self.y.set_domain((0.0, top));
        self.series = series.to_vec();
    }

    pub fn x_domain(&self) -> &[String] {
        self.x.domain()
    }

    pub fn y_domain(&self) -> (f64, f64) {
        self.y.domain()
    }

    /// Screen coordinates of each point, relative to the plot area.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.series
            .iter()
            .filter_map(|point| {
                let x = self.x.position(&point.label)?;
                Some((x, self.y.scale(point.value)))
            })
            .collect()
    }

    pub fn view<Ms: 'static>(&self) -> Node<Ms> {
        let ChartLayout {
            width,
            height,
            margin,
            ..
        } = self.layout;
        let points = self.points();

        svg![
            C!["chart"],
            attrs! {
                At::Width => width + margin * 2.0;
                At::Height => height + margin * 2.0;
            },
            g![
                attrs! {At::Transform => format!("translate({},{})", margin, margin)},
                self.view_x_axis(),
                self.view_y_axis(),
                path![C!["line"], attrs! {At::D => monotone_path(&points)}],
                points.iter().map(|(cx, cy)| {
                    circle![
                        C!["mark"],
                        attrs! {
                            At::Cx => cx;
                            At::Cy => cy;
                            At::R => MARK_RADIUS;
                        }
                    ]
                }),
            ]
        ]
    }

    fn view_x_axis<Ms: 'static>(&self) -> Node<Ms> {
        let width = self.layout.width;
        g![
            C!["x-axis"],
            attrs! {At::Transform => format!("translate(0,{})", self.layout.height)},
            path![
                C!["domain"],
                attrs! {At::D => format!("M0,{}V0H{}V{}", TICK_SIZE, width, TICK_SIZE)}
            ],
            self.x.domain().iter().filter_map(|label| {
                let x = self.x.position(label)?;
                Some(g![
                    C!["tick"],
                    attrs! {At::Transform => format!("translate({},0)", x)},
                    path![attrs! {At::D => format!("M0,0V{}", TICK_SIZE)}],
                    text![
                        attrs! {
                            At::Y => TICK_SIZE + 3.0;
                            At::Dy => "0.71em";
                            At::TextAnchor => "middle";
                        },
                        label.as_str()
                    ],
                ])
            }),
        ]
    }

    fn view_y_axis<Ms: 'static>(&self) -> Node<Ms> {
        let height = self.layout.height;
        let (ticks, step) = self.y.ticks(Y_TICK_COUNT);
        g![
            C!["y-axis"],
            path![
                C!["domain"],
                attrs! {At::D => format!("M-{},{}H0V0H-{}", TICK_SIZE, height, TICK_SIZE)}
            ],
            ticks.into_iter().map(|value| {
                g![
                    C!["tick"],
                    attrs! {At::Transform => format!("translate(0,{})", self.y.scale(value))},
                    path![attrs! {At::D => format!("M0,0H-{}", TICK_SIZE)}],
                    text![
                        attrs! {
                            At::X => -(TICK_SIZE + 3.0);
                            At::Dy => "0.32em";
                            At::TextAnchor => "end";
                        },
                        format_tick(value, step)
                    ],
                ]
            }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(label: &str, value: f64) -> SeriesPoint {
        SeriesPoint {
            label: label.to_string(),
            value,
        }
    }

    #[test]
    fn test_y_domain_floor() {
        let mut chart = ChartRenderer::default();
        assert_eq!(chart.y_domain(), (0.0, 4.1));

        chart.render(&[point("Fall", 3.5), point("Spring", 3.8)]);
        assert_eq!(chart.y_domain(), (0.0, 4.1));

        chart.render(&[point("Fall", 4.5)]);
        assert_eq!(chart.y_domain(), (0.0, 4.5));

        chart.render(&[]);
        assert_eq!(chart.y_domain(), (0.0, 4.1));
        assert!(chart.x_domain().is_empty());
        assert!(chart.points().is_empty());
    }

    #[test]
    fn test_render_is_idempotent() {
        let series = vec![point("Fall", 3.5), point("Spring", 3.8), point("Summer", 2.0)];
        let mut once = ChartRenderer::default();
        once.render(&series);
        let mut twice = ChartRenderer::default();
        twice.render(&series);
        twice.render(&series);
        assert_eq!(once.points(), twice.points());
        assert_eq!(once.y_domain(), twice.y_domain());
    }

    #[test]
    fn test_x_domain_keeps_series_order() {
        let mut chart = ChartRenderer::default();
        chart.render(&[point("Spring", 3.0), point("Fall", 3.0), point("Spring", 2.0)]);
        assert_eq!(chart.x_domain(), &["Spring".to_string(), "Fall".to_string()][..]);
        let points = chart.points();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].0, points[2].0);
        assert!(points[0].0 < points[1].0);
    }

    #[test]
    fn test_point_scale_positions() {
        let mut scale = PointScale::new((0.0, 750.0), 0.3);
        scale.set_domain(vec!["Only"]);
        assert_eq!(scale.position("Only"), Some(375.0));

        scale.set_domain(vec!["a", "b"]);
        let step = 750.0 / 1.6;
        let start = (750.0 - step) / 2.0;
        assert_eq!(scale.position("a"), Some(start));
        assert_eq!(scale.position("b"), Some(start + step));
        assert_eq!(scale.position("c"), None);
    }

    #[test]
    fn test_linear_scale_inverts_range() {
        let scale = LinearScale::new((0.0, 4.0), (350.0, 0.0));
        assert_eq!(scale.scale(0.0), 350.0);
        assert_eq!(scale.scale(4.0), 0.0);
        assert_eq!(scale.scale(2.0), 175.0);
    }

    #[test]
    fn test_ticks() {
        let scale = LinearScale::new((0.0, 4.1), (350.0, 0.0));
        let (ticks, step) = scale.ticks(10);
        assert_eq!(step, 0.5);
        assert_eq!(ticks.len(), 9);
        assert_eq!(ticks.last(), Some(&4.0));
        assert_eq!(format_tick(ticks[1], step), "0.5");

        let (ticks, step) = LinearScale::new((0.0, 20.0), (1.0, 0.0)).ticks(10);
        assert_eq!(step, 2.0);
        assert_eq!(format_tick(ticks[3], step), "6");
    }

    #[test]
    fn test_monotone_path() {
        assert_eq!(monotone_path(&[]), "");
        assert_eq!(monotone_path(&[(1.0, 2.0)]), "M1,2");
        assert_eq!(monotone_path(&[(0.0, 0.0), (3.0, 6.0)]), "M0,0L3,6");

        let d = monotone_path(&[(0.0, 0.0), (3.0, 3.0), (6.0, 6.0)]);
        assert_eq!(d, "M0,0C1,1,2,2,3,3C4,4,5,5,6,6");
    }

    #[test]
    fn test_monotone_tangent_flattens_at_peak() {
        assert_eq!(interior_tangent((0.0, 0.0), (1.0, 5.0), (2.0, 0.0)), 0.0);
    }
}
