//! Procedural glyph generators, addressable by name from glyph tables.

use super::GeneratorFn;
use kurbo::{BezPath, Circle, Point, Shape as KurboShape, Vec2};
use std::f64::consts::PI;

/// Authoring space shared with the table glyphs (a 400×400 view box).
const CENTER: Point = Point::new(200.0, 300.0);
const RADIUS: f64 = 100.0;

/// Every generator a glyph table may reference.
pub const GENERATORS: &[(&str, GeneratorFn)] = &[
    ("circle", circle),
    ("square", square),
    ("triangle", triangle),
    ("star", star),
];

/// Look up a generator by name.
pub fn generator(name: &str) -> Option<GeneratorFn> {
    GENERATORS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, generate)| *generate)
}

fn circle() -> BezPath {
    Circle::new(CENTER, RADIUS).to_path(0.1)
}

fn square() -> BezPath {
    regular_polygon(4, PI / 4.0)
}

fn triangle() -> BezPath {
    regular_polygon(3, -PI / 2.0)
}

/// Five-pointed star drawn as one continuous pentagram.
fn star() -> BezPath {
    let vertex = |i: usize| {
        let angle = -PI / 2.0 + (i * 2 % 5) as f64 * 2.0 * PI / 5.0;
        CENTER + Vec2::new(RADIUS * angle.cos(), RADIUS * angle.sin())
    };

    let mut path = BezPath::new();
    path.move_to(vertex(0));
    for i in 1..5 {
        path.line_to(vertex(i));
    }
    path.close_path();
    path
}

fn regular_polygon(sides: usize, start_angle: f64) -> BezPath {
    let mut path = BezPath::new();
    for i in 0..sides {
        let angle = start_angle + i as f64 * 2.0 * PI / sides as f64;
        let point = CENTER + Vec2::new(RADIUS * angle.cos(), RADIUS * angle.sin());
        if i == 0 {
            path.move_to(point);
        } else {
            path.line_to(point);
        }
    }
    path.close_path();
    path
}
