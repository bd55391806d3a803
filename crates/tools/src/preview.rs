//! Downsampled ASCII rendering of a generated dungeon.
//!
//! Glyphs: `.` floor, `#` wall, `T` scatter, and `' '`, `-`, `^` for low, mid and high exterior.

use std::collections::HashSet;

use dungeon_core::{GeneratedDungeon, SurfaceLayer};

pub fn render_preview(dungeon: &GeneratedDungeon, columns: usize) -> String {
    let (width, height) = (dungeon.width(), dungeon.height());
    if width == 0 || height == 0 {
        return String::new();
    }
    let columns = columns.clamp(1, width);
    // Terminal glyphs are roughly twice as tall as they are wide.
    let rows = (height * columns / width / 2).max(1);

    let scatter: HashSet<(usize, usize)> = dungeon
        .scatter
        .iter()
        .map(|point| {
            (point.pos.x as usize * columns / width, point.pos.y as usize * rows / height)
        })
        .collect();

    let (alpha_width, alpha_height) = dungeon.alphamap.dimensions();
    let mut out = String::with_capacity((columns + 1) * rows);
    for row in 0..rows {
        for column in 0..columns {
            let x = column * width / columns;
            let y = row * height / rows;
            let layer = dungeon
                .layer_at(column * alpha_width / columns, row * alpha_height / rows)
                .unwrap_or(SurfaceLayer::Exterior);
            let glyph = match layer {
                SurfaceLayer::Floor => '.',
                SurfaceLayer::Wall => '#',
                SurfaceLayer::Exterior if scatter.contains(&(column, row)) => 'T',
                SurfaceLayer::Exterior => elevation_glyph(dungeon.heights[(x, y)]),
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn elevation_glyph(elevation: f32) -> char {
    match elevation {
        e if e < 0.3 => ' ',
        e if e < 0.6 => '-',
        _ => '^',
    }
}
