//! Shift benchmark: scrolling a full 80x25 grid.
//!
//! Shifts move every cell appearance once, so this is the hot loop of any
//! scrolling console.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glyphgrid::{Color, Editor, Font, FontSize, Grid, TextureId};
use std::sync::Arc;

fn bench_grid() -> Grid {
    let font =
        Arc::new(Font::new("bench", 8, 16, FontSize::One, 16, 16, 219, TextureId(0)).unwrap());
    let mut grid = Grid::new(80, 25, font).unwrap();
    {
        let mut editor = Editor::new(&mut grid);
        for y in 0..25 {
            editor
                .print_colors(
                    0,
                    y,
                    "The quick brown fox jumps over the lazy dog",
                    Color::WHITE,
                    Color::BLACK,
                )
                .unwrap();
        }
    }
    grid
}

fn shift_up_no_wrap(c: &mut Criterion) {
    let mut grid = bench_grid();
    c.bench_function("shift_up_no_wrap", |b| {
        b.iter(|| {
            let mut editor = Editor::new(&mut grid);
            editor.shift_up(black_box(1), false);
        });
    });
}

fn shift_up_wrap(c: &mut Criterion) {
    let mut grid = bench_grid();
    c.bench_function("shift_up_wrap", |b| {
        b.iter(|| {
            let mut editor = Editor::new(&mut grid);
            editor.shift_up(black_box(1), true);
        });
    });
}

fn shift_left_wrap(c: &mut Criterion) {
    let mut grid = bench_grid();
    c.bench_function("shift_left_wrap", |b| {
        b.iter(|| {
            let mut editor = Editor::new(&mut grid);
            editor.shift_left(black_box(4), true);
        });
    });
}

fn print_full_row(c: &mut Criterion) {
    let mut grid = bench_grid();
    c.bench_function("print_full_row", |b| {
        b.iter(|| {
            let mut editor = Editor::new(&mut grid);
            editor
                .print(0, black_box(12), "0123456789012345678901234567890123456789")
                .unwrap();
        });
    });
}

criterion_group!(benches, shift_up_no_wrap, shift_up_wrap, shift_left_wrap, print_full_row);
criterion_main!(benches);
