//! Pages through a text file the way a virtual list view would.
//!
//! Run with: cargo run -p virtual-window --example line_window -- <file> [config.toml]
//!
//! Each line becomes a row of (line number, length, text). The window is
//! scrolled a page at a time, then sorted by length, and the rows on screen
//! are printed after each step. Set `RUST_LOG=virtual_window=debug` to watch
//! batches being pulled.

use std::fs::File;
use std::io::{BufRead, BufReader};

use tracing_subscriber::EnvFilter;
use virtual_window::{Alignment, Column, DataWindow, SortOrder, WindowConfig, producer};

struct Line {
    number: usize,
    text: String,
}

const PAGE: usize = 15;

fn columns() -> Vec<Column<Line>> {
    vec![
        Column::new("#")
            .with_text(|line: &Line| line.number)
            .with_key(|line: &Line| line.number)
            .with_alignment(Alignment::Right)
            .with_width(60),
        Column::new("Length")
            .with_text(|line: &Line| line.text.chars().count())
            .with_key(|line: &Line| line.text.chars().count())
            .with_alignment(Alignment::Right)
            .with_first_direction(SortOrder::Descending),
        Column::new("Text")
            .with_text(|line: &Line| line.text.clone())
            .with_key(|line: &Line| line.text.to_lowercase())
            .with_width(400),
    ]
}

fn print_page(window: &DataWindow<Line>) -> virtual_window::Result<()> {
    let top = window.viewport().top;
    let bottom = (top + PAGE).min(window.get_count());
    for row in top..bottom {
        let marker = if window.get_item_state(row).current { '>' } else { ' ' };
        println!(
            "{marker} {:>6} {:>6}  {}",
            window.get_item_text(row, 0)?,
            window.get_item_text(row, 1)?,
            window.get_item_text(row, 2)?
        );
    }
    println!(
        "-- rows {top}..{bottom} of {}{}",
        window.get_count(),
        if window.is_populated() { "" } else { "+" }
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: line_window <file> [config.toml]");
        std::process::exit(2);
    };
    let config = match args.next() {
        Some(config_path) => WindowConfig::from_toml_file(config_path)?,
        None => WindowConfig::default(),
    };

    let file = File::open(&path).map_err(|e| virtual_window::Error::io(&path, e))?;
    let lines = BufReader::new(file)
        .lines()
        .enumerate()
        .map(|(index, text)| text.map(|text| Line { number: index + 1, text }));

    let mut window = DataWindow::new(columns(), config)?;
    window.populate(producer::from_results(lines))?;
    window.on_page_capacity_changed(PAGE);

    window.on_visible_range_changed(0, PAGE - 1)?;
    if window.get_count() > PAGE / 2 {
        window.on_row_focused(PAGE / 2)?;
    }
    print_page(&window)?;

    window.on_visible_range_changed(PAGE, 2 * PAGE - 1)?;
    print_page(&window)?;

    let outcome = window.on_column_header_activated(1)?;
    println!(
        "sorted by length ({:?}), focus now on row {:?}",
        outcome.order, outcome.current
    );
    print_page(&window)?;

    Ok(())
}
