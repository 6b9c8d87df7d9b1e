//! Host-driven content mutation: toggling a section changes the content's
//! height out-of-band. The content watcher notices and refreshes the bar on
//! its own; pressing `r` shows the manual refresh escape hatch.

use std::fs::File;
use std::time::{Duration, Instant};

use simplelog::{Config, LevelFilter, WriteLogger};
use scrolldom::{
    find_element_mut, Border, Color, Edges, Element, Event, Key, ScrollAreas, ScrollOptions, Size,
    Style, Terminal,
};

const SECTIONS: usize = 5;

fn main() -> std::io::Result<()> {
    let log_file = File::create("accordion.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut term = Terminal::new()?;
    let mut areas = ScrollAreas::new();
    let mut root = ui();

    areas.attach(&mut root, "panel", ScrollOptions::new().scroll_step(2));

    loop {
        term.render(&root)?;

        let now = Instant::now();
        let timeout = areas
            .next_deadline(now)
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(Duration::from_millis(250))
            .min(Duration::from_millis(250));

        let events = term.poll(Some(timeout))?;
        let now = Instant::now();

        for event in &events {
            if let Event::Key { key, .. } = event {
                match key {
                    Key::Char('q') | Key::Escape => return Ok(()),
                    Key::Char('r') => {
                        areas.refresh(&mut root, term.layout(), "panel");
                        continue;
                    }
                    Key::Char(c) => {
                        if let Some(section) = c.to_digit(10) {
                            toggle_section(&mut root, section as usize);
                            continue;
                        }
                    }
                    _ => {}
                }
            }
            let _ = areas.handle_event(&mut root, term.layout(), event, now);
        }

        let _ = areas.tick(&mut root, term.layout(), now);
    }
}

fn toggle_section(root: &mut Element, section: usize) {
    if section == 0 || section > SECTIONS {
        return;
    }
    if let Some(body) = find_element_mut(root, &format!("body-{section}")) {
        body.hidden = !body.hidden;
    }
}

fn ui() -> Element {
    Element::col()
        .width(Size::Fill)
        .height(Size::Fill)
        .style(Style::new().background(Color::oklch(0.15, 0.01, 250.0)))
        .padding(Edges::all(1))
        .gap(1)
        .child(
            Element::text("Accordion - 1..5 toggles a section, r=refresh, q=quit")
                .style(Style::new().bold()),
        )
        .child(
            Element::col()
                .id("panel")
                .width(Size::Fixed(60))
                .height(Size::Fill)
                .style(
                    Style::new()
                        .background(Color::oklch(0.22, 0.02, 150.0))
                        .border(Border::Single),
                )
                .padding(Edges::all(1))
                .children((1..=SECTIONS).map(section)),
        )
}

fn section(n: usize) -> Element {
    let hue = (n as f32 * 70.0) % 360.0;
    Element::col()
        .child(
            Element::text(format!("[{n}] Section {n}")).style(
                Style::new()
                    .background(Color::oklch(0.4, 0.1, hue))
                    .bold(),
            ),
        )
        .child(
            Element::col()
                .id(format!("body-{n}"))
                .hidden(n != 1)
                .children((1..=8).map(|line| {
                    Element::text(format!("  section {n} line {line} of filler text"))
                })),
        )
}
