use std::fs::File;
use std::time::{Duration, Instant};

use simplelog::{Config, LevelFilter, WriteLogger};
use scrolldom::{
    Border, Color, Direction, Edges, Element, Event, Key, ScrollAreas, ScrollOptions, Size, Style,
    Terminal,
};

fn main() -> std::io::Result<()> {
    let log_file = File::create("demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut term = Terminal::new()?;
    let mut areas = ScrollAreas::new();
    let mut root = ui();

    // Demo tuning: the defaults are calibrated for pixel-sized steps; a
    // terminal wants finer ones.
    let options = ScrollOptions::new().scroll_step(2).wheel_multiplier(1.0);
    areas.attach(&mut root, "list", options.clone());
    areas.attach(&mut root, "article", options.auto_hide(true));

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
                    _ => {}
                }
            }
            let _ = areas.handle_event(&mut root, term.layout(), event, now);
        }

        let _ = areas.tick(&mut root, term.layout(), now);
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
            Element::text("Scroll Demo - wheel/drag/buttons/keys, click to focus, q=quit")
                .style(Style::new().bold()),
        )
        .child(
            Element::row()
                .width(Size::Fill)
                .height(Size::Fill)
                .gap(2)
                .child(list_panel())
                .child(article_panel()),
        )
}

fn list_panel() -> Element {
    Element::col()
        .id("list")
        .width(Size::Fixed(26))
        .height(Size::Fill)
        .style(
            Style::new()
                .background(Color::oklch(0.2, 0.03, 200.0))
                .border(Border::Rounded),
        )
        .padding(Edges::all(1))
        .child(Element::text("Item List").style(Style::new().bold()))
        .child(Element::text(""))
        .children((1..=150).map(list_item))
}

fn list_item(n: u32) -> Element {
    let hue = (n as f32 * 18.0) % 360.0;
    Element::text(format!("Item {n}"))
        .style(Style::new().background(Color::oklch(0.35, 0.08, hue)))
}

fn article_panel() -> Element {
    Element::col()
        .id("article")
        .width(Size::Fill)
        .height(Size::Fill)
        .direction(Direction::Column)
        .style(
            Style::new()
                .background(Color::oklch(0.2, 0.03, 280.0))
                .border(Border::Rounded),
        )
        .padding(Edges::all(1))
        .gap(1)
        .child(Element::text("Long Article").style(Style::new().bold()))
        .children((1..=40).map(|i| {
            Element::text(format!(
                "Paragraph {i}: drag the thumb, click the track to page,\n\
                 hold the arrow buttons to repeat, or use the wheel.\n\
                 This panel auto-hides its bar after a while."
            ))
        }))
}
