//! Plain-text output for the terminal.

use std::io::{self, Write};

use crossterm::style::{Color, Stylize, style};

use courier_domain::{
    Collection, CollectionItem, Environment, HistoryItem, HttpMethod, MethodColor, ResponseView,
    StatusClass,
};

/// Applies colours when enabled, otherwise passes text through.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(self, text: String, color: Color) -> String {
        if self.enabled {
            style(text).with(color).to_string()
        } else {
            text
        }
    }

    /// Method name padded to a fixed width.
    pub fn method(self, method: HttpMethod) -> String {
        let color = match method.color() {
            MethodColor::Green => Color::Green,
            MethodColor::Orange => Color::DarkYellow,
            MethodColor::Blue => Color::Blue,
            MethodColor::Red => Color::Red,
            MethodColor::Purple => Color::Magenta,
        };
        self.paint(format!("{:<6}", method.as_str()), color)
    }

    fn status(self, status: u16, text: &str, class: StatusClass) -> String {
        let line = format!("{status} {text}");
        match class {
            StatusClass::Success => self.paint(line, Color::Green),
            StatusClass::Failure => self.paint(line, Color::Red),
            StatusClass::Neutral => line,
        }
    }
}

pub fn response(out: &mut impl Write, view: &ResponseView, painter: Painter) -> io::Result<()> {
    match view {
        ResponseView::Empty => Ok(()),
        ResponseView::Error { message } => writeln!(out, "Error: {message}"),
        ResponseView::Success(ok) => {
            writeln!(
                out,
                "{}  {} ms",
                painter.status(ok.status, &ok.status_text, ok.class),
                ok.time_ms
            )?;
            for (name, value) in &ok.headers {
                writeln!(out, "{name}: {value}")?;
            }
            writeln!(out)?;
            writeln!(out, "{}", ok.body_text)
        }
    }
}

pub fn history(out: &mut impl Write, items: &[HistoryItem], painter: Painter) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "No history yet");
    }
    for item in items {
        writeln!(out, "{}\t{} {}", item.id, painter.method(item.method()), item.url())?;
    }
    Ok(())
}

pub fn collections(out: &mut impl Write, collections: &[Collection]) -> io::Result<()> {
    if collections.is_empty() {
        return writeln!(out, "No collections");
    }
    for collection in collections {
        writeln!(out, "{}\t{}", collection.id, collection.name)?;
    }
    Ok(())
}

pub fn items(out: &mut impl Write, items: &[CollectionItem], painter: Painter) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "Collection is empty");
    }
    for item in items {
        writeln!(out, "{}\t{} {}", item.id, painter.method(item.method()), item.url())?;
    }
    Ok(())
}

pub fn environments(out: &mut impl Write, environments: &[Environment]) -> io::Result<()> {
    if environments.is_empty() {
        return writeln!(out, "No environments");
    }
    for env in environments {
        let names: Vec<&str> = env.variables.keys().map(String::as_str).collect();
        writeln!(out, "{}\t{}\t{}", env.id, env.name, names.join(", "))?;
    }
    Ok(())
}
