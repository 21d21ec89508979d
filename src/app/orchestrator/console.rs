//! Console output for the selection cycle
//!
//! Listing lines, status notices and the selection prompt all go through a
//! shared [`Console`] so the background listing task and the foreground flow
//! write to the same sink. The waiting indicator is an `indicatif` spinner on
//! stderr.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::style::{style, Stylize};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app::models::{CatalogItem, CatalogKind, ListMode};
use crate::constants::ui;

/// Shared, optionally colored line writer
#[derive(Clone)]
pub struct Console {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
    colored: bool,
}

impl Console {
    /// Console writing to standard output
    pub fn stdout(colored: bool) -> Self {
        Self::from_writer(io::stdout(), colored)
    }

    /// Console writing to any sink, e.g. a buffer in tests
    pub fn from_writer<W: Write + Send + 'static>(writer: W, colored: bool) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(writer))),
            colored,
        }
    }

    fn write_raw(&self, text: &str) -> io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        out.write_all(text.as_bytes())?;
        out.flush()
    }

    /// Writes one line
    pub fn line(&self, text: &str) -> io::Result<()> {
        self.write_raw(&format!("{}\n", text))
    }

    /// Writes a prompt without a line break
    pub fn prompt(&self, text: &str) -> io::Result<()> {
        self.write_raw(text)
    }

    /// Writes a failure notice, red when colors are enabled
    pub fn failure(&self, text: &str) -> io::Result<()> {
        let text = format!("{}  ", text);
        if self.colored {
            self.line(&style(text).red().to_string())
        } else {
            self.line(&text)
        }
    }

    /// Writes the separator shown after login
    pub fn separator(&self) -> io::Result<()> {
        self.line(&"=".repeat(ui::SEPARATOR_WIDTH))
    }

    /// Writes one catalog entry: courses on green, tracks on blue
    pub fn item(&self, kind: CatalogKind, item: &CatalogItem) -> io::Result<()> {
        let text = format!(" {}. {}  ", item.id, item.name);
        if !self.colored {
            return self.line(&text);
        }

        let styled = match kind {
            CatalogKind::Course => style(text).on_green(),
            CatalogKind::Track => style(text).on_blue(),
        };
        self.line(&styled.to_string())
    }

    /// Writes a whole listing, or the empty notice for `mode`
    pub fn listing(&self, mode: ListMode, items: &[CatalogItem]) -> io::Result<()> {
        if items.is_empty() {
            return self.failure(&mode.empty_notice());
        }
        for item in items {
            self.item(mode.kind(), item)?;
        }
        Ok(())
    }
}

/// Spinner drawn while the listing is fetched
///
/// Cycles through one to three dots at `interval`. Hidden spinners draw
/// nothing, which is what non-terminal runs and tests use.
pub fn waiting_indicator(interval: Duration, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("Waiting {spinner}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(ui::SPINNER_FRAMES);
    spinner.set_style(style);
    spinner.enable_steady_tick(interval);
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writer sharing its buffer with the test
    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_plain_listing() {
        let buffer = Buffer::default();
        let console = Console::from_writer(buffer.clone(), false);
        let items = vec![
            CatalogItem::new(1, "Intro", "L1"),
            CatalogItem::new(2, "Advanced", "L2"),
        ];

        console.listing(ListMode::CompletedCourses, &items).unwrap();
        assert_eq!(buffer.contents(), " 1. Intro  \n 2. Advanced  \n");
    }

    #[test]
    fn test_empty_listing_notice() {
        let buffer = Buffer::default();
        let console = Console::from_writer(buffer.clone(), false);

        console.listing(ListMode::CompletedTracks, &[]).unwrap();
        assert_eq!(buffer.contents(), "No completed tracks found!  \n");
    }

    #[test]
    fn test_colored_output_uses_escape_codes() {
        let buffer = Buffer::default();
        let console = Console::from_writer(buffer.clone(), true);

        console
            .item(CatalogKind::Track, &CatalogItem::new(3, "SQL", "L3"))
            .unwrap();
        let contents = buffer.contents();
        assert!(contents.contains(" 3. SQL  "));
        assert!(contents.contains('\u{1b}'));
    }

    #[test]
    fn test_separator_and_prompt() {
        let buffer = Buffer::default();
        let console = Console::from_writer(buffer.clone(), false);

        console.separator().unwrap();
        console.prompt("ids: ").unwrap();
        let contents = buffer.contents();
        assert!(contents.starts_with(&"=".repeat(ui::SEPARATOR_WIDTH)));
        assert!(contents.ends_with("\nids: "));
    }

    #[test]
    fn test_hidden_indicator() {
        let spinner = waiting_indicator(ui::SPINNER_INTERVAL, false);
        assert!(spinner.is_hidden());
        spinner.finish_and_clear();
    }
}
