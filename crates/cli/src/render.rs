//! Menu output.

use std::fmt::Display;
use std::io::{self, Write};

use console::style;
use nps_client::{NearbyPlace, SiteRecord};

use crate::input::capitalize;

pub const RULE_WIDTH: usize = 40;

/// Writes menu text to any sink. Colour is opt-in so captured output stays plain.
pub struct Screen<W> {
    out: W,
    color: bool,
}

impl Screen<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout(), color: console::colors_enabled() }
    }
}

impl<W: Write> Screen<W> {
    pub fn plain(out: W) -> Self {
        Self { out, color: false }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    fn rule(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))
    }

    fn heading(&mut self, title: &str) -> io::Result<()> {
        self.rule()?;
        writeln!(self.out, "{}", style(title).bold().force_styling(self.color))?;
        self.rule()
    }

    /// Numbered listing of a region's sites.
    pub fn site_list(&mut self, region: &str, sites: &[SiteRecord]) -> io::Result<()> {
        self.heading(&format!("List of national sites in {}", capitalize(region)))?;
        for (idx, site) in sites.iter().enumerate() {
            writeln!(self.out, "[{}] {}", idx + 1, site.info())?;
        }
        self.out.flush()
    }

    pub fn places(&mut self, site: &SiteRecord, places: &[NearbyPlace]) -> io::Result<()> {
        self.heading(&format!("Places near {}", site.name))?;
        for place in places {
            writeln!(self.out, " - {}", place.info())?;
        }
        self.out.flush()
    }

    /// `[Error] {message}` preceded by a blank line.
    pub fn error(&mut self, message: impl Display) -> io::Result<()> {
        let line = format!("[Error] {message}");
        writeln!(self.out)?;
        writeln!(self.out, "{}", style(line).red().force_styling(self.color))
    }

    pub fn invalid_region(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", style("Enter a proper state or territory name!").yellow().force_styling(self.color))
    }

    pub fn goodbye(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Goodbye!")?;
        self.out.flush()
    }
}
