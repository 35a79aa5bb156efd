use std::io::{self, Stdout, Write};
use std::time::Duration;

use indicatif::{HumanBytes, ProgressBar, ProgressStyle};

use crate::error::Result;
use crate::outcome::Outcome;
use crate::pipeline::Summary;

/// Consumer of the outcome stream, called once per terminal outcome in completion order.
pub trait Reporter: Send {
    fn report(&mut self, outcome: &Outcome, summary: &Summary) -> Result<()>;

    fn finish(&mut self, _summary: &Summary) -> Result<()> {
        Ok(())
    }
}

/// Prints one line per outcome above a spinner that keeps the running totals.
pub struct ConsoleReporter<W: Write = Stdout> {
    spinner: ProgressBar,
    out: W,
}

impl ConsoleReporter<Stdout> {
    pub fn stdout() -> Result<Self> {
        let style = ProgressStyle::with_template("{spinner:.blue} [{elapsed}] {msg}")?
            .tick_strings(&["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█", "▇", "▆", "▅", "▄", "▃", "▂", "✔"]);
        let spinner = ProgressBar::new_spinner().with_style(style).with_message("Fetching front pages");
        spinner.enable_steady_tick(Duration::from_millis(120));

        Ok(ConsoleReporter { spinner, out: io::stdout() })
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn with_spinner(spinner: ProgressBar, out: W) -> Self {
        ConsoleReporter { spinner, out }
    }
}

impl<W: Write + Send> Reporter for ConsoleReporter<W> {
    fn report(&mut self, outcome: &Outcome, summary: &Summary) -> Result<()> {
        let out = &mut self.out;
        self.spinner.suspend(|| writeln!(out, "{outcome}"))?;
        self.spinner.set_message(format!(
            "{} saved ({}), {} failed",
            summary.succeeded,
            HumanBytes(summary.bytes),
            summary.failed
        ));
        Ok(())
    }

    fn finish(&mut self, summary: &Summary) -> Result<()> {
        let message = finish_message(summary);
        if summary.is_clean() {
            self.spinner.finish_with_message(message);
        } else {
            self.spinner.abandon_with_message(message);
        }
        self.out.flush()?;
        Ok(())
    }
}

fn finish_message(summary: &Summary) -> String {
    let verdict = match (summary.is_clean(), summary.cancelled) {
        (true, _) => "SUCCESS",
        (false, true) => "FAILURE (interrupted)",
        (false, false) => "FAILURE",
    };
    format!(
        "{verdict} – {} saved ({}), {} failed",
        summary.succeeded,
        HumanBytes(summary.bytes),
        summary.failed
    )
}

/// One JSON object per line, followed by a closing summary object.
pub struct JsonReporter<W: Write = Stdout> {
    out: W,
}

impl<W: Write + Send> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        JsonReporter { out }
    }
}

impl<W: Write + Send> Reporter for JsonReporter<W> {
    fn report(&mut self, outcome: &Outcome, _summary: &Summary) -> Result<()> {
        serde_json::to_writer(&mut self.out, outcome)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self, summary: &Summary) -> Result<()> {
        serde_json::to_writer(&mut self.out, &serde_json::json!({ "summary": summary }))?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
