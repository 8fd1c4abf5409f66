//! Line-oriented interactive session.
//!
//! Every line either edits one of the four render inputs or becomes the new
//! input text. Each edit renders again from scratch.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use glyph_render::GlyphRenderer;
use log::debug;

use crate::notice::Notice;
use crate::prefs::{parse_switch, PrefKey, Preferences};

pub const HELP: &str = "\
:inner GLYPH      glyph for \"on\" cells
:outer GLYPH      glyph for \"off\" cells
:border [on|off]  set or toggle the border
:copy             copy the current output to the clipboard
:show             print the current settings
:help             print this help
:quit             leave the session
::text            render text starting with ':'
anything else     render it as the new input text";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Text(String),
    Inner(String),
    Outer(String),
    Border(Option<bool>),
    Copy,
    Show,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command :{0}, try :help")]
    Unknown(String),
    #[error(":{0} needs a glyph argument")]
    MissingGlyph(&'static str),
    #[error(transparent)]
    Prefs(#[from] crate::prefs::PrefsError),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Command::Text(line.to_owned()));
        };
        if rest.starts_with(':') {
            return Ok(Command::Text(rest.to_owned()));
        }

        let (name, argument) = match rest.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (rest, ""),
        };

        match name {
            "inner" | "i" if argument.is_empty() => Err(CommandError::MissingGlyph("inner")),
            "inner" | "i" => Ok(Command::Inner(argument.to_owned())),
            "outer" | "o" if argument.is_empty() => Err(CommandError::MissingGlyph("outer")),
            "outer" | "o" => Ok(Command::Outer(argument.to_owned())),
            "border" | "b" if argument.is_empty() || argument == "toggle" => {
                Ok(Command::Border(None))
            },
            "border" | "b" => Ok(Command::Border(Some(parse_switch(argument)?))),
            "copy" | "c" => Ok(Command::Copy),
            "show" => Ok(Command::Show),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Inputs changed, the fresh output should be shown.
    Rendered,
    /// The caller should copy the current output.
    CopyRequested,
    Info(String),
    Quit,
}

pub struct Session<'a> {
    renderer: GlyphRenderer<'a>,
    prefs: Preferences,
    output: String,
}

impl<'a> Session<'a> {
    pub fn new(renderer: GlyphRenderer<'a>, prefs: Preferences) -> Self {
        let output = renderer.render(&prefs.request());
        Self { renderer, prefs, output }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn apply(&mut self, command: Command) -> Result<Outcome, CommandError> {
        match command {
            Command::Text(text) => self.prefs.set(PrefKey::Text, &text)?,
            Command::Inner(glyph) => self.prefs.set(PrefKey::Inner, &glyph)?,
            Command::Outer(glyph) => self.prefs.set(PrefKey::Outer, &glyph)?,
            Command::Border(Some(on)) => self.prefs.with_border = on,
            Command::Border(None) => self.prefs.with_border = !self.prefs.with_border,
            Command::Copy => return Ok(Outcome::CopyRequested),
            Command::Show => return Ok(Outcome::Info(self.describe())),
            Command::Help => return Ok(Outcome::Info(HELP.to_owned())),
            Command::Quit => return Ok(Outcome::Quit),
        }

        self.output = self.renderer.render(&self.prefs.request());
        debug!("re-rendered {} bytes", self.output.len());
        Ok(Outcome::Rendered)
    }

    fn describe(&self) -> String {
        format!(
            "text: {:?}\ninner: {}\nouter: {}\nborder: {}",
            self.prefs.input_text,
            self.prefs.inner_glyph,
            self.prefs.outer_glyph,
            if self.prefs.with_border { "on" } else { "off" },
        )
    }
}

/// Drive `session` from `input` until end of input or `:quit`.
pub fn run<R, W, F>(session: &mut Session<'_>, input: R, mut out: W, mut copy: F) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> Notice,
{
    write_output(&mut out, session.output())?;

    for line in input.lines() {
        let line = line.context("failed to read input line")?;
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{}", Notice::error(err.to_string()))?;
                continue;
            },
        };

        match session.apply(command) {
            Ok(Outcome::Rendered) => write_output(&mut out, session.output())?,
            Ok(Outcome::CopyRequested) => writeln!(out, "{}", copy(session.output()))?,
            Ok(Outcome::Info(text)) => writeln!(out, "{text}")?,
            Ok(Outcome::Quit) => break,
            Err(err) => writeln!(out, "{}", Notice::error(err.to_string()))?,
        }
        out.flush()?;
    }

    Ok(())
}

fn write_output<W: Write>(out: &mut W, output: &str) -> Result<()> {
    if !output.is_empty() {
        writeln!(out, "{output}")?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
