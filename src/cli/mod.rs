//! Terminal front-end: pages, tables, charts and the command loop

pub mod config;
pub mod notice;
pub mod page;
pub mod plot;
pub mod session;
pub mod table;

use std::io::{self, BufRead, Write};

use crate::load::{
    error,
    parse::{self, Command},
};
use notice::Notice;
use page::Page;
use session::Session;

pub const BANNER: &str = "Metronome — Personal Finance Tracker";

fn show<W: Write>(out: &mut W, notices: &[Notice]) -> io::Result<()> {
    for n in notices {
        writeln!(out, "{}", n)?;
    }
    Ok(())
}

fn menu() -> Notice {
    Notice::Plain(format!(
        "Navigate: {}",
        Page::all()
            .map(|p| format!("[{}] {}", p.number(), p.title()))
            .collect::<Vec<_>>()
            .join("  ")
    ))
}

/// Read commands line by line until `quit` or end of input
///
/// Errors in a line are reported and the loop goes on.
pub fn interactive<R, W>(session: &mut Session, input: R, out: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", Notice::Header(BANNER.to_string()))?;
    show(out, &[menu()])?;
    show(out, &session.render())?;
    write!(out, "> ")?;
    out.flush()?;
    for line in input.lines() {
        let line = line?;
        let mut errs = error::Record::new();
        match parse::extract("stdin", &mut errs, &line) {
            Some(Command::Quit) => {
                show(out, &session.dispatch(Command::Quit))?;
                return Ok(());
            }
            Some(cmd) => show(out, &session.dispatch(cmd))?,
            None => write!(out, "{}", errs)?,
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    show(out, &session.dispatch(Command::Quit))
}

/// Run already validated commands, stopping at the first `quit`
pub fn batch<W: Write>(session: &mut Session, commands: Vec<Command>, out: &mut W) -> io::Result<()> {
    for cmd in commands {
        let quit = cmd == Command::Quit;
        show(out, &session.dispatch(cmd))?;
        if quit {
            return Ok(());
        }
    }
    Ok(())
}
