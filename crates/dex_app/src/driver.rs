use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use dex_core::{update, AppState, Msg};
use dex_engine::PokeApi;
use dex_logging::{dex_debug, dex_warn};

use crate::effects::EffectRunner;
use crate::error::AppError;
use crate::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    More,
    List,
    Show(usize),
    Back,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parses one input line. Entry numbers are 1-based as printed.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let head = words.next()?;
        let command = match head.to_ascii_lowercase().as_str() {
            "more" | "m" => Command::More,
            "list" | "l" | "ls" => Command::List,
            "back" | "b" => Command::Back,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            "show" | "s" => match words.next().and_then(|n| n.parse::<usize>().ok()) {
                Some(n) if n > 0 => Command::Show(n - 1),
                _ => Command::Unknown(line.trim().to_string()),
            },
            _ => Command::Unknown(line.trim().to_string()),
        };
        Some(command)
    }
}

/// Single task stream driving the core: every message goes through
/// [`Driver::dispatch`], effects go to the engine, results come back as
/// messages on the same loop.
pub struct Driver {
    state: AppState,
    runner: EffectRunner,
    event_timeout: Duration,
}

impl Driver {
    pub fn new(api: Arc<dyn PokeApi>, event_timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            state: AppState::new(),
            runner: EffectRunner::new(api)?,
            event_timeout,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Applies `msg` and hands resulting effects to the engine. Returns
    /// whether the view changed.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        dex_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
        self.state.consume_dirty()
    }

    /// Pumps engine results until nothing is in flight. Returns `false` if
    /// the engine went quiet for longer than the event timeout.
    pub fn settle(&mut self) -> bool {
        while self.state.has_in_flight() {
            match self.runner.next_msg(self.event_timeout) {
                Some(msg) => {
                    self.dispatch(msg);
                }
                None => {
                    dex_warn!(
                        "No engine result within {:?}; continuing with work in flight",
                        self.event_timeout
                    );
                    return false;
                }
            }
        }
        true
    }

    /// Applies every engine result that has already arrived, without
    /// waiting. Returns how many were applied.
    pub fn drain_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(msg) = self.runner.try_msg() {
            self.dispatch(msg);
            applied += 1;
        }
        applied
    }

    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
        writeln!(out, "{}", render::HELP)?;
        self.dispatch(Msg::LoadMore);
        self.settle();
        render::render(&mut out, &self.state.view())?;

        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            let Some(command) = Command::parse(&line?) else {
                continue;
            };
            if !self.execute(command, &mut out)? {
                break;
            }
        }
        Ok(())
    }

    fn execute(&mut self, command: Command, out: &mut impl Write) -> io::Result<bool> {
        match command {
            Command::More => {
                self.dispatch(Msg::LoadMore);
                self.settle();
                render::render_catalog(out, &self.state.view())?;
            }
            Command::List => {
                self.drain_pending();
                render::render_catalog(out, &self.state.view())?;
            }
            Command::Show(index) => {
                if index >= self.state.catalog().len() {
                    writeln!(out, "no entry {}", index + 1)?;
                    return Ok(true);
                }
                self.dispatch(Msg::EntrySelected { index });
                self.settle();
                render::render(out, &self.state.view())?;
            }
            Command::Back => {
                self.dispatch(Msg::NavigateBack);
                render::render(out, &self.state.view())?;
            }
            Command::Help => writeln!(out, "{}", render::HELP)?,
            Command::Quit => return Ok(false),
            Command::Unknown(text) => writeln!(out, "unknown command {text:?}; {}", render::HELP)?,
        }
        Ok(true)
    }
}
