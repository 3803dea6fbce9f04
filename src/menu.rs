//! The console session: reports directory, selection loop, argument prompts.

use crate::cache::{Clock, SystemClock};
use crate::database::Database;
use crate::error::Result;
use crate::render::render_outcome;
use crate::reports::{DEFAULT_KEY, Dispatcher};
use log::{error, info};
use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

pub const ENTER_A_NUMBER: &str = "--- Please enter a number ---";
pub const FAREWELL: &str = "Thank you for using our services";
pub const QUIT: &str = "q";

/// Elapsed time in the `Minutes: m | Seconds: s` form printed after a run.
pub fn benchmark(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs_f64();
    format!("Minutes: {:.4} | Seconds: {:.3}", seconds / 60.0, seconds)
}

pub struct Menu<'a, C: Clock = SystemClock> {
    db: &'a Database,
    dispatcher: Dispatcher<C>,
}

impl<'a> Menu<'a, SystemClock> {
    pub fn new(db: &'a Database, ttl: Duration) -> Self {
        Self::with_dispatcher(db, Dispatcher::new(ttl))
    }
}

impl<'a, C: Clock> Menu<'a, C> {
    pub fn with_dispatcher(db: &'a Database, dispatcher: Dispatcher<C>) -> Self {
        Menu { db, dispatcher }
    }

    pub fn directory(&self) -> String {
        let mut out = String::from("\n         Reports Directory\n");
        out.push_str(&"-".repeat(40));
        out.push('\n');
        for report in self.dispatcher.catalog().listed() {
            out.push_str(&format!("{}\n", report));
        }
        out.push_str(&format!("{} - End\n\n", QUIT));
        out.push_str("Please make a selection\n");
        out
    }

    /// Serves selections until `q` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, output: &mut W) -> Result<()> {
        write!(output, "{}", self.directory())?;
        output.flush()?;

        while let Some(line) = read_line(&mut input)? {
            let choice = line.trim();
            if choice == QUIT {
                break;
            }

            let key = match choice.split_whitespace().next().map(str::parse::<i32>) {
                Some(Ok(n)) => usize::try_from(n).unwrap_or(DEFAULT_KEY),
                _ => {
                    writeln!(output, "{}", ENTER_A_NUMBER)?;
                    write!(output, "{}", self.directory())?;
                    output.flush()?;
                    continue;
                }
            };

            let Some(args) = self.prompt_args(key, &mut input, output)? else {
                break;
            };
            self.run_report(key, &args, output)?;
            write!(output, "{}", self.directory())?;
            output.flush()?;
        }

        writeln!(output, "{}", FAREWELL)?;
        output.flush()?;
        Ok(())
    }

    /// Asks for each argument the report takes. `None` when input ends
    /// before every argument was given.
    fn prompt_args<R: BufRead, W: Write>(
        &self,
        key: usize,
        input: &mut R,
        output: &mut W,
    ) -> Result<Option<Vec<String>>> {
        let params = self.dispatcher.catalog().get(key).params;
        let mut args = Vec::with_capacity(params.len());
        for param in params {
            write!(output, "Enter {}: ", param)?;
            output.flush()?;
            match read_line(input)? {
                Some(line) => args.push(line.trim().to_string()),
                None => return Ok(None),
            }
        }
        Ok(Some(args))
    }

    fn run_report<W: Write>(&mut self, key: usize, args: &[String], output: &mut W) -> Result<()> {
        let start = Instant::now();
        match self.dispatcher.dispatch(self.db, key, args) {
            Ok(outcome) => writeln!(output, "\n{}", render_outcome(&outcome))?,
            Err(e) => {
                error!("report {} failed: {}", key, e);
                writeln!(output, "\nThe report could not be produced: {}", e)?;
            }
        }
        let elapsed = start.elapsed();
        info!("report {} took {:.3}s", key, elapsed.as_secs_f64());
        writeln!(output, "\n{}\n", benchmark(elapsed))?;
        Ok(())
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
