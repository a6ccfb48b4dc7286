// UI layer: the numbered text menu. Prompts go through the `Prompt` trait so
// the loop can be driven by `dialoguer` in the terminal, by piped stdin, or by
// a script in tests. Output goes to any `io::Write`.

use crate::error::TrackerError;
use crate::tracker::Tracker;
use anyhow::{bail, Context, Result};
use dialoguer::Input;
use log::warn;
use std::io::{self, BufRead, IsTerminal, Write};

const MENU: &str = "=== UNI PROGRESS TRACKER ===
1. Add course
2. Add score to course
3. Show report
4. Exit";

/// One command read at the menu prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddCourse,
    AddScore,
    ShowReport,
    Exit,
    Other(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => Command::AddCourse,
            "2" => Command::AddScore,
            "3" => Command::ShowReport,
            "4" => Command::Exit,
            other => Command::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Running,
    Exited,
}

impl MenuState {
    /// `Exit` ends the loop; every other command keeps it running.
    /// `Exited` is terminal.
    pub fn next(self, command: &Command) -> Self {
        match (self, command) {
            (MenuState::Exited, _) | (_, Command::Exit) => MenuState::Exited,
            _ => MenuState::Running,
        }
    }
}

/// Source of free-text answers to prompts.
pub trait Prompt {
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}

/// Interactive prompt backed by `dialoguer::Input`.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        // Empty answers are allowed so validation happens in one place.
        let line: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .context("Failed to read from terminal")?;
        Ok(line)
    }
}

/// Line-by-line prompt for non-interactive input such as a pipe or a
/// redirected file. The prompt text is echoed to `echo`; end of input is an
/// error so the menu cannot spin on an exhausted stream.
pub struct LinePrompt<R, W> {
    reader: R,
    echo: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(reader: R, echo: W) -> Self {
        LinePrompt { reader, echo }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.echo, "{prompt}: ")?;
        self.echo.flush()?;
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            bail!("input closed");
        }
        Ok(line.trim_end_matches(|c: char| c == '\n' || c == '\r').to_string())
    }
}

/// Production entry point: stdout output, with `dialoguer` prompts on a
/// terminal and plain line reads otherwise.
pub fn main_menu(mut tracker: Tracker) -> Result<()> {
    let stdout = io::stdout();
    let styled = stdout.is_terminal();
    let mut out = stdout.lock();
    let stdin = io::stdin();
    if stdin.is_terminal() {
        run_menu(&mut tracker, &mut TerminalPrompt, &mut out, styled)
    } else {
        let mut prompt = LinePrompt::new(stdin.lock(), io::stdout());
        run_menu(&mut tracker, &mut prompt, &mut out, styled)
    }
}

/// Run the menu until the user picks Exit. Validation and save failures are
/// printed and the loop continues; only a failing prompt or output stream
/// ends it early. `styled` enables terminal colours in the report.
pub fn run_menu<P, W>(tracker: &mut Tracker, prompt: &mut P, out: &mut W, styled: bool) -> Result<()>
where
    P: Prompt + ?Sized,
    W: Write + ?Sized,
{
    let mut state = MenuState::Running;
    while state == MenuState::Running {
        writeln!(out, "{MENU}")?;
        let command = Command::parse(&prompt.read_line("Choose an option (1-4)")?);
        match &command {
            Command::AddCourse => handle_add_course(tracker, prompt, out)?,
            Command::AddScore => handle_add_score(tracker, prompt, out)?,
            Command::ShowReport => {
                writeln!(out)?;
                write!(out, "{}", tracker.report().render(styled))?;
                writeln!(out)?;
            }
            Command::Exit => writeln!(out, "Goodbye.")?,
            Command::Other(_) => writeln!(out, "Invalid option.\n")?,
        }
        state = state.next(&command);
    }
    Ok(())
}

fn handle_add_course<P, W>(tracker: &mut Tracker, prompt: &mut P, out: &mut W) -> Result<()>
where
    P: Prompt + ?Sized,
    W: Write + ?Sized,
{
    let name = prompt.read_line("Course name (e.g. MTH101)")?;
    // Reject duplicates before asking for the credit.
    if tracker.has_course(&name) {
        writeln!(out, "Course already exists.")?;
        return Ok(());
    }
    if name.trim().is_empty() {
        return report_error(out, &TrackerError::InvalidCourseName);
    }
    let credit = prompt.read_line("Course credit (e.g. 3)")?;
    match tracker.add_course(&name, &credit) {
        Ok(course) => writeln!(out, "Added course: {}", course.id)?,
        Err(e) => report_error(out, &e)?,
    }
    Ok(())
}

fn handle_add_score<P, W>(tracker: &mut Tracker, prompt: &mut P, out: &mut W) -> Result<()>
where
    P: Prompt + ?Sized,
    W: Write + ?Sized,
{
    let name = prompt.read_line("Course name")?;
    if !tracker.has_course(&name) {
        writeln!(out, "Course not found.")?;
        return Ok(());
    }
    let score = prompt.read_line("Enter score (0-100)")?;
    match tracker.add_score(&name, &score) {
        Ok(course) => {
            let added = course.scores.last().copied().unwrap_or_default();
            writeln!(out, "Added score {added:?} to {}", course.id)?;
        }
        Err(e) => report_error(out, &e)?,
    }
    Ok(())
}

/// Short user-facing message for a failed operation.
pub fn user_message(err: &TrackerError) -> String {
    match err {
        TrackerError::DuplicateCourse(_) => "Course already exists.".into(),
        TrackerError::InvalidCourseName => "Course name cannot be empty.".into(),
        TrackerError::InvalidCredit(_) => "Invalid credit.".into(),
        TrackerError::CourseNotFound(_) => "Course not found.".into(),
        TrackerError::InvalidScore(_) => "Invalid score.".into(),
        TrackerError::ScoreOutOfRange(_) => "Score must be between 0 and 100.".into(),
        TrackerError::CorruptSnapshot { .. } | TrackerError::Io { .. } => {
            format!("Could not save: {err}")
        }
    }
}

fn report_error<W: Write + ?Sized>(out: &mut W, err: &TrackerError) -> Result<()> {
    if !err.is_recoverable() {
        warn!("operation failed: {err}");
    }
    writeln!(out, "{}", user_message(err))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_from_menu_numbers() {
        assert_eq!(Command::parse(" 1 "), Command::AddCourse);
        assert_eq!(Command::parse("2"), Command::AddScore);
        assert_eq!(Command::parse("3"), Command::ShowReport);
        assert_eq!(Command::parse("4"), Command::Exit);
        assert_eq!(Command::parse("exit"), Command::Other("exit".into()));
        assert_eq!(Command::parse(""), Command::Other(String::new()));
    }

    #[test]
    fn only_exit_leaves_running() {
        let running = MenuState::Running;
        assert_eq!(running.next(&Command::AddCourse), MenuState::Running);
        assert_eq!(running.next(&Command::Other("9".into())), MenuState::Running);
        assert_eq!(running.next(&Command::Exit), MenuState::Exited);
        assert_eq!(
            MenuState::Exited.next(&Command::ShowReport),
            MenuState::Exited
        );
    }

    #[test]
    fn line_prompt_reads_piped_answers() {
        let input = io::Cursor::new("1\r\n MTH101 \n3");
        let mut echo = Vec::new();
        let mut prompt = LinePrompt::new(input, &mut echo);

        assert_eq!(prompt.read_line("Choose an option (1-4)").unwrap(), "1");
        assert_eq!(prompt.read_line("Course name").unwrap(), " MTH101 ");
        assert_eq!(prompt.read_line("Course credit").unwrap(), "3");
        let err = prompt.read_line("Choose an option (1-4)").unwrap_err();
        assert_eq!(err.to_string(), "input closed");

        let echoed = String::from_utf8(echo).unwrap();
        assert!(echoed.starts_with("Choose an option (1-4): Course name: "));
    }

    #[test]
    fn line_prompt_keeps_blank_lines() {
        let mut prompt = LinePrompt::new(io::Cursor::new("\n"), io::sink());
        assert_eq!(prompt.read_line("Course name").unwrap(), "");
        assert!(prompt.read_line("Course name").is_err());
    }

    #[test]
    fn messages_for_validation_errors() {
        assert_eq!(
            user_message(&TrackerError::ScoreOutOfRange(120.0)),
            "Score must be between 0 and 100."
        );
        assert_eq!(
            user_message(&TrackerError::InvalidScore("x".into())),
            "Invalid score."
        );
    }
}
