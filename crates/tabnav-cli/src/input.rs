//! Line-oriented input parsing.
//!
//! Each stdin line is one command, e.g. `select pricing`, `next`, `back`.

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Select(String),
    Next,
    Previous,
    Back,
    Forward,
    /// Scroll the simulated page to an offset in pixels.
    Scroll(f64),
    /// Finish the running animation now instead of waiting for the timer.
    Done,
    /// Print the navigation state as JSON.
    State,
    /// Print the shareable address for the current selection.
    Link,
    List,
    Help,
    Quit,
    /// Blank line; nothing to do.
    Nothing,
    Unknown(String),
}

pub const HELP: &str = "\
commands:
  select <key>   show a panel (also: s <key>)
  next | prev    step through panels (also: n, p)
  back | forward move through history (also: b, f)
  scroll <px>    scroll the page; the section in view is selected
  done           finish the running animation
  state          print the navigation state as JSON
  link           print the bookmark address
  list           list panels
  help           show this help
  quit           exit";

/// Parses one input line. Leading and trailing whitespace is ignored.
pub fn parse_line(line: &str) -> InputAction {
    let line = line.trim();
    if line.is_empty() {
        return InputAction::Nothing;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    match word {
        "select" | "s" if !rest.is_empty() => InputAction::Select(rest.to_string()),
        "next" | "n" => InputAction::Next,
        "prev" | "previous" | "p" => InputAction::Previous,
        "back" | "b" => InputAction::Back,
        "forward" | "f" => InputAction::Forward,
        "scroll" => match rest.parse::<f64>() {
            Ok(px) if px.is_finite() && px >= 0.0 => InputAction::Scroll(px),
            _ => InputAction::Unknown(line.to_string()),
        },
        "done" => InputAction::Done,
        "state" => InputAction::State,
        "link" => InputAction::Link,
        "list" | "ls" => InputAction::List,
        "help" | "?" => InputAction::Help,
        "quit" | "q" | "exit" => InputAction::Quit,
        _ => InputAction::Unknown(line.to_string()),
    }
}
