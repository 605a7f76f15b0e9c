//! Month selection.
//!
//! [`select_month`] and [`MonthChoice::resolve`] are pure. The interactive
//! loop in [`prompt_for_month`] talks to the user only through a
//! [`ChoiceReader`], so it runs the same against a terminal or a script.

use std::io::{self, BufRead, Write};

use crate::error::{GexError, Result};

/// Pick the month at a 1-based `index`.
pub fn select_month(months: &[String], index: usize) -> Result<&str> {
    index
        .checked_sub(1)
        .and_then(|i| months.get(i))
        .map(String::as_str)
        .ok_or_else(|| GexError::InvalidSelection {
            choice: index.to_string(),
            available: months.len(),
        })
}

/// A non-interactive month choice from the command line or config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthChoice {
    /// 1-based position in the discovered list.
    Index(usize),
    /// Exact month label, e.g. `MAR 26`.
    Label(String),
}

impl MonthChoice {
    /// Integers are indices; anything else is a label.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        trimmed
            .parse::<usize>()
            .map_or_else(|_| Self::Label(trimmed.to_string()), Self::Index)
    }

    /// Resolve against the discovered months.
    pub fn resolve(&self, months: &[String]) -> Result<String> {
        match self {
            Self::Index(index) => select_month(months, *index).map(str::to_string),
            Self::Label(label) => months
                .iter()
                .find(|month| *month == label)
                .cloned()
                .ok_or_else(|| GexError::InvalidSelection {
                    choice: label.clone(),
                    available: months.len(),
                }),
        }
    }
}

/// Line-oriented I/O for the interactive prompt.
pub trait ChoiceReader {
    /// Show `prompt` and read one line; `None` at end of input.
    fn read_choice(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Show an informational line.
    fn notify(&mut self, message: &str) -> io::Result<()>;
}

/// [`ChoiceReader`] over any buffered reader and writer.
#[derive(Debug)]
pub struct LineChoiceReader<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineChoiceReader<R, W> {
    /// Wrap an input/output pair.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the reader, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl LineChoiceReader<io::StdinLock<'static>, io::Stdout> {
    /// Terminal-backed reader.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ChoiceReader for LineChoiceReader<R, W> {
    fn read_choice(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }
}

/// List `months` and ask until a valid 1-based number is entered.
///
/// Non-numeric and out-of-range answers re-prompt; end of input is
/// [`GexError::SelectionAborted`].
pub fn prompt_for_month(months: &[String], reader: &mut impl ChoiceReader) -> Result<String> {
    if months.is_empty() {
        return Err(GexError::InvalidSelection {
            choice: String::new(),
            available: 0,
        });
    }

    reader.notify("Available Months:")?;
    for (i, month) in months.iter().enumerate() {
        reader.notify(&format!("  {}. {month}", i + 1))?;
    }

    let prompt = format!("\nSelect month (1-{}): ", months.len());
    loop {
        let Some(answer) = reader.read_choice(&prompt)? else {
            return Err(GexError::SelectionAborted);
        };

        match answer.parse::<usize>() {
            Ok(index) => match select_month(months, index) {
                Ok(month) => return Ok(month.to_string()),
                Err(_) => {
                    reader.notify(&format!("Please enter a number between 1 and {}", months.len()))?;
                }
            },
            Err(_) => reader.notify("Invalid input. Please enter a number.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use test_case::test_case;

    fn months() -> Vec<String> {
        vec!["MAR 26".to_string(), "JUN 26".to_string(), "SEP 26".to_string()]
    }

    fn run_prompt(input: &str) -> (Result<String>, String) {
        let mut reader = LineChoiceReader::new(Cursor::new(input.as_bytes()), Vec::new());
        let result = prompt_for_month(&months(), &mut reader);
        let output = String::from_utf8(reader.into_output()).unwrap();
        (result, output)
    }

    #[test_case(1, "MAR 26"; "first")]
    #[test_case(3, "SEP 26"; "last")]
    fn test_select_month_valid(index: usize, expected: &str) {
        assert_eq!(select_month(&months(), index).unwrap(), expected);
    }

    #[test_case(0; "zero")]
    #[test_case(4; "past end")]
    fn test_select_month_out_of_range(index: usize) {
        let err = select_month(&months(), index).unwrap_err();
        assert!(matches!(err, GexError::InvalidSelection { available: 3, .. }));
    }

    #[test_case("2", MonthChoice::Index(2); "index")]
    #[test_case(" JUN 26 ", MonthChoice::Label("JUN 26".to_string()); "label")]
    #[test_case("-1", MonthChoice::Label("-1".to_string()); "negative is a label")]
    fn test_month_choice_parse(raw: &str, expected: MonthChoice) {
        assert_eq!(MonthChoice::parse(raw), expected);
    }

    #[test]
    fn test_month_choice_resolve() {
        assert_eq!(MonthChoice::Index(2).resolve(&months()).unwrap(), "JUN 26");
        assert_eq!(
            MonthChoice::Label("SEP 26".to_string()).resolve(&months()).unwrap(),
            "SEP 26"
        );
        assert!(MonthChoice::Label("sep 26".to_string()).resolve(&months()).is_err());
        assert!(MonthChoice::Index(9).resolve(&months()).is_err());
    }

    #[test]
    fn test_prompt_lists_months_and_accepts_choice() {
        let (result, output) = run_prompt("2\n");
        assert_eq!(result.unwrap(), "JUN 26");
        assert!(output.starts_with("Available Months:\n  1. MAR 26\n  2. JUN 26\n  3. SEP 26\n"));
        assert!(output.contains("Select month (1-3): "));
    }

    #[test]
    fn test_prompt_reasks_until_valid() {
        let (result, output) = run_prompt("abc\n7\n\n3\n");
        assert_eq!(result.unwrap(), "SEP 26");
        assert_eq!(output.matches("Invalid input. Please enter a number.").count(), 2);
        assert_eq!(output.matches("Please enter a number between 1 and 3").count(), 1);
        assert_eq!(output.matches("Select month (1-3): ").count(), 4);
    }

    #[test]
    fn test_prompt_end_of_input_aborts() {
        let (result, _) = run_prompt("x\n");
        assert!(matches!(result, Err(GexError::SelectionAborted)));
    }

    #[test]
    fn test_prompt_with_no_months() {
        let mut reader = LineChoiceReader::new(Cursor::new(&b"1\n"[..]), Vec::new());
        assert!(prompt_for_month(&[], &mut reader).is_err());
    }
}
