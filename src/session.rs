//! Interactive menu loop tying loading, cleaning, sorting and rendering together
//!
//! The session owns the input and output streams. The column being worked on
//! is a [`Dataset`] value handed to each stage and replaced by what the stage
//! returns, so nothing is shared between stages except through that value.

use crate::data::{is_missing, Table};
use crate::error::Error;
use crate::sort::{insertion_sort, SortOrder};
use crate::stats::{clean_column, ReplacementMode};
use crate::viz::{render_bars, BarScale};
use std::io::{BufRead, Write};
use std::str::FromStr;

const PATH_PROMPT: &str = "Enter the path to the CSV file: ";
const COLUMN_PROMPT: &str = "Choose the column to process: ";
const MODE_PROMPT: &str = "Enter the replacement value for empty cells (min/max/avg): ";
const ORDER_PROMPT: &str = "Choose sorting order (ascending/descending): ";
const MENU_PROMPT: &str = "Enter your choice (1/2/3/4/5): ";

/// The column currently being worked on
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Dataset {
    /// Nothing loaded yet
    #[default]
    Empty,
    /// Text cells straight from the CSV file; blanks allowed
    Raw(Vec<String>),
    /// Numbers produced by cleaning or sorting
    Numeric(Vec<f64>),
}

impl Dataset {
    /// Number of cells, blanks included
    pub fn len(&self) -> usize {
        match self {
            Dataset::Empty => 0,
            Dataset::Raw(cells) => cells.len(),
            Dataset::Numeric(values) => values.len(),
        }
    }

    /// A column with no data rows counts as nothing loaded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cells as text, the input form of the cleaner
    pub fn to_text(&self) -> Vec<String> {
        match self {
            Dataset::Empty => Vec::new(),
            Dataset::Raw(cells) => cells.clone(),
            Dataset::Numeric(values) => values.iter().map(f64::to_string).collect(),
        }
    }

    /// Cells as numbers; raw data must not have blanks left
    pub fn to_numbers(&self) -> Result<Vec<f64>, Error> {
        match self {
            Dataset::Empty => Ok(Vec::new()),
            Dataset::Raw(cells) => cells
                .iter()
                .map(|cell| {
                    if is_missing(cell) {
                        return Err(Error::MissingValues);
                    }
                    cell.trim()
                        .parse()
                        .map_err(|_| Error::NonNumericValue(cell.clone()))
                })
                .collect(),
            Dataset::Numeric(values) => Ok(values.clone()),
        }
    }
}

/// Options offered by the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Load,
    Clean,
    Analyze,
    Visualize,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(MenuChoice::Load),
            "2" => Ok(MenuChoice::Clean),
            "3" => Ok(MenuChoice::Analyze),
            "4" => Ok(MenuChoice::Visualize),
            "5" => Ok(MenuChoice::Exit),
            other => Err(other.to_string()),
        }
    }
}

/// One interactive run over a pair of text streams
pub struct Session<R, W> {
    input: R,
    output: W,
    scale: BarScale,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Start a session reading answers from `input` and printing to `output`
    pub fn new(input: R, output: W, scale: BarScale) -> Self {
        Self {
            input,
            output,
            scale,
        }
    }

    /// Give back the output stream
    pub fn into_output(self) -> W {
        self.output
    }

    /// Show the menu until the user exits or the input is closed
    pub fn run(&mut self) -> Result<(), Error> {
        let mut data = Dataset::Empty;

        loop {
            self.print_menu()?;
            let answer = match self.prompt(MENU_PROMPT) {
                Ok(answer) => answer,
                Err(Error::InputClosed) => break,
                Err(e) => return Err(e),
            };

            let Ok(choice) = answer.parse::<MenuChoice>() else {
                writeln!(self.output, "Invalid choice. Please enter a valid option.")?;
                continue;
            };
            if choice == MenuChoice::Exit {
                writeln!(self.output, "Goodbye.")?;
                return Ok(());
            }

            data = match self.dispatch(choice, data) {
                Ok(next) => next,
                Err(Error::InputClosed) => break,
                Err(e) => return Err(e),
            };
        }

        log::debug!("input closed, leaving the menu");
        Ok(())
    }

    /// Run one menu option against the current data and return the new data
    pub fn dispatch(&mut self, choice: MenuChoice, data: Dataset) -> Result<Dataset, Error> {
        let guidance = match choice {
            MenuChoice::Load | MenuChoice::Exit => None,
            MenuChoice::Clean => Some("Please load the data first."),
            MenuChoice::Analyze => Some("Please load and clean the data first."),
            MenuChoice::Visualize => Some("Please load, clean, and analyze the data first."),
        };
        if let Some(message) = guidance.filter(|_| data.is_empty()) {
            writeln!(self.output, "{message}")?;
            return Ok(data);
        }

        match choice {
            MenuChoice::Load => self.load(),
            MenuChoice::Clean => self.clean(data),
            MenuChoice::Analyze => self.analyze(data),
            MenuChoice::Visualize => {
                self.visualize(&data)?;
                Ok(data)
            }
            MenuChoice::Exit => Ok(data),
        }
    }

    /// Ask for a CSV file and a numeric column until both are valid
    pub fn load(&mut self) -> Result<Dataset, Error> {
        let table = loop {
            let path = self.prompt(PATH_PROMPT)?;
            match Table::read(path.trim()) {
                Ok(table) => break table,
                Err(Error::FileNotFound(path)) => {
                    log::debug!("no such file: {}", path.display());
                    writeln!(self.output, "File not found. Please enter a valid file path.")?;
                }
                Err(e) if e.is_recoverable() => {
                    log::debug!("{e}");
                    writeln!(self.output, "{e}. Please enter a valid file path.")?;
                }
                Err(e) => return Err(e),
            }
        };

        writeln!(self.output, "Columns in the CSV file:")?;
        for (idx, name) in table.headers.iter().enumerate() {
            writeln!(self.output, "{}. {}", idx + 1, name)?;
        }

        let column = loop {
            let answer = self.prompt(COLUMN_PROMPT)?;
            match table.parse_choice(&answer).and_then(|idx| table.column(idx)) {
                Ok(column) => break column,
                Err(e @ (Error::ColumnOutOfRange { .. } | Error::NotAColumnNumber(_))) => {
                    log::debug!("{e}");
                    writeln!(self.output, "Invalid column number. Please choose a valid column.")?;
                }
                Err(e @ Error::NonNumericColumn { .. }) => {
                    log::debug!("{e}");
                    writeln!(self.output, "Chosen column must contain numerical data.")?;
                }
                Err(e) => return Err(e),
            }
        };

        log::info!("loaded column with {} values", column.len());
        writeln!(self.output, "Data loaded successfully.")?;
        Ok(Dataset::Raw(column))
    }

    /// Fill blank cells with the statistic the user picks
    pub fn clean(&mut self, data: Dataset) -> Result<Dataset, Error> {
        let answer = self.prompt(MODE_PROMPT)?;
        let mode = match answer.parse::<ReplacementMode>() {
            Ok(mode) => mode,
            Err(unknown) => {
                log::debug!("unknown replacement mode '{unknown}'");
                writeln!(self.output, "Invalid choice. Using default value (min).")?;
                ReplacementMode::default()
            }
        };

        match clean_column(&data.to_text(), mode) {
            Ok(cleaned) => {
                log::info!(
                    "cleaned {} values, replacement {}",
                    cleaned.values.len(),
                    cleaned.replacement
                );
                writeln!(self.output, "Data cleaned and prepared successfully.")?;
                Ok(Dataset::Numeric(cleaned.values))
            }
            Err(e) => {
                writeln!(self.output, "Error during data cleaning: {e}")?;
                Ok(data)
            }
        }
    }

    /// Sort the data in the order the user picks; bad input leaves it untouched
    pub fn analyze(&mut self, data: Dataset) -> Result<Dataset, Error> {
        let answer = self.prompt(ORDER_PROMPT)?;
        let sorted = answer.parse::<SortOrder>().and_then(|order| {
            let mut values = data.to_numbers()?;
            log::debug!("sorting {} values {order}", values.len());
            insertion_sort(&mut values, order);
            Ok(values)
        });

        match sorted {
            Ok(values) => {
                writeln!(self.output, "Data analyzed successfully.")?;
                Ok(Dataset::Numeric(values))
            }
            Err(e) => {
                writeln!(self.output, "Error during data analysis: {e}")?;
                Ok(data)
            }
        }
    }

    /// Print one bar per value
    pub fn visualize(&mut self, data: &Dataset) -> Result<(), Error> {
        writeln!(self.output, "Visualizing the data:")?;
        let rendered = match data {
            Dataset::Empty => Ok(0),
            Dataset::Raw(cells) => render_bars(cells, &self.scale, &mut self.output),
            Dataset::Numeric(values) => render_bars(values, &self.scale, &mut self.output),
        };

        match rendered {
            Ok(lines) => {
                log::debug!("rendered {lines} bars");
                Ok(())
            }
            Err(e) if e.is_recoverable() => {
                writeln!(self.output, "Error during data visualization: {e}")?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn print_menu(&mut self) -> Result<(), Error> {
        writeln!(self.output, "Welcome to the CLI Data Analysis Tool")?;
        writeln!(self.output, "1. Load Data")?;
        writeln!(self.output, "2. Clean and Prepare Data")?;
        writeln!(self.output, "3. Analyze Data")?;
        writeln!(self.output, "4. Visualize Data")?;
        writeln!(self.output, "5. Exit")?;
        Ok(())
    }

    /// Print `message` and read one line, without its line ending
    ///
    /// Bytes that are not UTF-8 are replaced rather than failing the read, so
    /// a garbled answer is rejected by whichever stage asked for it.
    fn prompt(&mut self, message: &str) -> Result<String, Error> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Err(Error::InputClosed);
        }
        let mut line = String::from_utf8_lossy(&bytes).into_owned();
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(input: &str) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            BarScale::default(),
        )
    }

    fn output(session: Session<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    fn raw(cells: &[&str]) -> Dataset {
        Dataset::Raw(cells.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!("1".parse::<MenuChoice>(), Ok(MenuChoice::Load));
        assert_eq!("4".parse::<MenuChoice>(), Ok(MenuChoice::Visualize));
        assert_eq!("5".parse::<MenuChoice>(), Ok(MenuChoice::Exit));
        assert!("6".parse::<MenuChoice>().is_err());
        assert!(" 1".parse::<MenuChoice>().is_err());
    }

    #[test]
    fn test_dataset_conversions() {
        let data = raw(&["1", "", "3"]);
        assert_eq!(data.len(), 3);
        assert!(matches!(data.to_numbers(), Err(Error::MissingValues)));
        assert_eq!(raw(&["2.5", "-1"]).to_numbers().unwrap(), vec![2.5, -1.0]);

        let numeric = Dataset::Numeric(vec![10.0, 0.5]);
        assert_eq!(numeric.to_text(), vec!["10", "0.5"]);
        assert!(Dataset::Empty.is_empty());
        assert!(Dataset::Raw(Vec::new()).is_empty());
    }

    #[test]
    fn test_clean_with_avg() {
        let mut s = session("avg\n");
        let data = s.clean(raw(&["2", "", "4"])).unwrap();

        assert_eq!(data, Dataset::Numeric(vec![2.0, 3.0, 4.0]));
        assert!(output(s).contains("Data cleaned and prepared successfully."));
    }

    #[test]
    fn test_clean_unknown_mode_defaults_to_min() {
        let mut s = session("median\n");
        let data = s.clean(raw(&["7", "", "9"])).unwrap();

        assert_eq!(data, Dataset::Numeric(vec![7.0, 7.0, 9.0]));
        assert!(output(s).contains("Invalid choice. Using default value (min)."));
    }

    #[test]
    fn test_analyze_sorts() {
        let mut s = session("descending\n");
        let data = s.analyze(Dataset::Numeric(vec![1.0, 3.0, 2.0])).unwrap();
        assert_eq!(data, Dataset::Numeric(vec![3.0, 2.0, 1.0]));
    }

    #[test]
    fn test_analyze_invalid_order_keeps_data() {
        let mut s = session("upwards\n");
        let before = Dataset::Numeric(vec![3.0, 1.0]);
        let data = s.analyze(before.clone()).unwrap();

        assert_eq!(data, before);
        assert!(output(s).contains("Error during data analysis: Invalid sorting order 'upwards'"));
    }

    #[test]
    fn test_analyze_raw_with_blanks_keeps_data() {
        let mut s = session("ascending\n");
        let before = raw(&["3", ""]);
        let data = s.analyze(before.clone()).unwrap();

        assert_eq!(data, before);
        assert!(output(s).contains("clean it first"));
    }

    #[test]
    fn test_visualize_raw_blank_reports_error() {
        let mut s = session("");
        s.visualize(&raw(&["37.5", "", "200"])).unwrap();

        let out = output(s);
        assert!(out.starts_with("Visualizing the data:\n*******\n"));
        assert!(out.contains("Error during data visualization:"));
        assert!(!out.contains(&"*".repeat(20)));
    }

    #[test]
    fn test_dispatch_requires_data() {
        let mut s = session("");
        let data = s.dispatch(MenuChoice::Visualize, Dataset::Empty).unwrap();

        assert_eq!(data, Dataset::Empty);
        assert_eq!(output(s), "Please load, clean, and analyze the data first.\n");
    }

    #[test]
    fn test_prompt_closed_input() {
        let mut s = session("");
        assert!(matches!(s.prompt("? "), Err(Error::InputClosed)));
    }

    #[test]
    fn test_prompt_strips_line_ending() {
        let mut s = session("avg\r\nmax");
        assert_eq!(s.prompt("? ").unwrap(), "avg");
        assert_eq!(s.prompt("? ").unwrap(), "max");
    }

    #[test]
    fn test_invalid_utf8_answer_is_rejected_not_fatal() {
        let mut s = Session::new(
            Cursor::new(b"\xff\xfe\n2\n".to_vec()),
            Vec::new(),
            BarScale::default(),
        );
        s.run().unwrap();

        let out = output(s);
        assert!(out.contains("Invalid choice. Please enter a valid option."));
        assert!(out.contains("Please load the data first."));
    }
}
