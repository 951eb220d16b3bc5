//! Interactive collection of a search request.
//!
//! Reads answers line by line and re-asks until each one is valid for the
//! network at hand.

use std::io::{self, BufRead, Write};

use crate::domain::{LineId, SearchState, StationId};
use crate::network::Network;
use crate::planner::SearchRequest;

/// Error from the interactive prompt.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// Input ended before every question was answered
    #[error("input ended before the request was complete")]
    Eof,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Question-and-answer session over any reader and writer.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and read one trimmed line.
    fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        write!(self.output, "{question}: ")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(PromptError::Eof);
        }
        Ok(answer.trim().to_string())
    }

    fn complain(&mut self, message: impl std::fmt::Display) -> Result<(), PromptError> {
        writeln!(self.output, "  {message}")?;
        Ok(())
    }

    /// Ask for a station until the answer names one in the network.
    pub fn station(&mut self, network: &Network, question: &str) -> Result<StationId, PromptError> {
        loop {
            let answer = self.ask(question)?;
            let checked = StationId::parse(&answer)
                .map_err(|e| e.to_string())
                .and_then(|s| network.check_station(s.get()).map_err(|e| e.to_string()));
            match checked {
                Ok(station) => return Ok(station),
                Err(message) => self.complain(message)?,
            }
        }
    }

    /// Ask for a line serving `station`.
    pub fn line(
        &mut self,
        network: &Network,
        station: StationId,
        question: &str,
    ) -> Result<LineId, PromptError> {
        loop {
            if let Some(line) = self.choose_line(network, station, question, false)? {
                return Ok(line);
            }
        }
    }

    /// Like [`line`](Self::line), but an empty answer means "no preference".
    pub fn optional_line(
        &mut self,
        network: &Network,
        station: StationId,
        question: &str,
    ) -> Result<Option<LineId>, PromptError> {
        self.choose_line(network, station, question, true)
    }

    fn choose_line(
        &mut self,
        network: &Network,
        station: StationId,
        question: &str,
        optional: bool,
    ) -> Result<Option<LineId>, PromptError> {
        let choices = network
            .lines_of(station)
            .iter()
            .map(|&line| network.line_name(line))
            .collect::<Vec<_>>()
            .join(", ");
        let question = format!("{question} ({choices})");

        loop {
            let answer = self.ask(&question)?;
            if answer.is_empty() && optional {
                return Ok(None);
            }
            match network.line_by_name(&answer) {
                Some(line) if network.serves(station, line) => return Ok(Some(line)),
                Some(_) => self.complain(format_args!("line {answer} does not serve {station}"))?,
                None => self.complain(format_args!("unknown line {answer:?}"))?,
            }
        }
    }

    /// Ask for start station and line, destination station and an optional
    /// destination line.
    pub fn request(&mut self, network: &Network) -> Result<SearchRequest, PromptError> {
        let start = self.station(network, "Enter start station number")?;
        let start_line = self.line(network, start, "Enter start station line")?;
        let goal = self.station(network, "Enter destination station number")?;
        let goal_line =
            self.optional_line(network, goal, "Enter destination station line (optional)")?;

        let mut request = SearchRequest::new(SearchState::new(start, start_line), goal);
        if let Some(line) = goal_line {
            request = request.with_goal_line(line);
        }
        Ok(request)
    }

    /// Give back the writer, e.g. to inspect what was printed.
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::network::reference_network;

    fn prompt(input: &str) -> Prompt<Cursor<Vec<u8>>, Vec<u8>> {
        Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn reads_full_request() {
        let net = reference_network().unwrap();
        let mut p = prompt("1\nblue\n14\ngreen\n");

        let req = p.request(&net).unwrap();
        assert_eq!(req.start.station.get(), 1);
        assert_eq!(req.start.line, net.line_by_name("blue").unwrap());
        assert_eq!(req.goal.get(), 14);
        assert_eq!(req.goal_line, net.line_by_name("green"));
    }

    #[test]
    fn destination_line_optional() {
        let net = reference_network().unwrap();
        let mut p = prompt("E6\n blue \n11\n\n");

        let req = p.request(&net).unwrap();
        assert_eq!(req.start.station.get(), 6);
        assert_eq!(req.goal.get(), 11);
        assert_eq!(req.goal_line, None);
    }

    #[test]
    fn reasks_on_invalid_answers() {
        let net = reference_network().unwrap();
        let mut p = prompt("abc\n15\n0\n2\npurple\nred\n\nyellow\n4\n\n");

        let req = p.request(&net).unwrap();
        assert_eq!(req.start.station.get(), 2);
        assert_eq!(req.start.line, net.line_by_name("yellow").unwrap());
        assert_eq!(req.goal.get(), 4);

        let printed = String::from_utf8(p.into_output()).unwrap();
        assert!(printed.contains("invalid station \"abc\": must be a station number"));
        assert!(printed.contains("station 15 is outside the network (1..=14)"));
        assert!(printed.contains("station numbers start at 1"));
        assert!(printed.contains("unknown line \"purple\""));
        assert!(printed.contains("line red does not serve E2"));
        assert!(printed.contains("Enter start station line (blue, yellow): "));
    }

    #[test]
    fn eof_is_reported() {
        let net = reference_network().unwrap();
        let mut p = prompt("1\nblue\n");
        assert!(matches!(p.request(&net), Err(PromptError::Eof)));

        let mut p = prompt("");
        assert!(matches!(
            p.station(&net, "Station"),
            Err(PromptError::Eof)
        ));
    }
}
