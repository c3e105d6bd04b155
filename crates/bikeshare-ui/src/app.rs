//! Interactive session loop.
//!
//! [`App`] repeats filter selection, analysis and raw data browsing until
//! the user cancels a selection or declines to restart.

use std::io::{self, BufRead, Write};

use bikeshare_core::formatting::{format_elapsed, rule};
use bikeshare_runtime::orchestrator::CycleOrchestrator;

use crate::browser::browse_raw_data;
use crate::console::Console;
use crate::filter_selector::select_filters;
use crate::report::render_report;

pub const CANCEL_MESSAGE: &str = "*> The application is stopped upon user request.";
pub const RESTART_PROMPT: &str = "*> Would you like to restart? (yes/no) : ";
pub const FAREWELL: &str = "*> Goodbye!";

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    orchestrator: CycleOrchestrator,
    page_size: usize,
}

impl App {
    pub fn new(orchestrator: CycleOrchestrator, page_size: usize) -> Self {
        Self {
            orchestrator,
            page_size,
        }
    }

    /// Run the session until the user stops it.
    ///
    /// Returns the number of analysis cycles that produced a report. Load
    /// failures are reported on the console and never end the session.
    pub fn run<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> io::Result<usize> {
        let mut completed = 0;

        loop {
            let Some(filter) = select_filters(console)? else {
                console.say(CANCEL_MESSAGE)?;
                break;
            };

            match self.orchestrator.run_cycle(filter) {
                Ok(cycle) => {
                    console.say(&format!(
                        "*> Data loaded in {} seconds.",
                        format_elapsed(cycle.load_time)
                    ))?;
                    render_report(console.output(), &cycle.analysis)?;
                    browse_raw_data(console, &cycle.table, self.page_size)?;
                    console.say(&rule())?;
                    completed += 1;
                }
                Err(e) => console.error(&e)?,
            }

            if !console.read_yes_no(RESTART_PROMPT)? {
                break;
            }
        }

        console.say(FAREWELL)?;
        tracing::info!(cycles = completed, "session ended");
        Ok(completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::models::City;
    use bikeshare_runtime::data_manager::DataManager;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::TempDir;

    const WASHINGTON: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-01-02 08:00:00,2017-01-02 08:05:00,300,A,B,Subscriber
2017-01-03 09:00:00,2017-01-03 09:05:00,600,A,C,Customer
2017-02-06 10:00:00,2017-02-06 10:05:00,,B,A,Subscriber
";

    fn app(dir: &Path) -> App {
        App::new(CycleOrchestrator::new(DataManager::new(dir)), 5)
    }

    fn session(dir: &Path, input: &str) -> (usize, String) {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let cycles = app(dir).run(&mut console).unwrap();
        (cycles, String::from_utf8(console.into_output()).unwrap())
    }

    fn data_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(City::Washington.file_name()), WASHINGTON).unwrap();
        dir
    }

    #[test]
    fn test_cancel_stops_immediately() {
        let dir = data_dir();
        let (cycles, out) = session(dir.path(), "0\n");
        assert_eq!(cycles, 0);
        assert!(out.contains(CANCEL_MESSAGE));
        assert!(!out.contains(RESTART_PROMPT));
        assert!(out.trim_end().ends_with(FAREWELL));
    }

    #[test]
    fn test_single_cycle_then_decline_restart() {
        let dir = data_dir();
        let (cycles, out) = session(dir.path(), "3\n7\n8\nno\nno\n");
        assert_eq!(cycles, 1);
        assert!(out.contains("*> 3 trips match the selected filters"));
        assert!(out.contains("**> Most commonly used start station is \"A\" with 2 travels"));
        assert!(out.contains("**> ERROR : Field \"Gender\" is not available in this dataset"));
        assert!(out.contains("Do you want to see the 5 lines of raw data?"));
        assert_eq!(out.matches(RESTART_PROMPT).count(), 1);
        assert!(!out.contains(CANCEL_MESSAGE));
    }

    #[test]
    fn test_restart_runs_another_cycle() {
        let dir = data_dir();
        let (cycles, out) = session(dir.path(), "3\n1\n8\nno\nyes\n3\n2\n1\nyes\nno\n");
        assert_eq!(cycles, 2);
        assert!(out.contains("*> 2 trips match the selected filters"));
        assert!(out.contains("*> 1 trips match the selected filters"));
        assert!(out.contains("2017-02-06 10:00:00"));
        assert_eq!(out.matches(RESTART_PROMPT).count(), 2);
    }

    #[test]
    fn test_missing_station_column_fails_only_station_section() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(City::Washington.file_name()),
            "Start Time,Trip Duration,Start Station,User Type\n\
             2017-01-02 08:00:00,300,A,Subscriber\n",
        )
        .unwrap();

        let (cycles, out) = session(dir.path(), "3\n7\n8\nno\nno\n");
        assert_eq!(cycles, 1);
        assert!(!out.contains("Failed to load"));
        assert!(out.contains("**> Most common month is \"january\" with 1 travels"));
        assert!(out.contains("**> ERROR : Field \"End Station\" is not available in this dataset"));
        assert!(out.contains("**> Total travel time is 5 hours and 0 minutes"));
        assert!(out.contains("**> Total travels of user type \"Subscriber\" is 1"));
    }

    #[test]
    fn test_load_failure_goes_to_restart_question() {
        let dir = data_dir();
        let (cycles, out) = session(dir.path(), "1\n7\n8\nno\n");
        assert_eq!(cycles, 0);
        assert!(out.contains("*> ERROR : Failed to load"));
        assert!(!out.contains("Calculating"));
        assert!(!out.contains("raw data"));
        assert_eq!(out.matches(RESTART_PROMPT).count(), 1);
    }

    #[test]
    fn test_undecodable_input_is_not_fatal() {
        let dir = data_dir();
        let mut console = Console::new(Cursor::new(b"\xff\xfe\n0\n".to_vec()), Vec::new());
        let cycles = app(dir.path()).run(&mut console).unwrap();
        let out = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(cycles, 0);
        assert!(out.contains("*> ERROR : The code has to be a numeric value"));
        assert!(out.contains(CANCEL_MESSAGE));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let dir = data_dir();
        let (cycles, out) = session(dir.path(), "3\n7\n8\n");
        assert_eq!(cycles, 1);
        assert!(out.trim_end().ends_with(FAREWELL));
    }
}
