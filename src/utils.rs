use crate::error::{Error, Result};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Extracts the puzzle strings from the contents of a puzzle file.
///
/// Each non-empty line holds one puzzle. Surrounding whitespace is trimmed and lines
/// starting with `#` are treated as comments. The strings are not validated here, so a
/// malformed line can be reported on its own without aborting the rest of the batch.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::utils::parse_puzzle_lines;
///
/// let content = "142506378\n\n  # warm-up\n012345678\r\n";
/// assert_eq!(parse_puzzle_lines(content), vec!["142506378", "012345678"]);
/// ```
pub fn parse_puzzle_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Reads a puzzle file and returns its puzzle strings, one per line.
///
/// # Returns
/// * `Ok(Vec<String>)` with the lines kept by `parse_puzzle_lines`.
/// * `Err(Error::Io)` if the file cannot be read.
pub fn read_puzzle_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        operation: format!("read puzzle file '{}'", path.display()),
        source,
    })?;
    Ok(parse_puzzle_lines(&content)
        .into_iter()
        .map(str::to_string)
        .collect())
}

/// Running totals over a batch of puzzles.
///
/// Averages are taken over solved puzzles only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchSummary {
    pub puzzles: usize,
    pub solved: usize,
    pub total_moves: u64,
    pub total_tested: u64,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a puzzle solved in `num_moves` moves after testing `num_tested` states.
    pub fn record_solved(&mut self, num_moves: u32, num_tested: u64) {
        self.puzzles += 1;
        self.solved += 1;
        self.total_moves += u64::from(num_moves);
        self.total_tested += num_tested;
    }

    /// Records a puzzle that was not solved: exhausted, cancelled, or invalid.
    pub fn record_unsolved(&mut self) {
        self.puzzles += 1;
    }

    pub fn average_moves(&self) -> Option<f64> {
        (self.solved > 0).then(|| self.total_moves as f64 / self.solved as f64)
    }

    pub fn average_tested(&self) -> Option<f64> {
        (self.solved > 0).then(|| self.total_tested as f64 / self.solved as f64)
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "solved {} puzzles", self.solved)?;
        if let (Some(moves), Some(tested)) = (self.average_moves(), self.average_tested()) {
            write!(f, "\naverage: {:.2} moves, {:.2} states tested", moves, tested)?;
        }
        Ok(())
    }
}

/// Raises a cancellation flag once a time limit has passed.
///
/// The flag is meant to be passed to `Searcher::find_solution`. Dropping the watchdog
/// before the limit stops its thread without raising the flag.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::utils::Watchdog;
/// use std::time::Duration;
///
/// let watchdog = Watchdog::start(Duration::from_secs(60));
/// assert!(!watchdog.fired());
/// drop(watchdog); // returns promptly
/// ```
#[derive(Debug)]
pub struct Watchdog {
    flag: Arc<AtomicBool>,
    expired: Arc<AtomicBool>,
    disarm: Option<mpsc::Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl Watchdog {
    /// Starts a watchdog with a flag of its own.
    pub fn start(limit: Duration) -> Self {
        Self::sharing(Arc::new(AtomicBool::new(false)), limit)
    }

    /// Starts a watchdog that raises `flag` when `limit` passes.
    ///
    /// Lets a time limit and an `Interrupt` cancel the same search.
    pub fn sharing(flag: Arc<AtomicBool>, limit: Duration) -> Self {
        let expired = Arc::new(AtomicBool::new(false));
        let flag_for_thread = Arc::clone(&flag);
        let expired_for_thread = Arc::clone(&expired);
        let (tx, rx) = mpsc::channel::<()>();
        let join = thread::spawn(move || {
            if let Err(mpsc::RecvTimeoutError::Timeout) = rx.recv_timeout(limit) {
                expired_for_thread.store(true, Ordering::Relaxed);
                flag_for_thread.store(true, Ordering::Relaxed);
            }
        });
        Watchdog {
            flag,
            expired,
            disarm: Some(tx),
            join: Some(join),
        }
    }

    /// Returns the flag to hand to the search loop.
    pub fn flag(&self) -> &AtomicBool {
        self.flag.as_ref()
    }

    /// Returns `true` once the time limit has passed. A shared flag raised by someone
    /// else does not count.
    pub fn fired(&self) -> bool {
        self.expired.load(Ordering::Relaxed)
    }
}

impl Drop for Watchdog {
    fn drop(&mut self) {
        // Closing the channel wakes the thread before its timeout.
        self.disarm.take();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Cancellation flag raised by Ctrl-C.
///
/// While installed, SIGINT no longer kills the process: it raises the flag, so the
/// running search stops with `SearchOutcome::Cancelled` and its statistics can still
/// be reported. Call `reset` before each search.
#[derive(Clone, Debug, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    /// Installs the process-wide Ctrl-C handler.
    ///
    /// # Returns
    /// * `Err(Error::Signal)` if the handler cannot be set, for example because one is
    ///   already installed.
    pub fn install() -> Result<Self> {
        let interrupt = Interrupt::default();
        let flag = Arc::clone(&interrupt.flag);
        ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
            .map_err(|source| Error::Signal { source })?;
        Ok(interrupt)
    }

    /// Lowers the flag, typically before starting the next search.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }

    /// Raises the flag as if Ctrl-C had been pressed.
    pub fn raise(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_raised(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub fn flag(&self) -> &AtomicBool {
        self.flag.as_ref()
    }

    /// Returns a shared handle to the flag, for a `Watchdog` to raise as well.
    pub fn shared_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}
