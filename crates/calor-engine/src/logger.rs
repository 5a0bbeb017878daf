//! Append-only record of (time, field snapshot) pairs.

use calor_grid::ScalarField;

/// One logged snapshot.
///
/// Entries are immutable once recorded: the snapshot is an owned copy,
/// so later updates to the live field never reach it.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    time: f64,
    field: ScalarField,
}

impl LogEntry {
    /// Simulation time of the snapshot.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// The recorded field.
    pub fn field(&self) -> &ScalarField {
        &self.field
    }

    /// Split into `(time, field)`.
    pub fn into_parts(self) -> (f64, ScalarField) {
        (self.time, self.field)
    }
}

/// Time-ordered list of field snapshots.
///
/// Within one run, entries are appended in ascending time order, one
/// per step, recorded after boundary conditions were applied and before
/// the step advanced the field. A driver reused for a second run keeps
/// appending; call [`clear()`](Self::clear) in between for a fresh log.
#[derive(Clone, Debug, Default)]
pub struct Logger {
    entries: Vec<LogEntry>,
}

impl Logger {
    /// An empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty logger with room for `capacity` snapshots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append a snapshot taken at time `t`.
    pub fn log(&mut self, t: f64, field: ScalarField) {
        log::trace!("logged snapshot at t={t}");
        self.entries.push(LogEntry { time: t, field });
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `i`-th snapshot.
    pub fn get(&self, i: usize) -> Option<&LogEntry> {
        self.entries.get(i)
    }

    /// The most recent snapshot.
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// All snapshots in recording order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Iterate snapshots in recording order.
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.entries.iter()
    }

    /// Times of all snapshots in recording order.
    pub fn times(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.time).collect()
    }

    /// Drop all snapshots.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Consume the logger, returning its snapshots.
    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Logger {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
