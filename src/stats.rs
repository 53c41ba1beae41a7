//! Operation counters and trace gates shared by every cursor structure.

/// Read-only operation statistics.
///
/// `deletes` is reserved: neither structure implements removal, so it stays
/// zero, but it is reported so callers see a stable set of counters.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    pub searches: u64,
    pub matches: u64,
    pub navigations: u64,
    pub adds: u64,
    pub deletes: u64,
}

/// Per-category gates for diagnostic events.
///
/// All off by default — navigation tracing in particular floods the log.
/// These only control event emission; they never affect structure behavior.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceOptions {
    pub adds: bool,
    pub searches: bool,
    pub navigation: bool,
}
