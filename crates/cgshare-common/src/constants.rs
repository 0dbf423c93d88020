//! System-wide constants and default paths.

/// Cgroup v1 CPU controller mount point.
pub const CGROUP_V1_CPU_PATH: &str = "/sys/fs/cgroup/cpu/";

/// Total CPU share pool considered "not overcommitted".
pub const DEFAULT_VIRTUAL_CAPACITY: u64 = 2000;

/// Requested shares at or below this value mark a consumer as elastic.
pub const DEFAULT_ELASTIC_THRESHOLD: u64 = 50;

/// Subsystem segment used in emitted `set_limit` directives.
pub const DEFAULT_SUBSYSTEM: &str = "cpu";

/// Task list pseudo-file inside a cgroup directory.
pub const TASKS_FILE: &str = "tasks";

/// CPU share weight pseudo-file inside a cgroup directory.
pub const CPU_SHARES_FILE: &str = "cpu.shares";

/// Field separator of the directive line protocol.
pub const FIELD_SEPARATOR: char = ':';

/// Placeholder written into unused directive slots.
pub const UNUSED_FIELD: &str = "_";

/// Prefix of comment lines skipped by the line readers.
pub const COMMENT_PREFIX: char = '#';

/// Score emitted when aggregate demand is at or under the budget.
pub const SCORE_UNDER_BUDGET: f64 = 0.1;

/// Score emitted when aggregate demand exceeds the budget.
pub const SCORE_OVER_BUDGET: f64 = -0.1;
