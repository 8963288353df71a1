//! Constants shared by the git facade and configuration defaults.

/// Platform-specific Git executable name
#[cfg(windows)]
pub const GIT_EXECUTABLE: &str = "git.exe";

/// Platform-specific Git executable name
#[cfg(not(windows))]
pub const GIT_EXECUTABLE: &str = "git";

/// `for-each-ref` format producing one `name|author|date|subject` record per
/// local branch.
pub const BRANCH_RECORD_FORMAT: &str = "--format=%(refname:short)|%(authorname)|%(committerdate:iso8601)|%(subject)";

/// Separator between the fields of a branch record.
pub const RECORD_SEPARATOR: char = '|';

/// Number of fields in a complete branch record.
pub const RECORD_FIELDS: usize = 4;

/// Layout of `%(committerdate:iso8601)`, e.g. `2024-03-01 14:22:05 +0100`.
pub const COMMIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Remote whose `HEAD` pointer names the default branch.
pub const DEFAULT_REMOTE: &str = "origin";

/// Local branch names tried, in order, when the remote pointer is unusable.
pub const DEFAULT_FALLBACK_BRANCHES: [&str; 2] = ["main", "master"];

/// Main branch name used when nothing else resolves.
pub const DEFAULT_MAIN_BRANCH: &str = "main";

/// Rows skipped by page-up/page-down navigation.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Name of the optional configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
