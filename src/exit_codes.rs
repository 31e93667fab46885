//! Process exit codes used by the `rnlint` binary.

/// No violations found (or everything was fixed in `fmt` mode)
pub const SUCCESS: i32 = 0;

/// At least one violation remains
pub const VIOLATIONS_FOUND: i32 = 1;

/// Invalid configuration, unreadable input or any other failure of the tool itself
pub const TOOL_ERROR: i32 = 2;

pub mod exit {
    use super::{SUCCESS, TOOL_ERROR, VIOLATIONS_FOUND};

    pub fn success() -> ! {
        std::process::exit(SUCCESS)
    }

    pub fn violations_found() -> ! {
        std::process::exit(VIOLATIONS_FOUND)
    }

    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR)
    }
}
