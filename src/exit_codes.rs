//! Exit code constants for the cmdcap CLI.
//!
//! When a command completes, cmdcap exits with the command's own status.
//! Otherwise:
//! - 1: User error (bad args, bad config)
//! - 124: The command timed out and was killed
//! - 125: The command could not be started or talked to

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or an invalid config file.
pub const USER_ERROR: i32 = 1;

/// The command ran past its timeout and was killed.
pub const TIMED_OUT: i32 = 124;

/// The command could not be started, waited on, or read from.
pub const RUN_FAILURE: i32 = 125;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, TIMED_OUT, RUN_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_fit_in_a_byte() {
        for code in [SUCCESS, USER_ERROR, TIMED_OUT, RUN_FAILURE] {
            assert!(u8::try_from(code).is_ok());
        }
    }
}
