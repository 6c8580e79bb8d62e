//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
pub fn init() {
    env_logger::init();
}

/// Initialize logging if nothing else has yet
///
/// Returns `false` when a logger was already installed, which is the normal
/// case when several tests share one process.
pub fn try_init() -> bool {
    env_logger::builder().is_test(cfg!(test)).try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_init_installs_once() {
        try_init();
        assert!(!try_init());
    }
}
