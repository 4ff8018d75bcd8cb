//! Tests for logging setup

#[cfg(test)]
mod tests {
    use rollpage::io::configuration::DEFAULT_LOG_FILTER;
    use rollpage::io::logging::{default_directive, init_logging};

    // Quiet wins over verbose
    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false, false), DEFAULT_LOG_FILTER);
        assert_eq!(default_directive(true, false), "rollpage=debug");
        assert_eq!(default_directive(false, true), "rollpage=error");
        assert_eq!(default_directive(true, true), "rollpage=error");
    }

    // Only one global subscriber can be installed
    #[test]
    fn test_second_init_is_refused() {
        let _first = init_logging(false, true);
        assert!(!init_logging(false, true));
    }
}
