use log::LevelFilter;

/// Installs the logger on first use and sets the maximum level
pub fn apply(level: LevelFilter) {
    if env_logger::Builder::new()
        .filter_level(LevelFilter::Trace)
        .format_timestamp(None)
        .try_init()
        .is_err()
    {
        log::trace!("Logger already installed");
    }
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn apply_twice() {
        apply(LevelFilter::Debug);
        assert_eq!(LevelFilter::Debug, log::max_level());

        apply(LevelFilter::Error);
        assert_eq!(LevelFilter::Error, log::max_level());
    }
}
