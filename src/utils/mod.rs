pub(crate) mod date;
pub(crate) mod logging;

pub(crate) use date::canonical_date_arg;
pub(crate) use logging::init_logging;
