pub(crate) mod date;
pub(crate) mod duration;
pub(crate) mod logging;
pub(crate) mod timezone;

pub(crate) use date::{parse_export_timestamp, week_start};
pub(crate) use duration::{format_hm, format_short, parse_duration, parse_hms};
pub(crate) use logging::init_logging;
pub(crate) use timezone::Timezone;
