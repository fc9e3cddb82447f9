//! Library side of the `series-results` binary: CSV input, export and logging.

pub mod io;
pub mod logging;
