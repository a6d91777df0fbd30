use crate::error::ReduxError;
use log::Level;

/// Print a warning through the error log sink, if one is installed.
///
/// An error carrying the same message is then built and dropped on the spot,
/// so a debugger breaking on error construction pauses here. It never reaches
/// the caller.
pub fn warning(message: &str) {
    if log::log_enabled!(Level::Error) {
        log::error!("{}", message);
    }

    let discarded = ReduxError::Warning(message.to_string());
    drop(discarded);
}
