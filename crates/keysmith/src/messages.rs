//! Status messages written to stderr.
use colored::Colorize;

/// Print a success message.
pub fn success(message: impl AsRef<str>) {
    eprintln!("{} {}", "ok".green().bold(), message.as_ref());
}

/// Print a warning message.
pub fn warn(message: impl AsRef<str>) {
    eprintln!("{} {}", "warning".yellow().bold(), message.as_ref());
}

/// Print a failure message and exit.
pub fn fail(message: impl AsRef<str>) -> ! {
    eprintln!("{} {}", "error".red().bold(), message.as_ref());
    std::process::exit(1);
}
