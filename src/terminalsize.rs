// Terminal size detection for flagfetch.

use std::io::stdout;
use std::os::unix::io::AsRawFd;

pub const DEFAULT_SIZE: (u16, u16) = (80, 24);

// Get the terminal size as, columns and rows
// Returns None if the terminal size cannot be determined.
pub fn get_terminal_size() -> Option<(u16, u16)> {
    let mut ws = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let fd = stdout().as_raw_fd();

    // SAFETY: TIOCGWINSZ only writes into the winsize we hand it
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws) };
    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        return Some((ws.ws_col, ws.ws_row));
    }

    // Fallback to environment variables
    get_size_from_env()
}

fn get_size_from_env() -> Option<(u16, u16)> {
    let cols = std::env::var("COLUMNS").ok()?.parse().ok()?;
    let rows = std::env::var("LINES").ok()?.parse().ok()?;
    Some((cols, rows))
}

// Terminal width in columns, 80 when it can't be found out
pub fn terminal_width() -> usize {
    get_terminal_size().unwrap_or(DEFAULT_SIZE).0 as usize
}
