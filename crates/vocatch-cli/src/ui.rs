// User-facing output. Results go to stdout, notes and problems to stderr.

#[macro_export]
macro_rules! ui_ok {
    ($($arg:tt)*) => {{
        if $crate::ui::color_enabled() {
            use owo_colors::OwoColorize;
            println!("{} {}", "✔".green(), format!($($arg)*));
        } else {
            println!("✔ {}", format!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! ui_info {
    ($($arg:tt)*) => {{
        eprintln!("ℹ {}", format!($($arg)*));
    }};
}

#[macro_export]
macro_rules! ui_warn {
    ($($arg:tt)*) => {{
        if $crate::ui::color_enabled() {
            use owo_colors::OwoColorize;
            eprintln!("{} {}", "⚠".yellow(), format!($($arg)*));
        } else {
            eprintln!("⚠ {}", format!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! ui_err {
    ($($arg:tt)*) => {{
        if $crate::ui::color_enabled() {
            use owo_colors::OwoColorize;
            eprintln!("{} {}", "✖".red(), format!($($arg)*));
        } else {
            eprintln!("✖ {}", format!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! ui_out {
    ($($arg:tt)*) => {{
        println!($($arg)*);
    }};
}

use std::sync::atomic::{AtomicBool, Ordering};

static COLOR: AtomicBool = AtomicBool::new(false);

pub fn set_color(enabled: bool) {
    COLOR.store(enabled, Ordering::Relaxed);
}

pub fn color_enabled() -> bool {
    COLOR.load(Ordering::Relaxed)
}
