use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Level
///

#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug, // least severe
    Info,
    Ok,
    Warn,
    Error, // most severe
}

impl Level {
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Debug => 0,
            Self::Info => 1,
            Self::Ok => 2,
            Self::Warn => 3,
            Self::Error => 4,
        }
    }

    /// True when a line at this level passes the configured threshold.
    /// Falls back to `Info` before the config is initialized.
    #[must_use]
    pub fn enabled(self) -> bool {
        let min = crate::config::Config::try_get().map_or(Self::Info, |cfg| cfg.log.level);

        self.rank() >= min.rank()
    }
}

/// Shorten a name to fit a fixed column, keeping both ends readable.
#[must_use]
pub fn ellipsize_middle(s: &str, max: usize, head: usize, tail: usize) -> String {
    let count = s.chars().count();
    if count <= max {
        return s.to_string();
    }

    let head_part: String = s.chars().take(head).collect();
    let tail_part: String = {
        let skip = count.saturating_sub(tail);
        s.chars().skip(skip).collect()
    };

    format!("{head_part}…{tail_part}")
}

#[macro_export]
macro_rules! log {
    // ============================================================
    // (1) topic, level, message
    //    log!("dispatch", Level::Error, "failed {}", err)
    // ============================================================
    ($topic:literal, $level:expr, $fmt:literal, $($arg:tt)*) => {{
        $crate::log!(@inner $level, Some($topic), $fmt, $($arg)*);
    }};
    ($topic:literal, $level:expr, $fmt:literal) => {{
        $crate::log!(@inner $level, Some($topic), $fmt);
    }};

    // ============================================================
    // (2) topic, message
    //    log!("resolver", "matched {}", schema)
    // ============================================================
    ($topic:literal, $fmt:literal, $($arg:tt)*) => {{
        $crate::log!(@inner $crate::log::Level::Info, Some($topic), $fmt, $($arg)*);
    }};
    ($topic:literal, $fmt:literal) => {{
        $crate::log!(@inner $crate::log::Level::Info, Some($topic), $fmt);
    }};

    // ============================================================
    // (3) level, message
    //    log!(Level::Warn, "bad input {}", id)
    // ============================================================
    ($level:expr, $fmt:literal, $($arg:tt)*) => {{
        $crate::log!(@inner $level, None, $fmt, $($arg)*);
    }};
    ($level:expr, $fmt:literal) => {{
        $crate::log!(@inner $level, None, $fmt);
    }};


    // ============================================================
    // INTERNAL IMPLEMENTATION
    // ============================================================
    (@inner $level:expr, $topic:expr, $fmt:literal $(, $($arg:tt)*)?) => {{
        let level = $level;

        if $crate::log::Level::enabled(level) {
            let topic: Option<&str> = $topic;
            let message = format!($fmt $(, $($arg)*)?);

            // Active-schema column, so interleaved lines from a multi-schema
            // run stay attributable
            let schema = $crate::connection::Connection::current();
            let schema_disp = $crate::log::ellipsize_middle(schema.as_str(), 12, 5, 5);
            let schema_centered = format!("{:^12}", schema_disp);

            // Optional topic rendering
            let final_msg = if let Some(t) = topic {
                format!("[{t}] {message}")
            } else {
                message
            };

            // ANSI color codes (Debug has no color)
            let color = match level {
                $crate::log::Level::Ok    => "\x1b[32m", // green
                $crate::log::Level::Info  => "\x1b[34m", // blue
                $crate::log::Level::Warn  => "\x1b[33m", // yellow
                $crate::log::Level::Error => "\x1b[31m", // red
                $crate::log::Level::Debug => "",         // no color
            };

            // Only apply reset if we actually colored the label
            let reset = if color.is_empty() { "" } else { "\x1b[0m" };

            // Final colored (or plain) label
            let label = format!("{color}{:^5}{reset}", level.to_string().to_uppercase());

            println!("{label}|{schema_centered}| {final_msg}");
        }
    }};
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_order_by_severity() {
        assert!(Level::Debug.rank() < Level::Info.rank());
        assert!(Level::Info.rank() < Level::Ok.rank());
        assert!(Level::Ok.rank() < Level::Warn.rank());
        assert!(Level::Warn.rank() < Level::Error.rank());
    }

    #[test]
    fn ellipsize_keeps_short_names_intact() {
        assert_eq!(ellipsize_middle("public", 12, 5, 5), "public");
        assert_eq!(ellipsize_middle("tenant_a", 12, 5, 5), "tenant_a");
    }

    #[test]
    fn ellipsize_shortens_long_names_from_the_middle() {
        let shortened = ellipsize_middle("really_long_tenant_schema", 12, 5, 5);

        assert_eq!(shortened, "reall…chema");
        assert!(shortened.chars().count() <= 12);
    }

    #[test]
    fn level_parses_from_lowercase_config_values() {
        assert_eq!(parse_level("warn"), Level::Warn);
        assert_eq!(parse_level("debug"), Level::Debug);
    }

    fn parse_level(raw: &str) -> Level {
        #[derive(serde::Deserialize)]
        struct Doc {
            level: Level,
        }

        let doc: Doc = toml::from_str(&format!("level = \"{raw}\"")).unwrap();
        doc.level
    }
}
