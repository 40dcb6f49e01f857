//! Terminal styling
//!
//! Semantic styles via the [`Stylize`] trait. Color support detection is
//! delegated to `owo-colors` (`NO_COLOR`, `CLICOLOR`, `CLICOLOR_FORCE`, TTY).
//!
//! | Method        | Color  | Stream | Used for                        |
//! |---------------|--------|--------|---------------------------------|
//! | `.accent()`   | Cyan   | stdout | PR numbers, app names, counts   |
//! | `.success()`  | Green  | stdout | merged, labeled, healthy        |
//! | `.error()`    | Red    | stderr | failures                        |
//! | `.warn()`     | Yellow | stderr | do-not-touch, pending, timeouts |
//! | `.muted()`    | Dim    | stdout | timestamps, hints               |
//! | `.emphasis()` | Bold   | stdout | headers                         |

use std::fmt::{self, Display};
use std::sync::OnceLock;

use indicatif::ProgressStyle;
pub use owo_colors::Stream;
use owo_colors::{OwoColorize, Style};
use renovate_triage::types::Category;

const ACCENT: Style = Style::new().cyan();
const SUCCESS: Style = Style::new().green();
const ERROR: Style = Style::new().red();
const WARN: Style = Style::new().yellow();
const MUTED: Style = Style::new().dimmed();
const EMPHASIS: Style = Style::new().bold();

/// A value with semantic styling applied
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    style: Style,
    stream: Stream,
}

impl<T> Styled<T> {
    const fn new(value: T, style: Style, stream: Stream) -> Self {
        Self {
            value,
            style,
            stream,
        }
    }

    /// Detect color support against stdout
    #[must_use]
    pub const fn for_stdout(mut self) -> Self {
        self.stream = Stream::Stdout;
        self
    }
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.value
                .if_supports_color(self.stream, |v| v.style(self.style))
        )
    }
}

/// Extension trait for semantic terminal styling
pub trait Stylize: Display {
    /// Cyan, for primary information
    fn accent(&self) -> Styled<&Self> {
        Styled::new(self, ACCENT, Stream::Stdout)
    }

    /// Green, for completed work
    fn success(&self) -> Styled<&Self> {
        Styled::new(self, SUCCESS, Stream::Stdout)
    }

    /// Red, for failures (stderr)
    fn error(&self) -> Styled<&Self> {
        Styled::new(self, ERROR, Stream::Stderr)
    }

    /// Yellow, for things needing attention (stderr)
    fn warn(&self) -> Styled<&Self> {
        Styled::new(self, WARN, Stream::Stderr)
    }

    /// Dim, for secondary information
    fn muted(&self) -> Styled<&Self> {
        Styled::new(self, MUTED, Stream::Stdout)
    }

    /// Bold, for headers
    fn emphasis(&self) -> Styled<&Self> {
        Styled::new(self, EMPHASIS, Stream::Stdout)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Success checkmark
pub const CHECK: &str = "✓";
/// Failure cross
pub const CROSS: &str = "✗";
/// Not ready yet
pub const PENDING: &str = "⏳";
/// Column separator in the listing
pub const PIPE: &str = "│";
/// Marker for PRs already carrying the rebase label
pub const REBASE_MARKER: &str = "[R]";

/// Green checkmark
#[inline]
pub const fn check() -> Styled<&'static str> {
    Styled::new(CHECK, SUCCESS, Stream::Stdout)
}

/// Red cross (stderr)
#[inline]
pub const fn cross() -> Styled<&'static str> {
    Styled::new(CROSS, ERROR, Stream::Stderr)
}

/// Yellow hourglass on stdout
#[inline]
pub const fn pending() -> Styled<&'static str> {
    Styled::new(PENDING, WARN, Stream::Stdout)
}

/// Dimmed column separator
#[inline]
pub const fn pipe() -> Styled<&'static str> {
    Styled::new(PIPE, MUTED, Stream::Stdout)
}

/// Check or hourglass depending on readiness
pub const fn ready_icon(ready: bool) -> Styled<&'static str> {
    if ready { check() } else { pending() }
}

/// Header style for a category section
pub fn category_header(category: Category) -> String {
    let label = format!("{} ", category.as_str().to_uppercase());
    match category {
        Category::DontTouch => label.warn().for_stdout().to_string(),
        Category::Major => label.error().for_stdout().to_string(),
        _ => label.emphasis().to_string(),
    }
}

const fn to_hyperlink_stream(stream: Stream) -> supports_hyperlinks::Stream {
    match stream {
        Stream::Stdout => supports_hyperlinks::Stream::Stdout,
        Stream::Stderr => supports_hyperlinks::Stream::Stderr,
    }
}

/// Clickable OSC 8 link, or plain `text` where unsupported
pub fn hyperlink(stream: Stream, text: &str, url: &str) -> String {
    if supports_hyperlinks::on(to_hyperlink_stream(stream)) {
        terminal_link::Link::new(text, url).to_string()
    } else {
        text.to_string()
    }
}

/// Default spinner style - cyan dots
pub fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("hardcoded spinner template is valid")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        })
        .clone()
}
