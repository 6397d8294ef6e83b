//! Text layout primitives.
//!
//! - Markup tokenizing (`**emphasis**` runs, sub-paragraph splitting)
//! - Greedy line breaking with per-run styles
//! - Left/center/right placement and justification spacing
//! - Write cursor and page-break decisions

pub mod cursor;
pub mod justify;
pub mod line_breaker;
pub mod markup;
pub mod measure;
pub mod style;

pub use cursor::{Cursor, PageBreakMonitor};
pub use justify::{justification_spacing, layout_line, place, position, PlacedRun, Placement};
pub use line_breaker::{break_lines, pack_words, split_words, Fragment, Line, Word};
pub use markup::{plain_text, runs, split_blocks, tokenize, Block, MarkupToken, StyledRun};
pub use measure::{FixedAdvance, TextMeasurer};
pub use style::{Alignment, RunStyle, TextStyle};
