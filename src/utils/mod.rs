//! Utility modules supporting the CLI.
//!
//! - [`truncate_with_ellipsis`]: unicode-aware truncation for table cells
//! - [`citer_table_columns`]: column widths for the citers table
//! - [`terminal_width`] / [`is_terminal`]: cached terminal information

mod display;

pub use display::{
    citer_table_columns, display_width, format_number, is_terminal, terminal_width,
    truncate_with_ellipsis, DEFAULT_WIDTH,
};
