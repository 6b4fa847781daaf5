//! Shared rendering utilities.
//!
//! Text passed to these helpers is user-controlled (file names straight off
//! the disk), so everything that ends up in a frame goes through
//! [`sanitize`] first. Clipping operates on character counts, not bytes, so
//! multibyte names cannot split a code point.

/// Positions the cursor at a 1-indexed row and column.
///
/// Plain ANSI `CUP`; the plugin never queries the terminal, it only writes.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Strips control characters from user-controlled text.
///
/// File names can legally contain ESC, C0 controls, or DEL; printed raw they
/// would inject escape sequences into the pane. Dropping the control bytes
/// leaves the printable remainder as inert text — a name like `<script>`
/// passes through unchanged because it never had any terminal meaning.
#[must_use]
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Clips text to `width` characters, marking truncation with a trailing
/// ellipsis.
#[must_use]
pub fn clip(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - 3).collect();
    format!("{kept}...")
}

/// Clips text to `width` characters keeping the tail, with a leading
/// ellipsis.
///
/// Paths are clipped from the front: the segment the user is looking for is
/// almost always at the end.
#[must_use]
pub fn clip_tail(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().skip(count - width).collect();
    }
    let kept: String = text.chars().skip(count - (width - 3)).collect();
    format!("...{kept}")
}

#[cfg(test)]
mod tests {
    use super::*;

    mod sanitize {
        use super::*;

        #[test]
        fn strips_escape_and_control_bytes() {
            assert_eq!(sanitize("\u{1b}[31mred\u{7}"), "[31mred");
            assert_eq!(sanitize("tab\there"), "tabhere");
        }

        #[test]
        fn printable_markup_passes_through() {
            assert_eq!(sanitize("<script>alert(1)</script>"), "<script>alert(1)</script>");
        }

        #[test]
        fn plain_text_is_untouched() {
            assert_eq!(sanitize("notes.md"), "notes.md");
        }
    }

    mod clip {
        use super::*;

        #[test]
        fn short_text_is_untouched() {
            assert_eq!(clip("short", 10), "short");
        }

        #[test]
        fn long_text_gets_a_trailing_ellipsis() {
            assert_eq!(clip("a-rather-long-name", 10), "a-rathe...");
        }

        #[test]
        fn counts_characters_not_bytes() {
            // Four characters, twelve bytes.
            assert_eq!(clip("日本語名", 4), "日本語名");
        }
    }

    mod clip_tail {
        use super::*;

        #[test]
        fn keeps_the_end_of_long_paths() {
            assert_eq!(clip_tail("/home/user/projects/notes.md", 15), "...cts/notes.md");
        }

        #[test]
        fn short_paths_are_untouched() {
            assert_eq!(clip_tail("/tmp/a", 15), "/tmp/a");
        }
    }
}
