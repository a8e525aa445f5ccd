//! Terminal output sanitization
//!
//! Turn text comes straight from an export file and is echoed to the operator's terminal.
//! Embedded escape sequences could clear the screen, move the cursor, retitle the window or
//! restyle the terminal, so the console sink passes every turn through [`strip_ansi_codes`]
//! first. JSONL output is left untouched; downstream tools get the text verbatim.

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Strips ANSI escape sequences and stray control characters from a string
///
/// Handles CSI sequences (`ESC [ ... letter`), OSC sequences (`ESC ] ... BEL` or
/// `ESC ] ... ESC \`) and lone two-byte escapes. Tab, newline and carriage return survive
/// since multi-part turns are newline-joined.
///
/// # Examples
///
/// ```
/// use chat_import::utils::terminal::strip_ansi_codes;
///
/// assert_eq!(strip_ansi_codes("\x1b[31mhello\x1b[0m"), "hello");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC {
            match chars.next() {
                Some('[') => {
                    for next in chars.by_ref() {
                        if next.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
                Some(']') => {
                    while let Some(next) = chars.next() {
                        if next == BEL {
                            break;
                        }
                        if next == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                // two-byte escape such as ESC c (reset); drop both
                _ => {}
            }
            continue;
        }

        if ch.is_control() && !matches!(ch, '\t' | '\n' | '\r') {
            continue;
        }
        out.push(ch);
    }

    out
}
