//! Utility macros and functions for the HTTP crate.
//!
//! This module provides helpers that are used internally by the request
//! decoder and response encoder.

/// A macro for early returns with an error if a condition is not met.
///
/// This is similar to the `assert!` macro, but returns an error instead of panicking.
///
/// # Example
///
/// ```ignore
/// ensure!(tokens.len() == 3, ParseError::invalid_request_line(tokens.len()));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;

/// Returns the offset of the first occurrence of `needle` in `haystack` at or after `from`.
///
/// A plain forward scan: the haystack is always a bounded lookahead window,
/// so nothing smarter pays off.
pub(crate) fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || from >= haystack.len() {
        return None;
    }

    haystack[from..].windows(needle.len()).position(|window| window == needle).map(|offset| offset + from)
}

#[cfg(test)]
mod tests {
    use super::find;

    #[test]
    fn find_from_start() {
        assert_eq!(find(b"GET / HTTP/1.1\r\n", b"\r\n", 0), Some(14));
        assert_eq!(find(b"abc", b"abc", 0), Some(0));
    }

    #[test]
    fn find_respects_offset() {
        let bytes = b"a\r\nb\r\n\r\n";
        assert_eq!(find(bytes, b"\r\n", 2), Some(4));
        assert_eq!(find(bytes, b"\r\n\r\n", 0), Some(4));
        assert_eq!(find(bytes, b"\r\n\r\n", 5), None);
    }

    #[test]
    fn find_never_reads_past_the_end() {
        assert_eq!(find(b"\r", b"\r\n", 0), None);
        assert_eq!(find(b"", b"\r\n", 0), None);
        assert_eq!(find(b"abc", b"\r\n", 10), None);
        assert_eq!(find(b"abc", b"", 0), None);
    }
}
