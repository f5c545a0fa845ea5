//! Millisecond durations to display text and back.
//!
//! This layer has no timing logic and never touches a clock or a slot. The
//! display side never allocates: [`format`] yields a [`Display`](fmt::Display)
//! value, and [`format_into`] writes into a caller-supplied byte buffer.

use std::fmt::{self, Write};

use crate::error::ParseError;

const MS_PER_SEC: u32 = 1_000;
const MS_PER_MIN: u32 = 60_000;
const MS_PER_HOUR: u32 = 3_600_000;

/// Output style for durations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// `HH:MM:SS.mmm`, e.g. `00:00:03.512`
    HmsMs,
    /// `HH:MM:SS`
    Hms,
    /// Decimal milliseconds, e.g. `3512`
    Ms,
    /// `123 ms`, `5 sec`, `2 min`
    #[default]
    AutoShort,
}

/// A duration paired with its display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formatted {
    ms: u32,
    format: Format,
}

/// Format `ms` in the given style without allocating
pub fn format(ms: u32, format: Format) -> Formatted {
    Formatted { ms, format }
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.ms;
        match self.format {
            Format::HmsMs => {
                let (h, m, s) = split_hms(ms);
                write!(f, "{:02}:{:02}:{:02}.{:03}", h, m, s, ms % MS_PER_SEC)
            }
            Format::Hms => {
                let (h, m, s) = split_hms(ms);
                write!(f, "{:02}:{:02}:{:02}", h, m, s)
            }
            Format::Ms => write!(f, "{}", ms),
            Format::AutoShort => {
                if ms < MS_PER_SEC {
                    write!(f, "{} ms", ms)
                } else if ms < MS_PER_MIN {
                    write!(f, "{} sec", ms / MS_PER_SEC)
                } else {
                    write!(f, "{} min", ms / MS_PER_MIN)
                }
            }
        }
    }
}

fn split_hms(ms: u32) -> (u32, u32, u32) {
    let total_secs = ms / MS_PER_SEC;
    let total_mins = total_secs / 60;
    (total_mins / 60, total_mins % 60, total_secs % 60)
}

/// Format `ms` into `out` and return the written text.
///
/// The output is NUL-terminated and truncated to fit: at most
/// `out.len() - 1` text bytes are written, followed by `0`. An empty buffer
/// is left untouched and yields `""`.
pub fn format_into(ms: u32, style: Format, out: &mut [u8]) -> &str {
    if out.is_empty() {
        return "";
    }

    let cap = out.len() - 1;
    let mut writer = BoundedWriter {
        buf: &mut out[..cap],
        len: 0,
    };
    // BoundedWriter never reports an error; overflow is truncation.
    let _ = write!(writer, "{}", format(ms, style));
    let len = writer.len;

    out[len] = 0;
    std::str::from_utf8(&out[..len]).unwrap_or_default()
}

struct BoundedWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.buf.len() - self.len;
        let mut take = s.len().min(room);
        while !s.is_char_boundary(take) {
            take -= 1;
        }
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

/// Parse a strict `HH:MM:SS` duration into milliseconds.
///
/// `MM` and `SS` are exactly two digits in `00..=59`. `HH` has at least two
/// digits and no upper bound other than the `u32` millisecond range. Nothing
/// may precede or follow the pattern.
pub fn parse_hms(text: &str) -> Result<u32, ParseError> {
    let mut fields = text.split(':');
    let (Some(hh), Some(mm), Some(ss), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(ParseError::Malformed);
    };

    if hh.len() < 2 || mm.len() != 2 || ss.len() != 2 {
        return Err(ParseError::Malformed);
    }

    let hours = parse_digits(hh)?;
    let minutes = parse_digits(mm)?;
    let seconds = parse_digits(ss)?;

    if minutes > 59 {
        return Err(ParseError::OutOfRange {
            field: "minutes",
            value: minutes,
        });
    }
    if seconds > 59 {
        return Err(ParseError::OutOfRange {
            field: "seconds",
            value: seconds,
        });
    }

    hours
        .checked_mul(MS_PER_HOUR)
        .and_then(|ms| ms.checked_add(minutes * MS_PER_MIN + seconds * MS_PER_SEC))
        .ok_or(ParseError::Overflow)
}

fn parse_digits(field: &str) -> Result<u32, ParseError> {
    field.bytes().try_fold(0u32, |acc, b| {
        if !b.is_ascii_digit() {
            return Err(ParseError::Malformed);
        }
        acc.checked_mul(10)
            .and_then(|acc| acc.checked_add(u32::from(b - b'0')))
            .ok_or(ParseError::Overflow)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_styles() {
        assert_eq!(format(3512, Format::HmsMs).to_string(), "00:00:03.512");
        assert_eq!(format(3512, Format::Hms).to_string(), "00:00:03");
        assert_eq!(format(3512, Format::Ms).to_string(), "3512");
        assert_eq!(format(3512, Format::AutoShort).to_string(), "3 sec");
        assert_eq!(format(45, Format::AutoShort).to_string(), "45 ms");
        assert_eq!(format(125_000, Format::AutoShort).to_string(), "2 min");
    }

    #[test]
    fn test_format_boundaries() {
        assert_eq!(format(999, Format::AutoShort).to_string(), "999 ms");
        assert_eq!(format(1000, Format::AutoShort).to_string(), "1 sec");
        assert_eq!(format(59_999, Format::AutoShort).to_string(), "59 sec");
        assert_eq!(format(60_000, Format::AutoShort).to_string(), "1 min");
        // No unit above minutes.
        assert_eq!(format(7_200_000, Format::AutoShort).to_string(), "120 min");
    }

    #[test]
    fn test_format_hours_unbounded_width() {
        assert_eq!(format(3_723_004, Format::HmsMs).to_string(), "01:02:03.004");
        assert_eq!(format(u32::MAX, Format::Hms).to_string(), "1193:02:47");
    }

    #[test]
    fn test_format_into_buffer() {
        let mut buf = [0xffu8; 16];
        assert_eq!(format_into(3512, Format::HmsMs, &mut buf), "00:00:03.512");
        assert_eq!(buf[12], 0);

        // Reusing the buffer overwrites the previous text.
        assert_eq!(format_into(45, Format::AutoShort, &mut buf), "45 ms");
        assert_eq!(buf[5], 0);
    }

    #[test]
    fn test_format_into_truncates() {
        let mut buf = [0xffu8; 6];
        assert_eq!(format_into(3512, Format::HmsMs, &mut buf), "00:00");
        assert_eq!(buf[5], 0);

        let mut one = [0xffu8; 1];
        assert_eq!(format_into(3512, Format::Ms, &mut one), "");
        assert_eq!(one[0], 0);

        let mut empty: [u8; 0] = [];
        assert_eq!(format_into(3512, Format::Ms, &mut empty), "");
    }

    #[test]
    fn test_parse_hms_accepts() {
        assert_eq!(parse_hms("00:00:01"), Ok(1000));
        assert_eq!(parse_hms("01:00:00"), Ok(3_600_000));
        assert_eq!(parse_hms("00:02:10"), Ok(130_000));
        assert_eq!(parse_hms("00:59:59"), Ok(3_599_000));
        assert_eq!(parse_hms("100:00:00"), Ok(360_000_000));
    }

    #[test]
    fn test_parse_hms_rejects() {
        for bad in [
            "1:2:3",
            "01:02",
            "10s",
            "",
            "00:00:03.5",
            "00:00:01 ",
            " 00:00:01",
            "00:00:01:00",
            "+1:00:00",
            "aa:bb:cc",
        ] {
            assert_eq!(parse_hms(bad), Err(ParseError::Malformed), "{bad:?}");
        }

        assert_eq!(
            parse_hms("00:60:00"),
            Err(ParseError::OutOfRange {
                field: "minutes",
                value: 60
            })
        );
        assert_eq!(
            parse_hms("00:00:60"),
            Err(ParseError::OutOfRange {
                field: "seconds",
                value: 60
            })
        );
    }

    #[test]
    fn test_parse_hms_overflow() {
        assert_eq!(parse_hms("1193:02:47"), Ok(4_294_967_000));
        assert_eq!(parse_hms("1194:00:00"), Err(ParseError::Overflow));
        assert_eq!(parse_hms("99999999999:00:00"), Err(ParseError::Overflow));
    }
}
