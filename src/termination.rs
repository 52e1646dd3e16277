//! Compact termination settings for message-based resources.
//!
//! A spec is a terminator followed by keywords, separated by spaces:
//!
//! * the terminator, ASCII written as is or with `\r`, `\n`, `\t`, `\0`,
//!   `\\` and `\xHH` escapes, may be left out;
//! * `END` or `NOEND` turns the END indicator on or off after writes;
//! * `DELAY <seconds>` waits after each write.
//!
//! ```
//! use std::time::Duration;
//! use visa_bind::termination::TerminationSpec;
//! let spec: TerminationSpec = r"\r NOEND DELAY 0.5".parse().unwrap();
//! assert_eq!(spec.terminator.as_deref(), Some("\r"));
//! assert_eq!(spec.send_end, Some(false));
//! assert_eq!(spec.delay, Some(Duration::from_millis(500)));
//! ```

use crate::{Error, Result};
use std::{fmt, str::FromStr, time::Duration};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerminationSpec {
    pub terminator: Option<String>,
    pub send_end: Option<bool>,
    pub delay: Option<Duration>,
}

fn unescape(token: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                let byte = u8::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|b| hex.len() == 2 && b.is_ascii())
                    .ok_or_else(|| format!("bad escape `\\x{hex}`"))?;
                out.push(char::from(byte));
            }
            Some(other) => return Err(format!("unknown escape `\\{other}`")),
            None => return Err("dangling `\\`".to_string()),
        }
    }
    Ok(out)
}

fn escape(terminator: &str) -> String {
    let mut out = String::with_capacity(terminator.len());
    for c in terminator.chars() {
        match c {
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            '\\' => out.push_str("\\\\"),
            c if c.is_ascii_graphic() => out.push(c),
            c => out.push_str(&format!("\\x{:02X}", u32::from(c))),
        }
    }
    out
}

fn is_keyword(token: &str) -> bool {
    ["END", "NOEND", "DELAY"]
        .iter()
        .any(|k| token.eq_ignore_ascii_case(k))
}

impl TerminationSpec {
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidTermination {
            spec: spec.to_string(),
            reason,
        };
        // only spaces separate tokens, the terminator itself may be "\r" or "\n"
        let mut tokens = spec.split(' ').filter(|t| !t.is_empty()).peekable();
        let mut out = Self::default();
        if let Some(first) = tokens.peek() {
            if !is_keyword(first) {
                let terminator = unescape(first).map_err(&invalid)?;
                if !terminator.is_ascii() {
                    return Err(invalid("terminator is not ASCII".to_string()));
                }
                out.terminator = Some(terminator);
                tokens.next();
            }
        }
        while let Some(token) = tokens.next() {
            let keyword = token.to_ascii_uppercase();
            match keyword.as_str() {
                "END" | "NOEND" => {
                    if out.send_end.is_some() {
                        return Err(invalid("END given twice".to_string()));
                    }
                    out.send_end = Some(keyword == "END");
                }
                "DELAY" => {
                    if out.delay.is_some() {
                        return Err(invalid("DELAY given twice".to_string()));
                    }
                    let secs = tokens
                        .next()
                        .ok_or_else(|| invalid("DELAY without a value".to_string()))?;
                    let delay = secs
                        .parse::<f64>()
                        .ok()
                        .and_then(|s| Duration::try_from_secs_f64(s).ok())
                        .ok_or_else(|| invalid(format!("bad delay `{secs}`")))?;
                    out.delay = Some(delay);
                }
                _ => return Err(invalid(format!("unexpected `{token}`"))),
            }
        }
        Ok(out)
    }
}

impl FromStr for TerminationSpec {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TerminationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(term) = &self.terminator {
            let mut shown = escape(term);
            // keep a terminator spelled like a keyword from reading as one
            if is_keyword(&shown) {
                shown = format!("\\x{:02X}{}", shown.as_bytes()[0], &shown[1..]);
            }
            parts.push(shown);
        }
        match self.send_end {
            Some(true) => parts.push("END".to_string()),
            Some(false) => parts.push("NOEND".to_string()),
            None => {}
        }
        if let Some(delay) = self.delay {
            parts.push(format!("DELAY {}", delay.as_secs_f64()));
        }
        f.write_str(&parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn raw_control_characters_are_terminators() {
        let spec = TerminationSpec::parse("\r NOEND DELAY 0.5").unwrap();
        assert_eq!(spec.terminator.as_deref(), Some("\r"));
        assert_eq!(spec.send_end, Some(false));
        assert_eq!(spec.delay, Some(Duration::from_secs_f64(0.5)));
    }

    #[rstest]
    #[case(r"\r\n", Some("\r\n"), None, None)]
    #[case(r"\x04 end", Some("\u{4}"), Some(true), None)]
    #[case("NOEND", None, Some(false), None)]
    #[case("delay 2", None, None, Some(Duration::from_secs(2)))]
    #[case("", None, None, None)]
    fn accepted(
        #[case] text: &str,
        #[case] terminator: Option<&str>,
        #[case] send_end: Option<bool>,
        #[case] delay: Option<Duration>,
    ) {
        let spec: TerminationSpec = text.parse().unwrap();
        assert_eq!(spec.terminator.as_deref(), terminator);
        assert_eq!(spec.send_end, send_end);
        assert_eq!(spec.delay, delay);
    }

    #[rstest]
    #[case(r"\q")]
    #[case(r"\x4")]
    #[case(r"\n DELAY")]
    #[case(r"\n DELAY -1")]
    #[case(r"\n DELAY soon")]
    #[case(r"\n END NOEND")]
    #[case(r"\n \r")]
    #[case(r"\x80")]
    #[case("\u{e9}")]
    fn rejected(#[case] text: &str) {
        assert!(matches!(
            TerminationSpec::parse(text),
            Err(Error::InvalidTermination { .. })
        ));
    }

    #[rstest]
    #[case(r"\r\n END DELAY 0.25", r"\r\n END DELAY 0.25")]
    #[case(r"\x04 END", r"\x04 END")]
    #[case(r"\x20 NOEND", r"\x20 NOEND")]
    #[case(r"\\\0\t", r"\\\0\t")]
    #[case(r"\x7F", r"\x7F")]
    #[case(r"\x3B", ";")]
    #[case(r"\x45ND", r"\x45ND")]
    fn display_reparses(#[case] text: &str, #[case] shown: &str) {
        let spec = TerminationSpec::parse(text).unwrap();
        assert_eq!(spec.to_string(), shown);
        assert_eq!(TerminationSpec::parse(&spec.to_string()).unwrap(), spec);
    }
}
