//! Naming templates for pool workers.

use crate::errors::{SpawnError, ThreadError};
use std::str::FromStr;

/// A parsed worker naming template such as `"worker-%d"`.
///
/// The first `%d` or `%s` is replaced by the worker index; `%%` yields a
/// literal `%`. The placeholder may carry a width with an optional `0`
/// (zero padding) or `-` (left aligned) flag, so `"worker-%02d"` names
/// workers `worker-00`, `worker-01`, ... Further placeholders and unknown
/// bare conversions such as `%y` are copied through unchanged. A template
/// without a placeholder names every worker identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFormat {
    prefix: String,
    suffix: String,
    indexed: bool,
    pad: Pad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pad {
    None,
    Right(usize),
    Left(usize),
    Zero(usize),
}

impl NameFormat {
    /// Parse a template.
    ///
    /// The empty template is rejected, and so is a flagged or sized
    /// specifier that is not a valid index placeholder (`%02x`, `%-d`,
    /// `%-05d`).
    pub fn parse(template: &str) -> Result<Self, SpawnError> {
        if template.is_empty() {
            return Err(SpawnError::InvalidName(String::new()));
        }
        let invalid = || SpawnError::InvalidName(template.to_owned());

        let mut prefix = String::with_capacity(template.len());
        let mut suffix = String::new();
        let mut indexed = false;
        let mut pad = Pad::None;
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            let out = if indexed { &mut suffix } else { &mut prefix };
            if c != '%' {
                out.push(c);
                continue;
            }

            let mut flags = String::new();
            while let Some(&f) = chars.peek() {
                if f == '-' || f.is_ascii_digit() {
                    flags.push(f);
                    chars.next();
                } else {
                    break;
                }
            }

            match chars.peek().copied() {
                Some('%') if flags.is_empty() => {
                    chars.next();
                    out.push('%');
                }
                Some(conv @ ('d' | 's')) => {
                    chars.next();
                    if indexed {
                        out.push('%');
                        out.push_str(&flags);
                        out.push(conv);
                    } else {
                        pad = parse_pad(&flags).ok_or_else(invalid)?;
                        indexed = true;
                    }
                }
                _ if flags.is_empty() => out.push('%'),
                _ => return Err(invalid()),
            }
        }

        Ok(Self { prefix, suffix, indexed, pad })
    }

    /// Name of the worker at `index`.
    pub fn format(&self, index: usize) -> String {
        if !self.indexed {
            return self.prefix.clone();
        }
        let index = match self.pad {
            Pad::None => index.to_string(),
            Pad::Right(width) => format!("{:>width$}", index, width = width),
            Pad::Left(width) => format!("{:<width$}", index, width = width),
            Pad::Zero(width) => format!("{:0width$}", index, width = width),
        };
        format!("{}{}{}", self.prefix, index, self.suffix)
    }

    /// Whether names produced by this template differ per worker.
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }
}

/// `[-|0]width`, or nothing. A flag needs a width; `-` and `0` exclude each other.
fn parse_pad(flags: &str) -> Option<Pad> {
    if flags.is_empty() {
        return Some(Pad::None);
    }
    let (make, digits): (fn(usize) -> Pad, &str) = if let Some(rest) = flags.strip_prefix('-') {
        (Pad::Left, rest)
    } else if let Some(rest) = flags.strip_prefix('0') {
        (Pad::Zero, rest)
    } else {
        (Pad::Right, flags)
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(make)
}

impl FromStr for NameFormat {
    type Err = ThreadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s)?)
    }
}
