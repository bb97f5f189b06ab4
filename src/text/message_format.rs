//! Positional message templates: `"name:{0}, age:{1}"`.
//!
//! Single quotes start and end literal text, `''` is one quote. An index with
//! no matching argument is kept as written.

use crate::core::{FeilongError, Result};
use std::fmt::Display;

/// Substitute `{n}` placeholders with `args[n]`.
///
/// ```rust
/// use feilong_core::text::message_format::format;
///
/// let text = format("name:{0}, age:{1}", &[&"feilong", &18]).unwrap();
/// assert_eq!(text, "name:feilong, age:18");
///
/// assert_eq!(format("'{0}' is {0}", &[&1]).unwrap(), "{0} is 1");
/// ```
///
/// # Errors
///
/// `InvalidArgument` for an unterminated `{` or a placeholder that isn't a
/// plain index.
pub fn format(pattern: &str, args: &[&dyn Display]) -> Result<String> {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut in_quote = false;

    while let Some(c) = chars.next() {
        match c {
            '\'' if chars.peek() == Some(&'\'') => {
                chars.next();
                out.push('\'');
            }
            '\'' => in_quote = !in_quote,
            _ if in_quote => out.push(c),
            '{' => {
                let mut element = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => element.push(ch),
                        None => {
                            return Err(FeilongError::invalid_argument(
                                "pattern",
                                format!("unmatched '{{' in \"{}\"", pattern),
                            ))
                        }
                    }
                }
                let index: usize = element.trim().parse().map_err(|_| {
                    FeilongError::invalid_argument(
                        "pattern",
                        format!("unsupported format element '{{{}}}'", element),
                    )
                })?;
                match args.get(index) {
                    Some(arg) => out.push_str(&arg.to_string()),
                    None => {
                        out.push('{');
                        out.push_str(&element);
                        out.push('}');
                    }
                }
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}
