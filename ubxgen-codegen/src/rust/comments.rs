//! Doc comment emission.

use super::Indent;

/// Formats `text` as a block doc comment at `indent`.
///
/// The first line opens the comment (`/** first`), each further line is
/// prefixed with ` * ` and ` */` closes it. Single-line text stays on one
/// line. Blank text yields nothing.
#[must_use]
pub fn doc_comment(text: &str, indent: Indent) -> String {
    let lines: Vec<String> = text.trim().lines().map(|l| escape(l.trim_end())).collect();

    match lines.as_slice() {
        [] => String::new(),
        [only] => format!("{}/** {} */\n", indent, only),
        [first, rest @ ..] => {
            let mut output = format!("{}/** {}\n", indent, first);
            for line in rest {
                if line.is_empty() {
                    output.push_str(&format!("{} *\n", indent));
                } else {
                    output.push_str(&format!("{} * {}\n", indent, line));
                }
            }
            output.push_str(&format!("{} */\n", indent));
            output
        }
    }
}

/// Breaks comment delimiters; block comments nest in Rust.
fn escape(line: &str) -> String {
    line.replace("*/", "* /").replace("/*", "/ *")
}
