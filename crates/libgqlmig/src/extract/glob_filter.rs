use crate::extract::ExtractionRunError;
use regex::Regex;

/// Compiled include/ignore glob set, matched against workspace-relative
/// paths with `/` separators.
///
/// Supported syntax: `**` (any path segments), `*` (within one segment),
/// `?` (one character), `{a,b}` (alternation, no nesting).
#[derive(Debug)]
pub(crate) struct GlobFilter {
    ignore: Vec<Regex>,
    include: Vec<Regex>,
}
impl GlobFilter {
    pub fn compile(
        include: &[String],
        ignore: &[String],
    ) -> Result<Self, ExtractionRunError> {
        Ok(Self {
            ignore: compile_all(ignore)?,
            include: compile_all(include)?,
        })
    }

    pub fn matches(&self, relative_path: &str) -> bool {
        let normalized = relative_path.replace('\\', "/");
        if self.ignore.iter().any(|re| re.is_match(&normalized)) {
            return false;
        }
        self.include.iter().any(|re| re.is_match(&normalized))
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>, ExtractionRunError> {
    patterns
        .iter()
        .map(|pattern| {
            glob_to_regex(pattern).map_err(|err| ExtractionRunError::InvalidGlob {
                message: err.to_string(),
                pattern: pattern.clone(),
            })
        })
        .collect()
}

fn glob_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut regex_text = String::with_capacity(pattern.len() + 8);
    regex_text.push('^');

    let bytes = pattern.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        match bytes[idx] {
            b'*' => {
                if bytes.get(idx + 1) == Some(&b'*') {
                    // `**/` may match zero segments; a bare `**` matches
                    // anything including separators.
                    if bytes.get(idx + 2) == Some(&b'/') {
                        regex_text.push_str("(?:.*/)?");
                        idx += 3;
                    } else {
                        regex_text.push_str(".*");
                        idx += 2;
                    }
                } else {
                    regex_text.push_str("[^/]*");
                    idx += 1;
                }
            },
            b'?' => {
                regex_text.push_str("[^/]");
                idx += 1;
            },
            b'{' => {
                let close = pattern[idx..].find('}').map(|off| idx + off);
                match close {
                    Some(close) => {
                        let choices: Vec<String> = pattern[idx + 1..close]
                            .split(',')
                            .map(regex::escape)
                            .collect();
                        regex_text.push_str("(?:");
                        regex_text.push_str(&choices.join("|"));
                        regex_text.push(')');
                        idx = close + 1;
                    },
                    None => {
                        regex_text.push_str(&regex::escape("{"));
                        idx += 1;
                    },
                }
            },
            byte => {
                let ch = pattern[idx..].chars().next().unwrap_or(byte as char);
                regex_text.push_str(&regex::escape(&ch.to_string()));
                idx += ch.len_utf8();
            },
        }
    }

    regex_text.push('$');
    Regex::new(&regex_text)
}
