use crate::errors::TgnError;
use crate::tcl::list::{
    backslash_subst,
    is_list_space,
    merge_list,
    parse_list,
    scan_braced,
};
use log::trace;
use std::collections::HashMap;
use std::fs;

/// The default characters the `split` command splits on.
const DEFAULT_SPLIT_CHARS: &str = " \t\n\r";

/// `TclInterpreter` is the trait every Tcl interpreter handle must implement in order to be used
/// by the marshalling functions, sessions and workers.
pub trait TclInterpreter {
    /// Evaluate a Tcl script and return the result of its last command.
    ///
    /// # Errors
    ///
    /// Returns `TgnError::Tcl` if the interpreter rejects the script.
    fn eval(
        &mut self,
        script: &str,
    ) -> Result<String, TgnError>;
}

impl<T: TclInterpreter + ?Sized> TclInterpreter for Box<T> {
    fn eval(
        &mut self,
        script: &str,
    ) -> Result<String, TgnError> {
        (**self).eval(script)
    }
}

/// A native, in process, interpreter for the subset of Tcl used to marshal lists -- variables,
/// `set`, `split`, `join`, `list`, `llength`, `lindex`, `concat` and `source` -- with brace,
/// quote, backslash, variable and command substitution rules.
#[derive(Debug, Default)]
pub struct NativeInterpreter {
    variables: HashMap<String, String>,
}

fn wrong_args(usage: &str) -> TgnError {
    TgnError::Tcl(format!("wrong # args: should be \"{usage}\""))
}

const fn is_word_end(c: Option<&char>) -> bool {
    match c {
        None => true,
        Some(c) => is_list_space(*c) || *c == ';',
    }
}

fn is_var_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == ':'
}

impl NativeInterpreter {
    /// Returns a new, empty, `NativeInterpreter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn eval_chars(
        &mut self,
        chars: &[char],
    ) -> Result<String, TgnError> {
        let mut result = String::new();
        let mut i = 0;

        loop {
            while chars.get(i).is_some_and(|c| is_list_space(*c) || *c == ';') {
                i += 1;
            }

            match chars.get(i) {
                None => break,
                Some('#') => {
                    while let Some(&c) = chars.get(i) {
                        if c == '\\' {
                            i += 2;

                            continue;
                        }

                        if c == '\n' {
                            break;
                        }

                        i += 1;
                    }

                    continue;
                }
                Some(_) => {}
            }

            let (words, next) = self.parse_command(chars, i)?;

            i = next;

            if !words.is_empty() {
                result = self.invoke(&words)?;
            }
        }

        Ok(result)
    }

    fn parse_command(
        &mut self,
        chars: &[char],
        start: usize,
    ) -> Result<(Vec<String>, usize), TgnError> {
        let mut words = vec![];
        let mut i = start;

        loop {
            loop {
                match chars.get(i) {
                    Some(' ' | '\t' | '\r' | '\u{b}' | '\u{c}') => i += 1,
                    Some('\\') if chars.get(i + 1) == Some(&'\n') => {
                        let (_, consumed) = backslash_subst(chars, i);

                        i += consumed;
                    }
                    _ => break,
                }
            }

            match chars.get(i) {
                None => return Ok((words, i)),
                Some('\n' | ';') => return Ok((words, i + 1)),
                Some('{') => {
                    let (word, end) = scan_braced(chars, i)
                        .map_err(|_| TgnError::Tcl(String::from("missing close-brace")))?;

                    if !is_word_end(chars.get(end)) {
                        return Err(TgnError::Tcl(String::from(
                            "extra characters after close-brace",
                        )));
                    }

                    words.push(word);
                    i = end;
                }
                Some('"') => {
                    let (word, end) = self.parse_quoted(chars, i + 1)?;

                    if !is_word_end(chars.get(end)) {
                        return Err(TgnError::Tcl(String::from(
                            "extra characters after close-quote",
                        )));
                    }

                    words.push(word);
                    i = end;
                }
                Some(_) => {
                    let (word, end) = self.parse_bare(chars, i)?;

                    words.push(word);
                    i = end;
                }
            }
        }
    }

    fn parse_quoted(
        &mut self,
        chars: &[char],
        start: usize,
    ) -> Result<(String, usize), TgnError> {
        let mut word = String::new();
        let mut i = start;

        loop {
            match chars.get(i) {
                None => return Err(TgnError::Tcl(String::from("missing \""))),
                Some('"') => return Ok((word, i + 1)),
                Some(_) => i = self.substitute(chars, i, &mut word)?,
            }
        }
    }

    fn parse_bare(
        &mut self,
        chars: &[char],
        start: usize,
    ) -> Result<(String, usize), TgnError> {
        let mut word = String::new();
        let mut i = start;

        while !is_word_end(chars.get(i)) {
            if chars.get(i) == Some(&'\\') && chars.get(i + 1) == Some(&'\n') {
                break;
            }

            i = self.substitute(chars, i, &mut word)?;
        }

        Ok((word, i))
    }

    /// Appends the (substituted) text starting at `chars[i]` to `word` and returns the next index.
    fn substitute(
        &mut self,
        chars: &[char],
        i: usize,
        word: &mut String,
    ) -> Result<usize, TgnError> {
        match chars.get(i) {
            Some('\\') => {
                let (sub, consumed) = backslash_subst(chars, i);

                word.push_str(&sub);

                Ok(i + consumed)
            }
            Some('$') => self.substitute_variable(chars, i, word),
            Some('[') => self.substitute_command(chars, i, word),
            Some(c) => {
                word.push(*c);

                Ok(i + 1)
            }
            None => Ok(i),
        }
    }

    fn substitute_variable(
        &self,
        chars: &[char],
        start: usize,
        word: &mut String,
    ) -> Result<usize, TgnError> {
        let (name, next) = if chars.get(start + 1) == Some(&'{') {
            let Some(offset) = chars
                .get(start + 2..)
                .and_then(|rest| rest.iter().position(|c| *c == '}'))
            else {
                return Err(TgnError::Tcl(String::from(
                    "missing close-brace for variable name",
                )));
            };

            let name: String = chars
                .get(start + 2..start + 2 + offset)
                .unwrap_or_default()
                .iter()
                .collect();

            (name, start + 3 + offset)
        } else {
            let mut end = start + 1;

            while chars.get(end).is_some_and(|c| is_var_char(*c)) {
                end += 1;
            }

            let name: String = chars.get(start + 1..end).unwrap_or_default().iter().collect();

            (name, end)
        };

        if name.is_empty() {
            word.push('$');

            return Ok(start + 1);
        }

        match self.variables.get(&name) {
            Some(value) => {
                word.push_str(value);

                Ok(next)
            }
            None => Err(TgnError::Tcl(format!(
                "can't read \"{name}\": no such variable"
            ))),
        }
    }

    fn substitute_command(
        &mut self,
        chars: &[char],
        start: usize,
        word: &mut String,
    ) -> Result<usize, TgnError> {
        let mut depth = 0;
        let mut brace_depth = 0;
        let mut i = start;

        while let Some(&c) = chars.get(i) {
            match c {
                '\\' => {
                    i += 2;

                    continue;
                }
                '{' => brace_depth += 1,
                '}' if brace_depth > 0 => brace_depth -= 1,
                '[' if brace_depth == 0 => depth += 1,
                ']' if brace_depth == 0 => {
                    depth -= 1;

                    if depth == 0 {
                        let inner = chars.get(start + 1..i).unwrap_or_default();
                        let result = self.eval_chars(inner)?;

                        word.push_str(&result);

                        return Ok(i + 1);
                    }
                }
                _ => {}
            }

            i += 1;
        }

        Err(TgnError::Tcl(String::from("missing close-bracket")))
    }

    fn invoke(
        &mut self,
        words: &[String],
    ) -> Result<String, TgnError> {
        let Some((command, args)) = words.split_first() else {
            return Ok(String::new());
        };

        trace!("native interpreter invoking '{}' with {} args", command, args.len());

        match command.as_str() {
            "set" => match args {
                [name] => self.variables.get(name).cloned().ok_or_else(|| {
                    TgnError::Tcl(format!("can't read \"{name}\": no such variable"))
                }),
                [name, value] => {
                    self.variables.insert(name.clone(), value.clone());

                    Ok(value.clone())
                }
                _ => Err(wrong_args("set varName ?newValue?")),
            },
            "split" => match args {
                [string] => Ok(split(string, DEFAULT_SPLIT_CHARS)),
                [string, split_chars] => Ok(split(string, split_chars)),
                _ => Err(wrong_args("split string ?splitChars?")),
            },
            "join" => match args {
                [list] => Ok(parse_list(list)?.join(" ")),
                [list, join_string] => Ok(parse_list(list)?.join(join_string.as_str())),
                _ => Err(wrong_args("join list ?joinString?")),
            },
            "list" => Ok(merge_list(args)),
            "llength" => match args {
                [list] => Ok(parse_list(list)?.len().to_string()),
                _ => Err(wrong_args("llength list")),
            },
            "lindex" => match args {
                [list] => Ok(list.clone()),
                [list, index] => lindex(list, index),
                _ => Err(wrong_args("lindex list ?index ...?")),
            },
            "concat" => Ok(args
                .iter()
                .map(|a| a.trim_matches(is_list_space))
                .filter(|a| !a.is_empty())
                .collect::<Vec<&str>>()
                .join(" ")),
            "source" => match args {
                [file_name] => {
                    let script = fs::read_to_string(file_name).map_err(|err| {
                        TgnError::Tcl(format!("couldn't read file \"{file_name}\": {err}"))
                    })?;

                    self.eval(&script)
                }
                _ => Err(wrong_args("source fileName")),
            },
            other => Err(TgnError::Tcl(format!("invalid command name \"{other}\""))),
        }
    }
}

fn split(
    string: &str,
    split_chars: &str,
) -> String {
    if string.is_empty() {
        return String::new();
    }

    if split_chars.is_empty() {
        let elements: Vec<String> = string.chars().map(String::from).collect();

        return merge_list(&elements);
    }

    let elements: Vec<&str> = string.split(|c: char| split_chars.contains(c)).collect();

    merge_list(&elements)
}

fn lindex(
    list: &str,
    index: &str,
) -> Result<String, TgnError> {
    let elements = parse_list(list)?;

    let position = if let Some(rest) = index.strip_prefix("end") {
        let offset = if rest.is_empty() {
            0
        } else {
            rest.strip_prefix('-')
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| TgnError::Tcl(format!("bad index \"{index}\"")))?
        };

        elements.len().checked_sub(1 + offset)
    } else {
        let n = index
            .parse::<i64>()
            .map_err(|_| TgnError::Tcl(format!("bad index \"{index}\"")))?;

        usize::try_from(n).ok()
    };

    Ok(position
        .and_then(|p| elements.get(p))
        .cloned()
        .unwrap_or_default())
}

impl TclInterpreter for NativeInterpreter {
    fn eval(
        &mut self,
        script: &str,
    ) -> Result<String, TgnError> {
        let chars: Vec<char> = script.chars().collect();

        self.eval_chars(&chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_set_and_variables() {
        let mut interp = NativeInterpreter::new();

        assert_eq!(interp.eval("set dummy \"hello world\"").unwrap(), "hello world");
        assert_eq!(interp.eval("set dummy").unwrap(), "hello world");
        assert_eq!(interp.eval("set other \"$dummy!\"").unwrap(), "hello world!");
        assert_eq!(interp.eval("set other {$dummy}").unwrap(), "$dummy");
        assert!(interp.eval("set nope").is_err());
    }

    #[test]
    fn test_split_and_join() {
        let mut interp = NativeInterpreter::new();

        assert_eq!(interp.eval("split {a\tb b} \\t").unwrap(), "a {b b}");
        assert_eq!(interp.eval("join {a {b b}} LiStSeP").unwrap(), "aLiStSePb b");
        assert_eq!(interp.eval("split {} \\t").unwrap(), "");
    }

    #[test]
    fn test_command_substitution() {
        let mut interp = NativeInterpreter::new();

        assert_eq!(interp.eval("llength [split {a\tb b\tc} \\t]").unwrap(), "3");
        assert_eq!(interp.eval("lindex [list x {y y} z] end").unwrap(), "z");
        assert_eq!(interp.eval("lindex {x {y y} z} 1").unwrap(), "y y");
        assert_eq!(interp.eval("lindex {x y} 5").unwrap(), "");
    }

    #[test]
    fn test_multiple_commands_and_comments() {
        let mut interp = NativeInterpreter::new();

        let script = "# comment\nset a 1; set b 2\nconcat $a $b";

        assert_eq!(interp.eval(script).unwrap(), "1 2");
    }

    #[test]
    fn test_errors() {
        let mut interp = NativeInterpreter::new();

        assert!(interp.eval("no_such_command").is_err());
        assert!(interp.eval("llength").is_err());
        assert!(interp.eval("set a {b").is_err());
        assert!(interp.eval("set a {b}c").is_err());
    }

    #[test]
    fn test_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();

        writeln!(file, "set sourced yes").unwrap();

        let mut interp = NativeInterpreter::new();
        let path = file.path().to_string_lossy().replace('\\', "/");

        assert_eq!(interp.eval(&format!("source {{{path}}}")).unwrap(), "yes");
        assert_eq!(interp.eval("set sourced").unwrap(), "yes");
    }
}
