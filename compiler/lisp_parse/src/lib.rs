//! Lisp Parse - single-pass reader from source text to `Value`s.
//!
//! There is no token stream. The reader walks the source once, keeping a
//! stack of open sequences: `(` pushes, `)` pops and appends the finished
//! sequence to its parent, and atoms are appended to the innermost open
//! sequence. A form is complete when the stack empties.
//!
//! # Syntax
//!
//! - `(` ... `)`: sequence
//! - `;` to end of line: comment
//! - `"..."`: string, a backslash makes the next character literal
//! - a run of digits and `-` that parses as an `i64`: integer
//! - any other run without whitespace or parentheses: symbol (interned)
//!
//! # Errors
//!
//! Reader failures are condition values, not `Err`s:
//! `NothingParsed` when the input holds no form, `IncompleteInput` when it
//! ends inside a sequence or string, and `UnexpectedClose` for a stray `)`.

mod cursor;

use lisp_ir::{condition, SymbolTable, Value};

use cursor::{is_delimiter, Cursor};

/// Reader over one source text.
///
/// Each call to [`Parser::next_form`] consumes one top-level form.
pub struct Parser<'src, 'sym> {
    cursor: Cursor<'src>,
    symbols: &'sym SymbolTable,
}

impl<'src, 'sym> Parser<'src, 'sym> {
    pub fn new(source: &'src str, symbols: &'sym SymbolTable) -> Self {
        Parser {
            cursor: Cursor::new(source),
            symbols,
        }
    }

    /// Byte offset of the next unread character.
    pub fn offset(&self) -> usize {
        self.cursor.pos()
    }

    /// Source text not consumed yet.
    pub fn remaining(&self) -> &'src str {
        self.cursor.rest()
    }

    /// Read one top-level form.
    ///
    /// Leading whitespace and comments are consumed. Returns a
    /// `NothingParsed` condition when only trivia remains.
    pub fn next_form(&mut self) -> Value {
        let mut open: Vec<Vec<Value>> = Vec::new();

        loop {
            self.cursor.skip_trivia();
            if self.cursor.is_eof() {
                return if open.is_empty() {
                    condition::nothing_parsed()
                } else {
                    condition::unbalanced_parens(open.len())
                };
            }

            let item = match self.cursor.current() {
                b'(' => {
                    self.cursor.advance();
                    open.push(Vec::new());
                    continue;
                }
                b')' => {
                    let offset = self.cursor.pos();
                    self.cursor.advance();
                    let Some(items) = open.pop() else {
                        return condition::unexpected_close(offset);
                    };
                    Value::sequence(items)
                }
                b'"' => match self.read_string() {
                    Ok(s) => s,
                    Err(cond) => return cond,
                },
                _ => self.read_atom(),
            };

            match open.last_mut() {
                Some(parent) => parent.push(item),
                None => {
                    tracing::trace!(offset = self.cursor.pos(), "read top-level form");
                    return item;
                }
            }
        }
    }

    /// Read a string literal; the cursor is on the opening quote.
    fn read_string(&mut self) -> Result<Value, Value> {
        let start = self.cursor.pos();
        self.cursor.advance();

        let mut text = String::new();
        let mut escaped = false;
        for (i, c) in self.cursor.rest().char_indices() {
            if escaped {
                text.push(c);
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                self.cursor.advance_by(i + 1);
                return Ok(Value::string(text));
            } else {
                text.push(c);
            }
        }

        self.cursor.advance_by(usize::MAX);
        Err(condition::unterminated_string(start))
    }

    /// Read an integer or a symbol.
    fn read_atom(&mut self) -> Value {
        let text = self.cursor.eat_while(|b| !is_delimiter(b));
        match parse_integer(text) {
            Some(n) => Value::int(n),
            None => Value::symbol(self.symbols.intern(text)),
        }
    }
}

/// Integer literal: digits with an optional sign run, fitting in `i64`.
///
/// Anything else (`-`, `1-2`, `123abc`, out-of-range digits) is a symbol.
fn parse_integer(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        return None;
    }
    text.parse().ok()
}

/// Read one top-level form from the front of `input`, advancing it past the
/// consumed text.
pub fn parse(input: &mut &str, symbols: &SymbolTable) -> Value {
    let source: &str = *input;
    let mut parser = Parser::new(source, symbols);
    let form = parser.next_form();
    *input = parser.remaining();
    form
}

/// Read every top-level form of `source`.
///
/// Stops at the first reader condition other than `NothingParsed` and
/// returns it as the error.
pub fn parse_all(source: &str, symbols: &SymbolTable) -> Result<Vec<Value>, Value> {
    let mut parser = Parser::new(source, symbols);
    let mut forms = Vec::new();
    loop {
        let form = parser.next_form();
        match form.condition_kind() {
            Some(lisp_ir::ConditionKind::NothingParsed) => return Ok(forms),
            Some(kind) if kind.is_parse_error() => return Err(form),
            _ => forms.push(form),
        }
    }
}

#[cfg(test)]
mod tests;
