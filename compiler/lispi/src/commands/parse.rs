//! The `parse` command: print every top-level form as read.

use std::path::Path;

use lisp_ir::{ConditionKind, SymbolTable};
use lisp_parse::Parser;

use super::describe_condition;
use crate::driver::read_source;

pub fn parse_file(path: &str) -> bool {
    let source = match read_source(Path::new(path)) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: {e}");
            return false;
        }
    };

    let symbols = SymbolTable::new();
    let mut parser = Parser::new(&source, &symbols);
    loop {
        let start = parser.offset();
        let form = parser.next_form();
        match form.condition_kind() {
            Some(ConditionKind::NothingParsed) => return true,
            Some(kind) if kind.is_parse_error() => {
                eprintln!("{path}: {}", describe_condition(&form, &symbols));
                return false;
            }
            _ => println!("{start:>6}  {}", form.repr(&symbols)),
        }
    }
}
