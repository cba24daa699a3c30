use super::*;
use lisp_ir::ConditionKind;
use pretty_assertions::assert_eq;

fn read(source: &str, symbols: &SymbolTable) -> Value {
    let mut input = source;
    parse(&mut input, symbols)
}

fn sym(symbols: &SymbolTable, name: &str) -> Value {
    Value::symbol(symbols.intern(name))
}

#[test]
fn parses_flat_call() {
    let symbols = SymbolTable::new();
    assert_eq!(
        read("(+ 2 3)", &symbols),
        Value::sequence(vec![sym(&symbols, "+"), Value::int(2), Value::int(3)])
    );
}

#[test]
fn parses_nested_call_with_negative_literal() {
    let symbols = SymbolTable::new();
    let expected = Value::sequence(vec![
        sym(&symbols, "+"),
        Value::int(2),
        Value::sequence(vec![sym(&symbols, "*"), Value::int(3), Value::int(4)]),
        Value::int(-5),
    ]);

    assert_eq!(read("(+ 2 (* 3 4) -5)", &symbols), expected);
    assert_eq!(read("(+ 2(* 3 4)-5)", &symbols), expected);
}

#[test]
fn parses_single_element_form() {
    let symbols = SymbolTable::new();
    assert_eq!(
        read("(invalid)", &symbols),
        Value::sequence(vec![sym(&symbols, "invalid")])
    );
}

#[test]
fn parses_top_level_atoms() {
    let symbols = SymbolTable::new();
    assert_eq!(read("123", &symbols), Value::int(123));
    assert_eq!(read("-456", &symbols), Value::int(-456));
    assert_eq!(read("123abc", &symbols), sym(&symbols, "123abc"));
    assert_eq!(read("\"hi\"", &symbols), Value::string("hi"));
}

#[test]
fn integer_edge_cases_read_as_symbols() {
    let symbols = SymbolTable::new();
    assert_eq!(read("-", &symbols), sym(&symbols, "-"));
    assert_eq!(read("1-2", &symbols), sym(&symbols, "1-2"));
    assert_eq!(read("--5", &symbols), sym(&symbols, "--5"));
    assert_eq!(read("+5", &symbols), sym(&symbols, "+5"));
    assert_eq!(
        read("99999999999999999999", &symbols),
        sym(&symbols, "99999999999999999999")
    );
}

#[test]
fn integers_end_at_any_whitespace() {
    let symbols = SymbolTable::new();
    assert_eq!(
        read("(1\n2\t3)", &symbols),
        Value::sequence(vec![Value::int(1), Value::int(2), Value::int(3)])
    );
}

#[test]
fn empty_sequence() {
    let symbols = SymbolTable::new();
    assert_eq!(read("()", &symbols), Value::sequence(vec![]));
    assert_eq!(
        read("(())", &symbols),
        Value::sequence(vec![Value::sequence(vec![])])
    );
}

#[test]
fn strings_with_escapes() {
    let symbols = SymbolTable::new();
    assert_eq!(
        read(r#"(println "say \"hi\"" "a\\b" "\n")"#, &symbols),
        Value::sequence(vec![
            sym(&symbols, "println"),
            Value::string("say \"hi\""),
            Value::string("a\\b"),
            Value::string("n"),
        ])
    );
}

#[test]
fn strings_keep_delimiters_and_unicode() {
    let symbols = SymbolTable::new();
    assert_eq!(
        read("\"(a ; b) λ\"", &symbols),
        Value::string("(a ; b) λ")
    );
}

#[test]
fn comments_are_skipped() {
    let symbols = SymbolTable::new();
    let source = "; leading comment\n(+ 1 ; inline\n 2) ; trailing";
    assert_eq!(
        read(source, &symbols),
        Value::sequence(vec![sym(&symbols, "+"), Value::int(1), Value::int(2)])
    );
}

#[test]
fn unbalanced_input_is_incomplete() {
    let symbols = SymbolTable::new();
    let result = read("(invalid", &symbols);
    assert_eq!(result.condition_kind(), Some(ConditionKind::IncompleteInput));

    let nested = read("(a (b (c)", &symbols);
    assert_eq!(
        nested.as_condition().and_then(|c| c.payload().as_str()),
        Some("incomplete lisp code: 2 unclosed parentheses")
    );
}

#[test]
fn unterminated_string_is_incomplete() {
    let symbols = SymbolTable::new();
    let result = read("(println \"oops)", &symbols);
    assert_eq!(result.condition_kind(), Some(ConditionKind::IncompleteInput));
    assert_eq!(
        result.as_condition().and_then(|c| c.payload().as_str()),
        Some("unterminated string starting at byte 9")
    );
}

#[test]
fn stray_close_paren() {
    let symbols = SymbolTable::new();
    let result = read("  )", &symbols);
    assert_eq!(result.condition_kind(), Some(ConditionKind::UnexpectedClose));
}

#[test]
fn empty_and_trivia_only_input() {
    let symbols = SymbolTable::new();
    for source in ["", "   ", "\n\t  \r\n", "; only a comment", "  ; c1\n ; c2\n"] {
        assert_eq!(
            read(source, &symbols).condition_kind(),
            Some(ConditionKind::NothingParsed),
            "source: {source:?}"
        );
    }
}

#[test]
fn parse_advances_input_one_form_at_a_time() {
    let symbols = SymbolTable::new();
    let mut input = "  (a) b ; c\n (d e)  ";

    assert_eq!(
        parse(&mut input, &symbols),
        Value::sequence(vec![sym(&symbols, "a")])
    );
    assert_eq!(input, " b ; c\n (d e)  ");

    assert_eq!(parse(&mut input, &symbols), sym(&symbols, "b"));
    assert_eq!(input, " ; c\n (d e)  ");

    assert_eq!(
        parse(&mut input, &symbols),
        Value::sequence(vec![sym(&symbols, "d"), sym(&symbols, "e")])
    );
    assert_eq!(input, "  ");

    assert_eq!(
        parse(&mut input, &symbols).condition_kind(),
        Some(ConditionKind::NothingParsed)
    );
    assert_eq!(input, "");
}

#[test]
fn parser_offset_tracks_consumption() {
    let symbols = SymbolTable::new();
    let mut parser = Parser::new("(a) (b)", &symbols);
    parser.next_form();
    assert_eq!(parser.offset(), 3);
    parser.next_form();
    assert_eq!(parser.offset(), 7);
    assert_eq!(parser.remaining(), "");
}

#[test]
fn parse_all_collects_forms() {
    let symbols = SymbolTable::new();
    let forms = parse_all("(set x 1)\n(println x)\n42", &symbols);
    assert_eq!(forms.map(|f| f.len()), Ok(3));
}

#[test]
fn parse_all_reports_first_error() {
    let symbols = SymbolTable::new();
    let result = parse_all("(ok) (broken", &symbols);
    let Err(cond) = result else {
        panic!("expected a reader condition");
    };
    assert_eq!(cond.condition_kind(), Some(ConditionKind::IncompleteInput));
}

#[test]
fn symbols_are_interned_while_reading() {
    let symbols = SymbolTable::new();
    let form = read("(foo foo bar)", &symbols);
    assert_eq!(form.nth(0), form.nth(1));
    assert_ne!(form.nth(0), form.nth(2));
    assert_eq!(symbols.len(), 2);
}

#[test]
fn deeply_nested_form_reads_and_drops() {
    const DEPTH: usize = 20_000;
    let symbols = SymbolTable::new();
    let source = format!("{}1{}", "(a ".repeat(DEPTH), ")".repeat(DEPTH));

    let mut form = read(&source, &symbols);
    assert_eq!(form.condition_kind(), None);
    let mut depth = 0;
    while form.len() == 2 {
        form = form.nth(1);
        depth += 1;
    }
    assert_eq!(depth, DEPTH);
    assert_eq!(form, Value::int(1));
}

mod proptest_reader {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn arbitrary_input_never_panics(source in "[ -~\\n\\t()\";λ]{0,64}") {
            let symbols = SymbolTable::new();
            let mut input = source.as_str();
            // Every call consumes input or reports NothingParsed.
            for _ in 0..=source.len() {
                let before = input.len();
                let form = parse(&mut input, &symbols);
                if form.condition_kind().is_some_and(ConditionKind::is_parse_error) {
                    break;
                }
                prop_assert!(input.len() < before);
            }
        }

        #[test]
        fn integer_lists_read_back(nums in proptest::collection::vec(any::<i64>(), 0..16)) {
            let symbols = SymbolTable::new();
            let text: Vec<String> = nums.iter().map(i64::to_string).collect();
            let source = format!("({})", text.join(" "));
            let expected = Value::sequence(nums.iter().copied().map(Value::int).collect());
            prop_assert_eq!(read(&source, &symbols), expected);
        }
    }
}
