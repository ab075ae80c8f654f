//! Universal invariants: lex round-trip, faithful round-trip, tree sanity,
//! and parse determinism, exercised over both languages.

use outline_parser::{
    flatten_faithful, parse_python, parse_typescript, tokenize_python, tokenize_typescript,
    Fidelity, Language, SourceTree,
};
use proptest::prelude::*;
use rstest::rstest;

const PYTHON_SAMPLE: &str = r#"import os
from .util import helper

# module helper
TOP = 1


class Greeter:
    greeting: str = "hello"

    def greet(self, name: str) -> str:
        """Render the greeting."""
        return self.greeting + " " + name

    def silent(self):
        pass


def main() -> None:
    g = Greeter()
    print(g.greet("world"))
"#;

const TYPESCRIPT_SAMPLE: &str = r#"import {Greeter} from "./greeter";
import * as os from "os";

/** Entry point wiring. */
function main(): void {
    const g = new Greeter("hello");
    g.greet("world");
}

class Greeter {
    greeting: string = "hello";

    /** Render the greeting. */
    greet(name: string): string {
        return this.greeting + " " + name;
    }
}
"#;

fn all_fidelities() -> [Fidelity; 5] {
    [
        Fidelity::None,
        Fidelity::TopLevelOnly,
        Fidelity::FunctionsAndClasses,
        Fidelity::FunctionsAndClassesAndArguments,
        Fidelity::Everything,
    ]
}

fn normalized(source: &str) -> String {
    if source.is_empty() || source.ends_with('\n') {
        source.to_string()
    } else {
        format!("{source}\n")
    }
}

fn parse(language: Language, source: &str) -> SourceTree {
    language.parse(source).expect("sample parses")
}

#[rstest]
#[case(Language::Python, PYTHON_SAMPLE)]
#[case(Language::TypeScript, TYPESCRIPT_SAMPLE)]
fn test_lex_roundtrip(#[case] language: Language, #[case] source: &str) {
    let tokens = language.tokenize(source).unwrap();
    let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(rebuilt, normalized(source));
}

#[rstest]
#[case(Language::Python, PYTHON_SAMPLE)]
#[case(Language::TypeScript, TYPESCRIPT_SAMPLE)]
fn test_faithful_roundtrip_every_mode(#[case] language: Language, #[case] source: &str) {
    let tree = parse(language, source);
    for fidelity in all_fidelities() {
        for exclude_inner in [false, true] {
            let tokens = flatten_faithful(&tree, fidelity, exclude_inner);
            let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
            assert_eq!(
                rebuilt,
                normalized(source),
                "{language:?} at {fidelity:?}, exclude_inner={exclude_inner}"
            );
        }
    }
}

#[rstest]
#[case(Language::Python, PYTHON_SAMPLE)]
#[case(Language::TypeScript, TYPESCRIPT_SAMPLE)]
fn test_tree_invariants(#[case] language: Language, #[case] source: &str) {
    parse(language, source).validate().unwrap();
}

#[rstest]
#[case(Language::Python, PYTHON_SAMPLE)]
#[case(Language::TypeScript, TYPESCRIPT_SAMPLE)]
fn test_parse_is_deterministic(#[case] language: Language, #[case] source: &str) {
    // Parser internals reset per parse, so two parses agree structurally.
    let first = parse(language, source);
    let second = parse(language, source);
    assert_eq!(first, second);
}

#[rstest]
#[case(Language::Python, PYTHON_SAMPLE)]
#[case(Language::TypeScript, TYPESCRIPT_SAMPLE)]
fn test_spans_are_gap_free_and_ordered(#[case] language: Language, #[case] source: &str) {
    let tree = parse(language, source);
    for fidelity in all_fidelities() {
        for exclude_inner in [false, true] {
            let tokens = flatten_faithful(&tree, fidelity, exclude_inner);
            let mut cursor = outline_parser::Index::new(0, 0);
            for token in &tokens {
                let range = token.range.expect("faithful spans always carry ranges");
                assert_eq!(range.start, cursor, "gap or overlap before {:?}", token.kind);
                cursor = range.end;
            }
            assert_eq!(cursor, tree.lines().end_index());
        }
    }
}

/// Build small random Python-shaped sources out of known-good statement
/// templates; every combination must lex, parse and round-trip.
fn python_statement(choice: usize, i: usize) -> String {
    match choice {
        0 => format!("import mod{i}\n"),
        1 => format!("x{i} = {i} + 1\n"),
        2 => format!("# note {i}\n"),
        3 => format!("def f{i}(a, b={i}):\n    return a\n"),
        4 => format!("class C{i}:\n    y: int = {i}\n"),
        _ => "\n".to_string(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_python_roundtrip(choices in proptest::collection::vec(0usize..6, 0..12)) {
        let source: String = choices
            .iter()
            .enumerate()
            .map(|(i, &c)| python_statement(c, i))
            .collect();

        let tokens = tokenize_python(&source).unwrap();
        let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
        prop_assert_eq!(&rebuilt, &normalized(&source));

        let tree = parse_python(&source).unwrap();
        prop_assert!(tree.validate().is_ok());
        for exclude_inner in [false, true] {
            let spans = flatten_faithful(&tree, Fidelity::FunctionsAndClasses, exclude_inner);
            let rebuilt: String = spans.iter().map(|t| t.text.as_str()).collect();
            prop_assert_eq!(&rebuilt, &normalized(&source));
        }
    }

    #[test]
    fn prop_typescript_roundtrip(choices in proptest::collection::vec(0usize..5, 0..12)) {
        let source: String = choices
            .iter()
            .enumerate()
            .map(|(i, &c)| match c {
                0 => format!("import {{X{i}}} from \"./m{i}\";\n"),
                1 => format!("const x{i} = {i};\n"),
                2 => format!("// note {i}\n"),
                3 => format!("function f{i}(a: number) {{ return a + {i}; }}\n"),
                _ => format!("class C{i} {{ y: number = {i}; }}\n"),
            })
            .collect();

        let tokens = tokenize_typescript(&source).unwrap();
        let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
        prop_assert_eq!(&rebuilt, &normalized(&source));

        let tree = parse_typescript(&source).unwrap();
        prop_assert!(tree.validate().is_ok());
        for exclude_inner in [false, true] {
            let spans = flatten_faithful(&tree, Fidelity::Everything, exclude_inner);
            let rebuilt: String = spans.iter().map(|t| t.text.as_str()).collect();
            prop_assert_eq!(&rebuilt, &normalized(&source));
        }
    }
}
