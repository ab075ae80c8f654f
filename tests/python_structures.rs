//! Structural parsing of Python sources
//!
//! Isolated-element coverage plus the combined class scenario: every test
//! verifies structure and content through the fluent tree assertions, not
//! just node counts.

use outline_parser::parsing::parse_python;
use outline_parser::testing::assert_tree;
use outline_parser::{treeviz, ParseError};
use rstest::rstest;

#[test]
fn test_class_with_attribute_doc_and_method() {
    let source = "class A:\n    x: int = 1\n    def m(self, n: int) -> bool:\n        \"\"\"doc\"\"\"\n        return n > 0\n";
    let tree = parse_python(source).unwrap();
    tree.validate().unwrap();

    assert_tree(&tree).child_count(1).child(0, |class| {
        class
            .assert_class()
            .definition_contains("class A:")
            .class_type(None)
            .has_inner_range()
            .child_count(2)
            .child(0, |attr| {
                attr.assert_attribute().name("x").attr_type(Some("int"));
            })
            .child(1, |group| {
                group
                    .assert_group()
                    .child_count(2)
                    .child(0, |doc| {
                        doc.assert_comment().multiline(true).contents("doc");
                    })
                    .child(1, |function| {
                        function
                            .assert_function()
                            .definition_contains("def m(self, n: int) -> bool:")
                            .return_type(Some("bool"))
                            .has_body(true)
                            .arguments(|args| {
                                assert_eq!(args.len(), 2);
                                let mut args = args.into_iter();
                                args.next().unwrap().name("self").arg_type(None);
                                args.next().unwrap().name("n").arg_type(Some("int"));
                            });
                    });
            });
    });
}

#[test]
fn test_doc_comment_lifted_out_of_body() {
    let source = "def only_doc():\n    \"\"\"explains\"\"\"\n";
    let tree = parse_python(source).unwrap();
    tree.validate().unwrap();

    assert_tree(&tree).child_count(1).child(0, |group| {
        group
            .assert_group()
            .child_count(2)
            .child(0, |doc| {
                doc.assert_comment().multiline(true).contents("explains");
            })
            .child(1, |function| {
                // The lifted doc comment does not count as body.
                function.assert_function().has_body(false).child(0, |decl| {
                    decl.assert_declaration();
                });
            });
    });
}

#[test]
fn test_second_docstring_stays_in_body() {
    let source =
        "def f():\n    \"\"\"doc\"\"\"\n    \"\"\"data\"\"\"\n    pass\n";
    let tree = parse_python(source).unwrap();
    tree.validate().unwrap();

    assert_tree(&tree).child(0, |group| {
        group
            .assert_group()
            .child_count(2)
            .child(1, |function| {
                function
                    .assert_function()
                    .has_body(true)
                    // declaration first, then the second docstring.
                    .child(1, |comment| {
                        comment.assert_comment().contents("data");
                    });
            });
    });
}

#[rstest]
#[case("import os", "environment://os", "import os")]
#[case("import os.path", "environment://os/path", "import os.path")]
#[case("from json import loads", "environment://json", "from json import loads")]
#[case("from . import sibling", "local-file://", "from . import sibling")]
#[case("from .util import helper", "local-file://util", "from .util import helper")]
#[case(
    "from ..pkg.mod import thing",
    "local-file://../pkg/mod",
    "from ..pkg.mod import thing"
)]
fn test_reference_paths(#[case] source: &str, #[case] path: &str, #[case] text: &str) {
    let tree = parse_python(&format!("{source}\n")).unwrap();
    assert_tree(&tree).child(0, |reference| {
        reference.assert_reference().path(path).text(text);
    });
}

#[test]
fn test_line_continuation_inside_brackets_is_one_statement() {
    // The inner newline must not terminate the statement: one filler run,
    // no structural nodes.
    let source = "x = (1 +\n 2)\n";
    let tree = parse_python(source).unwrap();
    assert_tree(&tree).child_count(0);
}

#[test]
fn test_backslash_continuation_is_one_statement() {
    let source = "x = 1 + \\\n    2\nimport os\n";
    let tree = parse_python(source).unwrap();
    // Only the import produces a node; the continued statement is filler.
    assert_tree(&tree).child_count(1).child(0, |reference| {
        reference.assert_reference().path("environment://os");
    });
}

#[test]
fn test_two_functions_with_dedent_boundary() {
    let source = "def a():\n    pass\n\ndef b():\n    pass\n";
    let tree = parse_python(source).unwrap();
    tree.validate().unwrap();

    assert_tree(&tree)
        .child_count(2)
        .child(0, |group| {
            group.assert_group().child(0, |f| {
                f.assert_function().definition_contains("def a():");
            });
        })
        .child(1, |group| {
            group.assert_group().child(0, |f| {
                f.assert_function().definition_contains("def b():");
            });
        });
}

#[test]
fn test_dedented_comment_stays_in_block() {
    // A dedented single-line comment does not end the function block; the
    // next def does.
    let source = "def a():\n    pass\n# boundary note\ndef b():\n    pass\n";
    let tree = parse_python(source).unwrap();
    tree.validate().unwrap();

    let names: Vec<&str> = tree
        .children(tree.root())
        .iter()
        .map(|&id| tree.node(id).kind.name())
        .collect();
    assert_eq!(names, vec!["FunctionGroup", "FunctionGroup"]);
}

#[test]
fn test_nested_def_is_opaque_body_content() {
    let source = "def outer():\n    def inner():\n        pass\n    return inner\n";
    let tree = parse_python(source).unwrap();
    tree.validate().unwrap();

    // Exactly one function group; the inner def never becomes a node.
    assert_tree(&tree).child_count(1).child(0, |group| {
        group.assert_group().child_count(1).child(0, |f| {
            f.assert_function()
                .definition_contains("def outer():")
                .has_body(true);
        });
    });
}

#[test]
fn test_module_docstring_and_standalone_string() {
    let source = "\"\"\"module doc\"\"\"\nx = \"\"\"not a comment\"\"\" + y\n";
    let tree = parse_python(source).unwrap();

    // First literal stands alone: a comment. Second sits in a statement:
    // demoted to filler.
    assert_tree(&tree).child_count(1).child(0, |comment| {
        comment.assert_comment().multiline(true).contents("module doc");
    });
}

#[test]
fn test_hash_comment_node() {
    let source = "# top note\n";
    let tree = parse_python(source).unwrap();
    assert_tree(&tree).child_count(1).child(0, |comment| {
        comment.assert_comment().multiline(false).contents("top note");
    });
}

#[test]
fn test_class_without_colon_fails() {
    let result = parse_python("class A\n");
    assert!(matches!(
        result,
        Err(outline_parser::OutlineError::Parse(
            ParseError::MissingBodyOpener { .. }
        ))
    ));
}

#[test]
fn test_mixed_indentation_fails() {
    let result = parse_python("def f():\n \tx = 1\n");
    assert!(matches!(
        result,
        Err(outline_parser::OutlineError::Parse(
            ParseError::MixedIndentation { .. }
        ))
    ));
}

#[test]
fn test_tab_indented_file_parses() {
    let source = "class A:\n\tdef m(self):\n\t\tpass\n";
    let tree = parse_python(source).unwrap();
    tree.validate().unwrap();
    assert_tree(&tree).child(0, |class| {
        class.assert_class().child_count(1).child(0, |group| {
            group.assert_group();
        });
    });
}

#[test]
fn test_treeviz_shape() {
    let source = "import os\nclass A:\n    def m(self):\n        pass\n";
    let tree = parse_python(source).unwrap();
    let viz = treeviz(&tree);
    // Each line is "<indent><icon> <kind> <label?>".
    let kinds: Vec<&str> = viz
        .lines()
        .map(|line| line.split_whitespace().nth(1).unwrap_or(""))
        .collect();
    assert_eq!(
        kinds,
        vec![
            "TopLevel",
            "Reference",
            "Class",
            "FunctionGroup",
            "Function",
            "FunctionDeclaration",
            "Argument"
        ]
    );
}

#[test]
fn test_empty_source() {
    let tree = parse_python("").unwrap();
    assert_tree(&tree).child_count(0);
}
