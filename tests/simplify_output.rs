//! Golden output for the simplification flatteners

use outline_parser::{flatten_python, flatten_typescript, parse_python, parse_typescript};

fn render(tokens: &[outline_parser::TreeToken]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

#[test]
fn test_python_module_view() {
    let source = "import os\nfrom .util import helper\n\nclass Greeter:\n    greeting: str = \"hello\"\n\n    def greet(self, name: str) -> str:\n        \"\"\"Render the greeting.\"\"\"\n        return self.greeting + \" \" + name\n\ndef main() -> None:\n    pass\n";
    let tree = parse_python(source).unwrap();
    let out = render(&flatten_python(&tree, None));
    insta::assert_snapshot!(out.trim_end(), @r#"
    import os
    from .util import helper
    class Greeter:
        greeting: str = "hello"
        """Render the greeting."""
        def greet(self, name: str) -> str:
    def main() -> None:
    "#);
}

#[test]
fn test_typescript_module_view() {
    let source = "import {X} from \"./mod\";\n\n/** Entry. */\nfunction main(): void { run(); }\n\nclass Greeter {\n    greeting: string = \"hello\";\n    greet(name: string): string { return name; }\n}\n";
    let tree = parse_typescript(source).unwrap();
    let out = render(&flatten_typescript(&tree, None));
    insta::assert_snapshot!(out.trim_end(), @r#"
    import {X} from "./mod"
    /** Entry. */
    function main(): void {}
    class Greeter {
        greeting: string = "hello"
        greet(name: string): string {}
    }
    "#);
}

#[test]
fn test_two_space_indentation() {
    let source = "class A:\n    def m(self):\n        pass\n";
    let tree = parse_python(source).unwrap();
    let out = render(&flatten_python(&tree, Some("  ")));
    assert_eq!(out, "class A:\n  def m(self):\n");
}

#[test]
fn test_tree_tokens_serialize_for_the_viewer() {
    let tree = parse_python("import os\nx = 1\n").unwrap();
    let spans =
        outline_parser::flatten_faithful(&tree, outline_parser::Fidelity::TopLevelOnly, true);

    let json = serde_json::to_string(&spans).unwrap();
    assert!(json.contains("\"References\""));
    assert!(json.contains("\"Others\""));

    let back: Vec<outline_parser::TreeToken> = serde_json::from_str(&json).unwrap();
    let texts: Vec<&str> = back.iter().map(|t| t.text.as_str()).collect();
    let original: Vec<&str> = spans.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, original);
}
