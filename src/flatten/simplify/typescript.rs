//! TypeScript-like simplification
//!
//! Class bodies become a braced scaffold with the children indented inside;
//! function bodies collapse to `{}` right after the signature.

use crate::ast::{NodeId, NodeKind, SourceTree};
use crate::flatten::simplify::{emit_common, Emitter};
use crate::flatten::tree_token::{TreeToken, TreeTokenKind};

/// Flatten a TypeScript-like tree to its re-indented minified view.
pub fn flatten_typescript(tree: &SourceTree, indentation: Option<&str>) -> Vec<TreeToken> {
    let mut emitter = Emitter::new(tree, indentation);
    for &child in tree.children(tree.root()) {
        emit(&mut emitter, child);
    }
    emitter.tokens
}

/// Flatten only the subtree at `node`, preceded by its ancestor class shells.
pub fn flatten_typescript_subtree(
    tree: &SourceTree,
    node: NodeId,
    indentation: Option<&str>,
) -> Vec<TreeToken> {
    let mut emitter = Emitter::new(tree, indentation);
    let mut chain = Vec::new();
    let mut current = tree.node(node).parent;
    while let Some(ancestor) = current {
        chain.push(ancestor);
        current = tree.node(ancestor).parent;
    }
    let mut open_shells = 0;
    for &ancestor in chain.iter().rev() {
        if let NodeKind::Class {
            definition_text, ..
        } = &tree.node(ancestor).kind
        {
            let header = format!("{} {{", definition_text.trim());
            emitter.line(TreeTokenKind::Class, &header, ancestor);
            emitter.level += 1;
            open_shells += 1;
        }
    }
    emit(&mut emitter, node);
    for _ in 0..open_shells {
        emitter.level -= 1;
        emitter.scaffold(TreeTokenKind::Class, "}");
    }
    emitter.tokens
}

fn emit(emitter: &mut Emitter<'_>, id: NodeId) {
    if emit_common(emitter, id) {
        return;
    }
    let node = emitter.tree.node(id);
    match &node.kind {
        NodeKind::Class {
            definition_text, ..
        } => {
            let header = format!("{} {{", definition_text.trim());
            emitter.line(TreeTokenKind::Class, &header, id);
            emitter.level += 1;
            for &child in emitter.tree.children(id) {
                emit(emitter, child);
            }
            emitter.level -= 1;
            emitter.scaffold(TreeTokenKind::Class, "}");
        }
        NodeKind::FunctionGroup => {
            for &child in emitter.tree.children(id) {
                emit(emitter, child);
            }
        }
        NodeKind::Function {
            definition_text, ..
        } => {
            let text = format!("{} {{}}", definition_text.trim());
            emitter.line(TreeTokenKind::Function, &text, id);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_typescript;

    fn render(tokens: &[TreeToken]) -> String {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_class_shell_and_method() {
        let source =
            "class B { y: string = \"hi\"; fn(a: number): void { return; } }\n";
        let tree = parse_typescript(source).unwrap();
        let out = render(&flatten_typescript(&tree, None));
        assert_eq!(
            out,
            "class B {\n    y: string = \"hi\"\n    fn(a: number): void {}\n}\n"
        );
    }

    #[test]
    fn test_doc_comment_precedes_function() {
        let source = "/** hello */\nfunction f() {}\n";
        let tree = parse_typescript(source).unwrap();
        let out = render(&flatten_typescript(&tree, None));
        assert_eq!(out, "/** hello */\nfunction f() {}\n");
    }

    #[test]
    fn test_reference_line() {
        let source = "import {X} from \"./mod\";\n";
        let tree = parse_typescript(source).unwrap();
        let out = render(&flatten_typescript(&tree, None));
        assert_eq!(out, "import {X} from \"./mod\"\n");
    }

    #[test]
    fn test_scaffold_tokens_carry_no_range() {
        let source = "class B { fn(): void {} }\n";
        let tree = parse_typescript(source).unwrap();
        let tokens = flatten_typescript(&tree, None);
        let closer = tokens.last().unwrap();
        assert_eq!(closer.text, "}\n");
        assert!(closer.range.is_none());
    }
}
