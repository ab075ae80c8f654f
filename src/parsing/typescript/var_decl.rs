//! Name / type / assignment splitter for variable-shaped declarations
//!
//! A three-state machine over characters: reading the name until an
//! unenclosed `:`, then the type until an unenclosed `=`, then discarding the
//! assignment. Inside types, angle brackets are tracked alongside the other
//! brackets; inside assignments only `()[]{}` are. A `,`, `;` or the
//! outermost `)` ends the declaration.
//!
//! The `=` is deferred one character so `=>` inside a function type stays
//! part of the type instead of opening an assignment.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    Name,
    Type,
    Assignment,
    Done,
}

#[derive(Debug, Clone)]
pub struct VarDeclMatcher {
    state: ReadState,
    name: String,
    ty: String,
    depth: usize,
    pending_equals: bool,
}

impl VarDeclMatcher {
    pub fn new() -> Self {
        Self {
            state: ReadState::Name,
            name: String::new(),
            ty: String::new(),
            depth: 0,
            pending_equals: false,
        }
    }

    pub fn next(&mut self, ch: char) {
        if self.state == ReadState::Done {
            return;
        }
        if self.pending_equals {
            self.pending_equals = false;
            if ch == '>' {
                // The deferred '=' was an arrow; both characters belong to
                // the current segment.
                self.push("=>");
                return;
            }
            self.state = match self.state {
                ReadState::Name | ReadState::Type => ReadState::Assignment,
                other => other,
            };
            // Fall through and process ch under the new state.
        }

        match ch {
            ',' | ';' if self.depth == 0 => {
                self.state = ReadState::Done;
                return;
            }
            ')' if self.depth == 0 => {
                self.state = ReadState::Done;
                return;
            }
            '=' if self.depth == 0 && self.state != ReadState::Assignment => {
                self.pending_equals = true;
                return;
            }
            ':' if self.depth == 0 && self.state == ReadState::Name => {
                self.state = ReadState::Type;
                return;
            }
            _ => {}
        }

        match ch {
            '(' | '[' | '{' => self.depth += 1,
            '<' if self.state == ReadState::Type => self.depth += 1,
            ')' | ']' | '}' => self.depth = self.depth.saturating_sub(1),
            '>' if self.state == ReadState::Type => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }
        let mut buffer = [0u8; 4];
        self.push(ch.encode_utf8(&mut buffer));
    }

    fn push(&mut self, s: &str) {
        match self.state {
            ReadState::Name => self.name.push_str(s),
            ReadState::Type => self.ty.push_str(s),
            ReadState::Assignment | ReadState::Done => {}
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Bracket depth within the current declaration; a separator at depth
    /// zero ends it.
    pub fn current_depth(&self) -> usize {
        self.depth
    }

    /// Resolve to `(name, type?)`. The name keeps only its last word, with
    /// the optional-marker `?` stripped, so modifiers like `public readonly`
    /// fall away.
    pub fn finish(&self) -> (String, Option<String>) {
        let name = self
            .name
            .split_whitespace()
            .last()
            .unwrap_or("")
            .trim_end_matches('?')
            .to_string();
        let ty = self.ty.trim().to_string();
        (name, (!ty.is_empty()).then_some(ty))
    }
}

impl Default for VarDeclMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> (String, Option<String>) {
        let mut matcher = VarDeclMatcher::new();
        for ch in text.chars() {
            matcher.next(ch);
        }
        matcher.finish()
    }

    #[test]
    fn test_plain_name() {
        assert_eq!(split("a"), ("a".to_string(), None));
    }

    #[test]
    fn test_name_and_type() {
        assert_eq!(split("a: number"), ("a".to_string(), Some("number".to_string())));
    }

    #[test]
    fn test_assignment_dropped() {
        assert_eq!(
            split("y: string = \"hi\""),
            ("y".to_string(), Some("string".to_string()))
        );
    }

    #[test]
    fn test_assignment_without_type() {
        assert_eq!(split("flag = true"), ("flag".to_string(), None));
    }

    #[test]
    fn test_generic_type_keeps_inner_commas() {
        assert_eq!(
            split("m: Map<string, number>"),
            ("m".to_string(), Some("Map<string, number>".to_string()))
        );
    }

    #[test]
    fn test_arrow_type_survives_equals_deferral() {
        assert_eq!(
            split("cb: () => void = noop"),
            ("cb".to_string(), Some("() => void".to_string()))
        );
    }

    #[test]
    fn test_comma_ends_declaration() {
        assert_eq!(split("a: number, b: string"), ("a".to_string(), Some("number".to_string())));
    }

    #[test]
    fn test_outermost_close_paren_ends_declaration() {
        assert_eq!(split("a: number) {"), ("a".to_string(), Some("number".to_string())));
    }

    #[test]
    fn test_modifiers_fall_away() {
        assert_eq!(
            split("public readonly y: string"),
            ("y".to_string(), Some("string".to_string()))
        );
    }

    #[test]
    fn test_optional_marker_stripped() {
        assert_eq!(split("a?: number"), ("a".to_string(), Some("number".to_string())));
    }

    #[test]
    fn test_colon_inside_object_type() {
        assert_eq!(
            split("opts: { a: number }"),
            ("opts".to_string(), Some("{ a: number }".to_string()))
        );
    }

    #[test]
    fn test_reset() {
        let mut matcher = VarDeclMatcher::new();
        for ch in "a: number".chars() {
            matcher.next(ch);
        }
        matcher.reset();
        for ch in "b".chars() {
            matcher.next(ch);
        }
        assert_eq!(matcher.finish(), ("b".to_string(), None));
    }
}
