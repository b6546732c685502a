//! Parser for bracketed (Penn Treebank style) tree notation.

use std::fmt;

use causeway_core::errors::SentenceError;

/// A parsed bracketed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bracketed {
    Leaf(String),
    Node { label: String, children: Vec<Bracketed> },
}

impl Bracketed {
    pub fn label(&self) -> &str {
        match self {
            Self::Leaf(label) | Self::Node { label, .. } => label,
        }
    }

    pub fn children(&self) -> &[Bracketed] {
        match self {
            Self::Leaf(_) => &[],
            Self::Node { children, .. } => children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }
}

impl fmt::Display for Bracketed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(label) => f.write_str(label),
            Self::Node { label, children } => {
                write!(f, "({label}")?;
                for child in children {
                    write!(f, " {child}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Parse exactly one tree. Surrounding whitespace is ignored.
pub fn parse_bracketed(input: &str) -> Result<Bracketed, SentenceError> {
    let mut scanner = Scanner { input, pos: 0 };
    let tree = scanner.tree()?;
    scanner.skip_whitespace();
    if scanner.pos < input.len() {
        return Err(scanner.error("trailing input after tree"));
    }
    Ok(tree)
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl Scanner<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn atom(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == '(' || c == ')' {
                break;
            }
            self.pos += c.len_utf8();
        }
        self.input[start..self.pos].to_string()
    }

    fn tree(&mut self) -> Result<Bracketed, SentenceError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some(')') => Err(self.error("unexpected ')'")),
            Some('(') => {
                self.pos += 1;
                self.skip_whitespace();
                let label = match self.peek() {
                    Some('(') | Some(')') | None => String::new(),
                    Some(_) => self.atom(),
                };
                let mut children = Vec::new();
                loop {
                    self.skip_whitespace();
                    match self.peek() {
                        Some(')') => {
                            self.pos += 1;
                            break;
                        }
                        None => return Err(self.error("unclosed '('")),
                        Some(_) => children.push(self.tree()?),
                    }
                }
                Ok(Bracketed::Node { label, children })
            }
            Some(_) => Ok(Bracketed::Leaf(self.atom())),
        }
    }

    fn error(&self, message: &str) -> SentenceError {
        SentenceError::MalformedTree {
            offset: self.pos,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_tree() {
        let tree = parse_bracketed("(S (NP (NN Smoking)) (VP (VBZ causes)))").unwrap();
        assert_eq!(tree.label(), "S");
        assert_eq!(tree.children().len(), 2);
        assert_eq!(tree.children()[0].children()[0].children()[0], Bracketed::Leaf("Smoking".into()));
    }

    #[test]
    fn display_round_trips_whitespace_variants() {
        let tree = parse_bracketed("  (A\n  (B  c)\t(D e) )\n").unwrap();
        assert_eq!(tree.to_string(), "(A (B c) (D e))");
    }

    #[test]
    fn empty_top_label_is_allowed() {
        let tree = parse_bracketed("( (S (NN x)))").unwrap();
        assert_eq!(tree.label(), "");
        assert_eq!(tree.to_string(), "( (S (NN x)))");
    }

    #[test]
    fn rejects_unbalanced_input() {
        assert!(matches!(
            parse_bracketed("(A (B c)"),
            Err(SentenceError::MalformedTree { .. })
        ));
        assert!(parse_bracketed("(A) (B)").is_err());
        assert!(parse_bracketed(")").is_err());
    }
}
