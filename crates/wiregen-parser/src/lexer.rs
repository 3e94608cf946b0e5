//! Tokenizer for the declaration subset.

/// Token classes the parser distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Number,
    /// A quoted string literal, quotes included in the text.
    Str,
    /// Any single punctuation character.
    Punct,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
}

/// Tokenize `source`, skipping whitespace and `//` / `/* */` comments.
///
/// Lexing never fails: unknown characters become single-character `Punct`
/// tokens and are rejected by the parser with a located error instead.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    let mut line: u32 = 1;
    let mut column: u32 = 1;

    macro_rules! advance {
        ($c:expr) => {{
            if $c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }};
    }

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            advance!(c);
            continue;
        }
        if c == '/' {
            let mut lookahead = chars.clone();
            lookahead.next();
            match lookahead.peek() {
                Some('/') => {
                    for c in chars.by_ref() {
                        advance!(c);
                        if c == '\n' {
                            break;
                        }
                    }
                    continue;
                }
                Some('*') => {
                    chars.next();
                    advance!('/');
                    chars.next();
                    advance!('*');
                    let mut prev = '\0';
                    for c in chars.by_ref() {
                        advance!(c);
                        if prev == '*' && c == '/' {
                            break;
                        }
                        prev = c;
                    }
                    continue;
                }
                _ => {}
            }
        }

        let start_line = line;
        let start_column = column;

        if c.is_alphabetic() || c == '_' {
            let mut text = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_alphanumeric() || c == '_' {
                    text.push(c);
                    chars.next();
                    advance!(c);
                } else {
                    break;
                }
            }
            tokens.push(Token {
                kind: TokenKind::Ident,
                text,
                line: start_line,
                column: start_column,
            });
            continue;
        }
        if c.is_ascii_digit() {
            let mut text = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_digit() || c == 'x' || c == 'X' || c.is_ascii_hexdigit() || c == '_' {
                    text.push(c);
                    chars.next();
                    advance!(c);
                } else {
                    break;
                }
            }
            tokens.push(Token {
                kind: TokenKind::Number,
                text,
                line: start_line,
                column: start_column,
            });
            continue;
        }
        if c == '"' {
            let mut text = String::from('"');
            chars.next();
            advance!(c);
            let mut escaped = false;
            while let Some(&c) = chars.peek() {
                text.push(c);
                chars.next();
                advance!(c);
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    break;
                }
            }
            tokens.push(Token {
                kind: TokenKind::Str,
                text,
                line: start_line,
                column: start_column,
            });
            continue;
        }

        chars.next();
        advance!(c);
        tokens.push(Token {
            kind: TokenKind::Punct,
            text: c.to_string(),
            line: start_line,
            column: start_column,
        });
    }
    tokens
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    fn texts(source: &str) -> Vec<String> {
        tokenize(source).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn tokenize___splits_idents_and_punctuation() {
        assert_eq!(
            texts("class A : B<int> {}"),
            vec!["class", "A", ":", "B", "<", "int", ">", "{", "}"]
        );
    }

    #[test]
    fn tokenize___skips_line_and_block_comments() {
        let source = "a // comment\nb /* multi\nline */ c";
        assert_eq!(texts(source), vec!["a", "b", "c"]);
    }

    #[test]
    fn tokenize___tracks_line_and_column() {
        let tokens = tokenize("a\n  b");

        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (2, 3));
    }

    #[test]
    fn tokenize___keeps_string_literals_whole() {
        let tokens = tokenize(r#"[Note("a, b")]"#);
        let strings: Vec<&Token> = tokens.iter().filter(|t| t.kind == TokenKind::Str).collect();

        assert_eq!(strings.len(), 1);
        assert_eq!(strings[0].text, r#""a, b""#);
    }

    #[test]
    fn tokenize___closing_angle_brackets_stay_separate() {
        // `List<List<int>>` must not fuse `>>` into one token.
        let tokens = texts("List<List<int>>");
        assert_eq!(tokens, vec!["List", "<", "List", "<", "int", ">", ">"]);
    }
}
