//! Line-level syntax check for declaration drafts.
//!
//! The builtin formatter feeds every line through [`check_line`] after
//! comments have been stripped. Accepted lines:
//!
//! ```text
//! declare module "<name>" {
//! class <Name> [extends <Type>] { [}]
//! [static] <name>[?]: <Type>;
//! [static] <name>(<arg>[?]: <Type>, ...)[: <Type>];
//! }...
//! ```
//!
//! where `<Type>` is a `|` union of dotted names with optional generic
//! arguments and `[]` suffixes.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Ident(&'a str),
    Str,
    Punct(char),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(name) => write!(f, "'{name}'"),
            Self::Str => f.write_str("string literal"),
            Self::Punct(c) => write!(f, "'{c}'"),
        }
    }
}

const PUNCTUATION: &str = "{}()<>[]:;,?|.";

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn tokenize(code: &str) -> Result<Vec<Token<'_>>, String> {
    let mut tokens = Vec::new();
    let mut chars = code.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '"' | '\'' => {
                let mut closed = false;
                while let Some((_, next)) = chars.next() {
                    if next == '\\' {
                        chars.next();
                    } else if next == c {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(format!("unterminated string literal starting with {c}"));
                }
                tokens.push(Token::Str);
            }
            c if is_ident_start(c) => {
                let mut end = start + c.len_utf8();
                while let Some(&(index, next)) = chars.peek() {
                    if !is_ident_continue(next) {
                        break;
                    }
                    end = index + next.len_utf8();
                    chars.next();
                }
                tokens.push(Token::Ident(&code[start..end]));
            }
            c if PUNCTUATION.contains(c) => tokens.push(Token::Punct(c)),
            c => return Err(format!("unexpected character '{c}'")),
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<Token<'a>> {
        self.tokens.get(self.pos + offset).copied()
    }

    const fn advance(&mut self) {
        self.pos += 1;
    }

    fn unexpected(&self, expected: &str) -> String {
        self.peek().map_or_else(
            || format!("expected {expected} before end of line"),
            |token| format!("expected {expected}, found {token}"),
        )
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(Token::Punct(c)) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char) -> Result<(), String> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{c}'")))
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek() == Some(Token::Ident(keyword)) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn ident(&mut self, what: &str) -> Result<&'a str, String> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    fn finish(&self) -> Result<(), String> {
        self.peek()
            .map_or(Ok(()), |token| Err(format!("unexpected {token} after declaration")))
    }

    fn module_header(&mut self) -> Result<(), String> {
        if !self.eat_keyword("module") {
            return Err(self.unexpected("'module'"));
        }
        if self.peek() != Some(Token::Str) {
            return Err(self.unexpected("module name string"));
        }
        self.advance();
        self.expect('{')
    }

    fn class_header(&mut self) -> Result<(), String> {
        self.ident("class name")?;
        if self.eat_keyword("extends") {
            self.type_ref()?;
        }
        self.expect('{')?;
        self.eat('}');
        Ok(())
    }

    fn member(&mut self) -> Result<(), String> {
        if self.peek() == Some(Token::Ident("static"))
            && matches!(self.peek_at(1), Some(Token::Ident(_)))
        {
            self.advance();
        }
        self.ident("member name")?;
        self.eat('?');

        if self.eat('(') {
            self.parameters()?;
            self.expect(')')?;
            if self.eat(':') {
                self.type_ref()?;
            }
        } else {
            self.expect(':')?;
            self.type_ref()?;
        }
        self.expect(';')
    }

    fn parameters(&mut self) -> Result<(), String> {
        if self.peek() == Some(Token::Punct(')')) {
            return Ok(());
        }
        loop {
            self.ident("parameter name")?;
            self.eat('?');
            self.expect(':')?;
            self.type_ref()?;
            if !self.eat(',') {
                return Ok(());
            }
        }
    }

    fn type_ref(&mut self) -> Result<(), String> {
        self.type_primary()?;
        while self.eat('|') {
            self.type_primary()?;
        }
        Ok(())
    }

    fn type_primary(&mut self) -> Result<(), String> {
        self.ident("type name")?;
        while self.eat('.') {
            self.ident("type name")?;
        }
        if self.eat('<') {
            self.type_ref()?;
            while self.eat(',') {
                self.type_ref()?;
            }
            self.expect('>')?;
        }
        while self.eat('[') {
            self.expect(']')?;
        }
        Ok(())
    }
}

/// Checks one line of code with comments already removed.
///
/// Blank input is accepted. The error is a short description of the first
/// problem found.
pub fn check_line(code: &str) -> Result<(), String> {
    let mut parser = Parser {
        tokens: tokenize(code)?,
        pos: 0,
    };

    match parser.peek() {
        None => return Ok(()),
        Some(Token::Punct('}')) => {
            while parser.eat('}') {}
        }
        Some(Token::Ident("declare")) => {
            parser.advance();
            parser.module_header()?;
        }
        Some(Token::Ident("class")) => {
            parser.advance();
            parser.class_header()?;
        }
        Some(Token::Ident(_)) => parser.member()?,
        Some(token) => return Err(format!("unexpected {token} at start of line")),
    }

    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_emitted_shapes() {
        for line in [
            "",
            "   ",
            "declare module \"atom\" {",
            "declare module 'atom-shell' {",
            "class Point {",
            "class Point { ",
            "class GitRepository extends Repository {",
            "class Empty {}",
            "}",
            "}}",
            "static version: string;",
            "commands: CommandRegistry;",
            "constructor();",
            "constructor(taskPath: string);",
            "static fromObject(object: Point): Point;",
            "onDidChange(keyPath: string, options?: Object, callback: Function): Disposable;",
            "getRanges(): Range[] | Point;",
            "load(): Promise<any>;",
            "items(): any[];",
            "nested(map: Map<string, any[]>): Atom.Workspace;",
            "static: any;",
            "$element: HTMLElement;",
        ] {
            assert_eq!(check_line(line), Ok(()), "{line:?}");
        }
    }

    #[test]
    fn test_rejects_unbalanced_summary_capture() {
        let err = check_line("p: Config} or a {Project;").unwrap_err();
        assert_eq!(err, "expected ';', found '}'");
    }

    #[test]
    fn test_rejects_malformed_members() {
        for (line, message) in [
            ("p: ;", "expected type name, found ';'"),
            ("p: any", "expected ';' before end of line"),
            ("p any;", "expected ':', found 'any'"),
            ("foo(a string): void;", "expected ':', found 'string'"),
            ("foo(a: string: void;", "expected ')', found ':'"),
            ("foo(): ;", "expected type name, found ';'"),
            ("x: Array<string;", "expected '>', found ';'"),
            ("x: any[;", "expected ']', found ';'"),
            ("x: any; y: any;", "unexpected 'y' after declaration"),
            ("x: foo-bar;", "unexpected character '-'"),
        ] {
            assert_eq!(check_line(line).unwrap_err(), message, "{line:?}");
        }
    }

    #[test]
    fn test_rejects_malformed_headers() {
        assert_eq!(
            check_line("declare namespace atom {").unwrap_err(),
            "expected 'module', found 'namespace'"
        );
        assert_eq!(
            check_line("declare module atom {").unwrap_err(),
            "expected module name string, found 'atom'"
        );
        assert_eq!(
            check_line("class {").unwrap_err(),
            "expected class name, found '{'"
        );
        assert_eq!(
            check_line("class A extends {").unwrap_err(),
            "expected type name, found '{'"
        );
        assert_eq!(
            check_line("} class A {").unwrap_err(),
            "unexpected 'class' after declaration"
        );
        assert_eq!(check_line(": any;").unwrap_err(), "unexpected ':' at start of line");
    }

    #[test]
    fn test_unterminated_string() {
        assert!(
            check_line("declare module \"atom {")
                .unwrap_err()
                .contains("unterminated string")
        );
    }
}
