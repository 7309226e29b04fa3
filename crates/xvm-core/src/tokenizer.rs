//! Splits a shim's target command line into arguments.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    InQuotes(char),
    InArgument,
}

const fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'' | '`')
}

const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

/// Tokenize a command line: `echo "hello world"` becomes
/// `["echo", "hello world"]`.
///
/// Quotes (`"`, `'`, `` ` ``) group until the same quote closes them and
/// always produce a token, even an empty one. A backslash outside quotes
/// takes the next character literally. Input that ends inside quotes drops
/// the unterminated token.
#[must_use]
pub fn tokenize(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut state = State::Start;
    let mut escape_pending = false;

    for c in raw.chars() {
        match state {
            State::InQuotes(quote) if c == quote => {
                tokens.push(std::mem::take(&mut current));
                state = State::Start;
            }
            State::InQuotes(_) => current.push(c),
            _ if escape_pending => {
                current.push(c);
                escape_pending = false;
            }
            _ if c == '\\' => escape_pending = true,
            _ if is_quote(c) => state = State::InQuotes(c),
            State::InArgument if is_blank(c) => {
                tokens.push(std::mem::take(&mut current));
                state = State::Start;
            }
            _ if !is_blank(c) => {
                current.push(c);
                state = State::InArgument;
            }
            _ => {}
        }
    }

    if !matches!(state, State::InQuotes(_)) && !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
