//! Python literals and a small expression tree for emitting Flet calls.
//!
//! Calls whose arguments are all plain literals and fit on one line render
//! inline; everything else renders one argument per line with 4-space
//! indentation.

/// Longest call rendered on a single line.
const INLINE_WIDTH: usize = 72;

const INDENT: &str = "    ";

/// Double-quoted Python string literal.
pub fn string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Python numeric literal. Whole numbers print without a fraction.
///
/// Callers must not pass non-finite values; they render as `0`.
pub fn number(n: f64) -> String {
    if !n.is_finite() {
        return "0".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

pub fn boolean(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}

/// Round a coordinate to whole pixels, halves rounding up.
pub fn coordinate(v: f64) -> i64 {
    if v.is_finite() {
        (v + 0.5).floor() as i64
    } else {
        0
    }
}

/// Whether `name` is a valid (ASCII) Python identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && !is_keyword(name)
}

fn is_keyword(name: &str) -> bool {
    matches!(
        name,
        "False" | "None" | "True" | "and" | "as" | "assert" | "async" | "await" | "break"
            | "class" | "continue" | "def" | "del" | "elif" | "else" | "except" | "finally"
            | "for" | "from" | "global" | "if" | "import" | "in" | "is" | "lambda"
            | "nonlocal" | "not" | "or" | "pass" | "raise" | "return" | "try" | "while"
            | "with" | "yield"
    )
}

/// A Python expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Code emitted verbatim: literals, names, attribute paths.
    Raw(String),
    Call(Call),
    List(Vec<Expr>),
    /// `lambda _: <body>`
    Lambda(Box<Expr>),
}

impl Expr {
    pub fn raw(code: impl Into<String>) -> Self {
        Expr::Raw(code.into())
    }

    pub fn str(s: &str) -> Self {
        Expr::Raw(string(s))
    }

    pub fn num(n: f64) -> Self {
        Expr::Raw(number(n))
    }

    pub fn int(n: i64) -> Self {
        Expr::Raw(n.to_string())
    }

    pub fn bool(b: bool) -> Self {
        Expr::Raw(boolean(b).to_string())
    }

    pub fn lambda(body: impl Into<Expr>) -> Self {
        Expr::Lambda(Box::new(body.into()))
    }

    /// Render with continuation lines indented from `depth`.
    pub fn render(&self, depth: usize) -> String {
        let mut out = String::new();
        self.write(&mut out, depth);
        out
    }

    fn write(&self, out: &mut String, depth: usize) {
        match self {
            Expr::Raw(code) => out.push_str(code),
            Expr::Call(call) => call.write(out, depth),
            Expr::Lambda(body) => {
                out.push_str("lambda _: ");
                body.write(out, depth);
            }
            Expr::List(items) => {
                if let Some(inline) = inline_list(items) {
                    out.push_str(&inline);
                    return;
                }
                out.push_str("[\n");
                write_items(out, depth, items.iter().map(|item| (None, item)));
                push_indent(out, depth);
                out.push(']');
            }
        }
    }

    fn as_raw(&self) -> Option<&str> {
        match self {
            Expr::Raw(code) => Some(code),
            _ => None,
        }
    }
}

impl From<Call> for Expr {
    fn from(call: Call) -> Self {
        Expr::Call(call)
    }
}

/// A call with positional and keyword arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    name: String,
    args: Vec<Expr>,
    kwargs: Vec<(String, Expr)>,
}

impl Call {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            kwargs: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl Into<Expr>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn kwarg(mut self, name: &str, value: impl Into<Expr>) -> Self {
        self.kwargs.push((name.to_string(), value.into()));
        self
    }

    /// Keyword argument that is left out entirely when `value` is `None`.
    pub fn kwarg_opt(self, name: &str, value: Option<impl Into<Expr>>) -> Self {
        match value {
            Some(value) => self.kwarg(name, value),
            None => self,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Keyword argument value by name.
    pub fn get(&self, name: &str) -> Option<&Expr> {
        self.kwargs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn render(&self, depth: usize) -> String {
        let mut out = String::new();
        self.write(&mut out, depth);
        out
    }

    fn write(&self, out: &mut String, depth: usize) {
        out.push_str(&self.name);
        if self.args.is_empty() && self.kwargs.is_empty() {
            out.push_str("()");
            return;
        }
        if let Some(inline) = self.inline() {
            out.push_str(&inline);
            return;
        }

        out.push_str("(\n");
        let items = self
            .args
            .iter()
            .map(|arg| (None, arg))
            .chain(self.kwargs.iter().map(|(k, v)| (Some(k.as_str()), v)));
        write_items(out, depth, items);
        push_indent(out, depth);
        out.push(')');
    }

    /// `(a, k=v)` when every argument is a plain literal and the whole call
    /// stays short.
    fn inline(&self) -> Option<String> {
        let mut parts = Vec::with_capacity(self.args.len() + self.kwargs.len());
        for arg in &self.args {
            parts.push(arg.as_raw()?.to_string());
        }
        for (key, value) in &self.kwargs {
            parts.push(format!("{}={}", key, value.as_raw()?));
        }
        let inline = format!("({})", parts.join(", "));
        (self.name.len() + inline.len() <= INLINE_WIDTH && !inline.contains('\n')).then_some(inline)
    }
}

fn inline_list(items: &[Expr]) -> Option<String> {
    let parts = items
        .iter()
        .map(|item| item.as_raw())
        .collect::<Option<Vec<_>>>()?;
    let inline = format!("[{}]", parts.join(", "));
    (inline.len() <= INLINE_WIDTH).then_some(inline)
}

fn write_items<'a>(
    out: &mut String,
    depth: usize,
    items: impl Iterator<Item = (Option<&'a str>, &'a Expr)>,
) {
    let mut first = true;
    for (key, value) in items {
        if !first {
            out.push_str(",\n");
        }
        first = false;
        push_indent(out, depth + 1);
        if let Some(key) = key {
            out.push_str(key);
            out.push('=');
        }
        value.write(out, depth + 1);
    }
    out.push('\n');
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
