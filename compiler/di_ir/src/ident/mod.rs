//! Go identifier helpers.
//!
//! Naming rules for emitted variables and import aliases. Everything here
//! is pure string manipulation; no state.

/// Go's reserved keywords.
const KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Predeclared identifiers of the universe block.
const PREDECLARED: &[&str] = &[
    "any",
    "append",
    "bool",
    "byte",
    "cap",
    "clear",
    "close",
    "comparable",
    "complex",
    "complex128",
    "complex64",
    "copy",
    "delete",
    "error",
    "false",
    "float32",
    "float64",
    "imag",
    "int",
    "int16",
    "int32",
    "int64",
    "int8",
    "iota",
    "len",
    "make",
    "max",
    "min",
    "new",
    "nil",
    "panic",
    "print",
    "println",
    "real",
    "recover",
    "rune",
    "string",
    "true",
    "uint",
    "uint16",
    "uint32",
    "uint64",
    "uint8",
    "uintptr",
];

pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

pub fn is_predeclared(s: &str) -> bool {
    PREDECLARED.contains(&s)
}

/// True if an emitted local must not use this name.
///
/// `err` is reserved for error results.
pub fn is_reserved(s: &str) -> bool {
    s == "err" || s == "_" || is_keyword(s) || is_predeclared(s)
}

/// Exported identifiers start with an uppercase letter.
pub fn is_exported(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_uppercase)
}

/// Drop every character that cannot appear in an identifier.
pub fn sanitize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Lower-camel form of a type name, Go style.
///
/// A leading initialism is lowercased as a unit: `Web` becomes `web`,
/// `DB` becomes `db`, `HTTPClient` becomes `httpClient`.
pub fn lower_camel(s: &str) -> String {
    let chars: Vec<char> = sanitize(s).chars().collect();
    let upper = chars.iter().take_while(|c| c.is_uppercase()).count();
    let lower_until = match upper {
        0 => 0,
        n if n == chars.len() => n,
        1 => 1,
        // The last capital of the run starts the next word.
        n if chars[n].is_lowercase() => n - 1,
        n => n,
    };
    chars
        .iter()
        .enumerate()
        .flat_map(|(i, c)| {
            let lowered: Vec<char> = if i < lower_until {
                c.to_lowercase().collect()
            } else {
                vec![*c]
            };
            lowered
        })
        .collect()
}

/// Uppercase the first character.
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Standard library paths have no dot in their first element.
pub fn is_std_import(path: &str) -> bool {
    let first = path.split('/').next().unwrap_or(path);
    !first.contains('.')
}

/// The package name an import path is assumed to declare.
///
/// Follows the usual conventions: a trailing major-version element is
/// skipped (`example.com/mod/v2` is `mod`), `.vN` suffixes are dropped
/// (`gopkg.in/yaml.v3` is `yaml`), `go-` prefixes and `-go` suffixes are
/// dropped, and anything left that is not an identifier character goes.
pub fn assumed_package_name(path: &str) -> String {
    let mut segments = path.rsplit('/').filter(|s| !s.is_empty());
    let mut last = segments.next().unwrap_or("");
    if is_major_version(last) {
        if let Some(prev) = segments.next() {
            last = prev;
        }
    }
    if let Some(dot) = last.rfind(".v") {
        if last[dot + 2..].chars().all(|c| c.is_ascii_digit()) && dot + 2 < last.len() {
            last = &last[..dot];
        }
    }
    let last = last.strip_prefix("go-").unwrap_or(last);
    let last = last.strip_suffix("-go").unwrap_or(last);
    let name = sanitize(last).to_lowercase();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("pkg{name}")
    } else {
        name
    }
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}
