//! Identifier canonicalization for schema names (`queue-name`, `frame.min-size`).
//!
//! Schema identifiers are lowercase segments joined by `-` or `.`. Every
//! synthesized symbol is derived from one of the forms below:
//!
//! | Form        | `queue-name`  | Used for                         |
//! |-------------|---------------|----------------------------------|
//! | lower camel | `queueName`   | runtime field keys, docs         |
//! | upper camel | `QueueName`   | type names                       |
//! | constant    | `QUEUE_NAME`  | constants                        |
//! | snake       | `queue_name`  | Rust fields and functions        |

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use",
    "where", "while", "abstract", "become", "box", "do", "final", "macro", "override", "priv",
    "typeof", "unsized", "virtual", "yield", "try",
];

/// Path keywords that cannot be raw identifiers; they get a trailing `_`.
const PATH_KEYWORDS: &[&str] = &["crate", "self", "super", "Self"];

/// Split on `-` and `.`, dropping empty segments.
pub fn segments(ident: &str) -> impl Iterator<Item = &str> {
    ident.split(['-', '.']).filter(|s| !s.is_empty())
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `queue-name` -> `queueName`. The first segment is kept as written.
pub fn lower_camel(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    for (i, seg) in segments(ident).enumerate() {
        if i == 0 {
            out.push_str(seg);
        } else {
            out.push_str(&capitalize(seg));
        }
    }
    out
}

/// `queue-name` -> `QueueName`.
pub fn upper_camel(ident: &str) -> String {
    segments(ident).map(capitalize).collect()
}

/// `frame-min-size` -> `FRAME_MIN_SIZE`. A leading digit gets an `N` prefix.
pub fn constant(ident: &str) -> String {
    let name = segments(ident).collect::<Vec<_>>().join("_").to_uppercase();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("N{}", name)
    } else {
        name
    }
}

/// `queue-name` -> `queue_name`, escaped so it is always a valid Rust identifier.
pub fn snake(ident: &str) -> String {
    let joined = segments(ident).collect::<Vec<_>>().join("_").to_lowercase();
    rust_ident(joined)
}

/// Upper camel form that is always a valid Rust type name.
pub fn type_name(ident: &str) -> String {
    let name = upper_camel(ident);
    if name.starts_with(|c: char| c.is_ascii_digit()) || name == "Self" {
        format!("N{}", name)
    } else {
        name
    }
}

/// Type of one method: `connection`, `start-ok` -> `ConnectionStartOk`.
pub fn method_type_name(class: &str, method: &str) -> String {
    format!("{}{}", type_name(class), upper_camel(method))
}

/// Unescaped snake segments for use inside a longer identifier.
fn fragment(ident: &str) -> String {
    segments(ident).collect::<Vec<_>>().join("_").to_lowercase()
}

/// Function stem of one method: `connection`, `start-ok` -> `connection_start_ok`.
pub fn method_fn_stem(class: &str, method: &str) -> String {
    format!("{}_{}", fragment(class), fragment(method))
}

/// Function stem of a class header: `basic` -> `basic_header`.
pub fn header_fn_stem(class: &str) -> String {
    format!("{}_header", fragment(class))
}

fn rust_ident(name: String) -> String {
    if PATH_KEYWORDS.contains(&name.as_str()) {
        format!("{}_", name)
    } else if RUST_KEYWORDS.contains(&name.as_str()) {
        format!("r#{}", name)
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", name)
    } else {
        name
    }
}
