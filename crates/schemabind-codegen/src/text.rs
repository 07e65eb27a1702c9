//! Text layout helpers shared by the emitters.

use schemabind_core::GeneratorConfig;

/// Indent every non-empty line of `text` by `level` tabs.
pub fn indent(level: usize, text: &str) -> String {
    let prefix = "\t".repeat(level);
    let mut result = String::with_capacity(text.len() + level * 8);

    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            result.push('\n');
        }
        if !line.is_empty() {
            result.push_str(&prefix);
            result.push_str(line);
        }
    }

    result
}

/// A braced block, optionally preceded by a header line such as `if (...)`.
pub fn block(header: &str, body: &str) -> String {
    let mut result = String::new();
    if !header.is_empty() {
        result.push_str(header);
        result.push('\n');
    }
    result.push_str("{\n");
    if !body.is_empty() {
        result.push_str(&indent(1, body));
        result.push('\n');
    }
    result.push('}');
    result
}

/// `namespace a {` lines for each segment, outermost first.
pub fn open_namespaces(namespaces: &[String]) -> String {
    namespaces
        .iter()
        .map(|ns| format!("namespace {ns} {{"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Matching `} // namespace a` lines, innermost first.
pub fn close_namespaces(namespaces: &[String]) -> String {
    namespaces
        .iter()
        .rev()
        .map(|ns| format!("}} // namespace {ns}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// First line of every generated unit.
pub fn banner(config: &GeneratorConfig) -> String {
    format!("// Generated by {}\n", config.title)
}
