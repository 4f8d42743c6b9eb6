//! Registry artifact rendering.
//!
//! The artifact is TypeScript, the language contracts are authored in. It
//! imports every contract module, maps each contract's runtime `route` to
//! the contract, and exports lookup aliases for editors and type checkers.
//! The aliases carry no runtime behavior.

use std::fmt::Write;

use crate::identifier::DiscoveredFile;

/// First line of every generated artifact.
pub const GENERATED_HEADER: &str = "// Generated by contractify. Do not edit by hand.";

const LOOKUP_ALIASES: &str = r#"export type ContractsMap = typeof contracts
export type Route = keyof ContractsMap

export type MethodsOf<R extends Route> = Extract<keyof ContractsMap[R]["methods"], string>

// Distributive over unions of routes and methods.
export type MethodSpec<R extends Route, M extends string> =
  R extends Route
    ? M extends keyof ContractsMap[R]["methods"]
      ? NonNullable<ContractsMap[R]["methods"][M]>
      : never
    : never

export type QuerySchema<R extends Route, M extends string> =
  MethodSpec<R, M> extends { query?: infer Q } ? Q : undefined

export type BodySchema<R extends Route, M extends string> =
  MethodSpec<R, M> extends { body?: infer B } ? B : undefined

export type ParamsSchema<R extends Route, M extends string> =
  MethodSpec<R, M> extends { params?: infer P } ? P : undefined

export type SuccessSchema<R extends Route, M extends string> =
  MethodSpec<R, M> extends { response: { success: infer S } } ? S : never

export type ErrorSchema<R extends Route, M extends string> =
  MethodSpec<R, M> extends { response: { error: infer E } } ? E : never
"#;

/// Render the registry for entries in discovery order.
///
/// Pure: the same entries always produce the same bytes.
pub fn render_registry(entries: &[DiscoveredFile]) -> String {
    let mut out = String::with_capacity(LOOKUP_ALIASES.len() + entries.len() * 96);

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{GENERATED_HEADER}");
    out.push('\n');

    for entry in entries {
        let _ = writeln!(
            out,
            "import {} from \"{}\"",
            entry.identifier,
            escape_string_literal(&entry.import_reference)
        );
    }
    out.push('\n');

    out.push_str("export const contracts = {\n");
    for entry in entries {
        let _ = writeln!(out, "  [{0}.route]: {0},", entry.identifier);
    }
    out.push_str("} as const\n\n");

    out.push_str(LOOKUP_ALIASES);
    out
}

/// Escape text for a double-quoted TypeScript string literal.
fn escape_string_literal(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    escaped
}
