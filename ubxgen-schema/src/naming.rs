//! Name resolution for generated code.
//!
//! Qualified schema names have the form `<schema>.<group>.<message>`. Some
//! hosts nest a group's messages in a namespace that repeats the group name
//! (`UBX.CFG.CFG.PM2`); [`canonicalize`] collapses that level and keeps a
//! message from taking the name of its own group. Everything here is a pure
//! function of its arguments.

/// Separator between qualified name segments.
pub const SEPARATOR: char = '.';

/// Suffix appended to a message name equal to its group name.
pub const DISAMBIGUATION_MARKER: char = '_';

/// Returns the canonical form of a qualified name.
///
/// - `UBX.CFG.CFG.PM2` becomes `UBX.CFG.PM2`
/// - `UBX.PM2.PM2` becomes `UBX.PM2.PM2_`
///
/// Canonical names are fixed points: `canonicalize(canonicalize(x)) ==
/// canonicalize(x)`.
#[must_use]
pub fn canonicalize(qualified: &str) -> String {
    let mut segments: Vec<&str> = qualified.split(SEPARATOR).collect();
    while segments.len() >= 4 && segments[1] == segments[2] {
        segments.remove(2);
    }

    let mut canonical = segments.join(".");
    if segments.len() >= 3 && segments[segments.len() - 1] == segments[1] {
        canonical.push(DISAMBIGUATION_MARKER);
    }
    canonical
}

/// Returns the emitted type name of a message from its qualified name.
#[must_use]
pub fn message_type_name(qualified: &str) -> String {
    let canonical = canonicalize(qualified);
    match canonical.rsplit_once(SEPARATOR) {
        Some((_, last)) => last.to_string(),
        None => canonical,
    }
}

/// Returns the emitted group name (and group artifact identifier) from a
/// qualified group or message name.
#[must_use]
pub fn group_type_name(qualified: &str) -> String {
    let canonical = canonicalize(qualified);
    let mut segments = canonical.split(SEPARATOR);
    let first = segments.next().unwrap_or_default();
    segments.next().unwrap_or(first).to_string()
}

/// Returns the dispatcher hook name for a message, `on<Group>_<Message>`.
#[must_use]
pub fn hook_name(group: &str, message: &str) -> String {
    format!("on{}_{}", group, message)
}

/// Returns the dispatcher type name, `Parse<Protocol>`.
#[must_use]
pub fn dispatcher_name(protocol: &str) -> String {
    format!("Parse{}", protocol)
}

/// Returns the dispatcher handler trait name, `Parse<Protocol>Handler`.
#[must_use]
pub fn handler_trait_name(protocol: &str) -> String {
    format!("Parse{}Handler", protocol)
}

/// Returns the shared error hook name, `on<Protocol>err`.
#[must_use]
pub fn error_hook_name(protocol: &str) -> String {
    format!("on{}err", protocol)
}

/// Returns the artifact guard token, `__<NAME>_RS__`.
#[must_use]
pub fn guard_token(name: &str) -> String {
    format!("__{}_RS__", name.to_uppercase())
}

/// Formats a class or message ID as two uppercase hex digits.
#[must_use]
pub fn format_id(id: u8) -> String {
    format!("{:02X}", id)
}

/// Rust keywords and reserved words (2024 edition).
pub const RUST_KEYWORDS: [&str; 52] = [
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
    "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
    "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do",
    "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: [&str; 5] = ["crate", "self", "Self", "super", "_"];

/// Returns true if `name` is a plain ASCII identifier.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns true if `name` is a Rust keyword.
#[must_use]
pub fn is_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Returns true if `name` can name a generated field.
#[must_use]
pub fn is_field_name(name: &str) -> bool {
    is_identifier(name) && !NON_RAW_KEYWORDS.contains(&name)
}

/// Returns true if `name` can name a generated type or module.
#[must_use]
pub fn is_type_name(name: &str) -> bool {
    is_identifier(name) && !is_keyword(name)
}

/// Returns the field identifier, using a raw identifier for keywords.
#[must_use]
pub fn field_ident(name: &str) -> String {
    if is_keyword(name) {
        format!("r#{}", name)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_collapses_group_namespace() {
        assert_eq!(canonicalize("UBX.CFG.CFG.PM2"), "UBX.CFG.PM2");
        assert_eq!(canonicalize("UBX.NAV.NAV.POSLLH"), "UBX.NAV.POSLLH");
        assert_eq!(canonicalize("UBX.NAV.POSLLH"), "UBX.NAV.POSLLH");
    }

    #[test]
    fn test_canonicalize_disambiguates_group_collision() {
        assert_eq!(canonicalize("UBX.PM2.PM2"), "UBX.PM2.PM2_");
        assert_eq!(canonicalize("UBX.PM2.PM2.PM2"), "UBX.PM2.PM2_");
        assert_eq!(canonicalize("UBX.ACK.ACK.ACK"), "UBX.ACK.ACK_");
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        let names = [
            "UBX",
            "UBX.NAV",
            "UBX.NAV.POSLLH",
            "UBX.CFG.CFG.PM2",
            "UBX.PM2.PM2",
            "UBX.PM2.PM2.PM2",
            "UBX.CFG.CFG.CFG.PRT",
            "UBX.A.A.A.A",
            "UBX.PM2.PM2_",
        ];
        for name in names {
            let once = canonicalize(name);
            assert_eq!(canonicalize(&once), once, "not a fixed point: {}", name);
        }
    }

    #[test]
    fn test_group_and_root_names_unchanged() {
        assert_eq!(canonicalize("UBX"), "UBX");
        assert_eq!(canonicalize("UBX.NAV"), "UBX.NAV");
        assert_eq!(canonicalize("UBX.UBX"), "UBX.UBX");
    }

    #[test]
    fn test_message_type_name() {
        assert_eq!(message_type_name("UBX.NAV.POSLLH"), "POSLLH");
        assert_eq!(message_type_name("UBX.CFG.CFG.PM2"), "PM2");
        assert_eq!(message_type_name("UBX.PM2.PM2"), "PM2_");
        assert_eq!(message_type_name("UBX.PM2.PM2.PM2"), "PM2_");
    }

    #[test]
    fn test_collision_free_with_group() {
        for qualified in ["UBX.PM2.PM2", "UBX.ACK.ACK.ACK", "X.Y.Y"] {
            assert_ne!(message_type_name(qualified), group_type_name(qualified));
        }
    }

    #[test]
    fn test_group_type_name() {
        assert_eq!(group_type_name("UBX.NAV"), "NAV");
        assert_eq!(group_type_name("UBX.NAV.POSLLH"), "NAV");
        assert_eq!(group_type_name("UBX.CFG.CFG.PM2"), "CFG");
        assert_eq!(group_type_name("NAV"), "NAV");
    }

    #[test]
    fn test_hook_name() {
        assert_eq!(hook_name("NAV", "POSLLH"), "onNAV_POSLLH");
        assert_eq!(hook_name("PM2", "PM2_"), "onPM2_PM2_");
    }

    #[test]
    fn test_dispatcher_names() {
        assert_eq!(dispatcher_name("UBX"), "ParseUBX");
        assert_eq!(handler_trait_name("UBX"), "ParseUBXHandler");
        assert_eq!(error_hook_name("UBX"), "onUBXerr");
    }

    #[test]
    fn test_guard_token() {
        assert_eq!(guard_token("NAV"), "__NAV_RS__");
        assert_eq!(guard_token("ParseUBX"), "__PARSEUBX_RS__");
    }

    #[test]
    fn test_format_id() {
        assert_eq!(format_id(4), "04");
        assert_eq!(format_id(255), "FF");
        assert_eq!(format_id(0), "00");
        assert_eq!(format_id(0x3a), "3A");
        for id in 0..=u8::MAX {
            let formatted = format_id(id);
            assert_eq!(formatted.len(), 2);
            assert!(formatted.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("iTOW"));
        assert!(is_identifier("_reserved1"));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier("pos-llh"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("_"));

        assert!(is_type_name("POSLLH"));
        assert!(!is_type_name("type"));

        assert!(is_field_name("type"));
        assert!(!is_field_name("self"));
    }

    #[test]
    fn test_field_ident_escapes_keywords() {
        assert_eq!(field_ident("type"), "r#type");
        assert_eq!(field_ident("lon"), "lon");
    }
}
