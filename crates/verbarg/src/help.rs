//! Usage, verb list, and per-verb parameter help.
//!
//! Every `print_*` function writes the text produced by its `render_*` twin.

use std::io::{self, Write};

use crate::registry::{HELP_VERB, Registry};
use crate::schema::{ParamDef, VerbDef};

/// Width of the verb name field in the verb list.
pub const VERB_COLUMN: usize = 20;
/// Width of the alias field in verb help; longer alias text wraps.
pub const ALIAS_COLUMN: usize = 50;

const INDENT: &str = "  ";
const GAP: &str = "  ";

pub fn render_usage(registry: &Registry) -> String {
    let mut out = format!(
        "Usage: {} [verb] [param value] [param value] ...\n",
        registry.program()
    );
    out.push_str(&render_verb_list(registry));
    out
}

pub fn render_verb_list(registry: &Registry) -> String {
    let mut out = String::from("List of verbs:\n");
    for verb in registry.verbs() {
        let line = format!(
            "{INDENT}{:<width$} {}",
            verb.name,
            verb.description.trim(),
            width = VERB_COLUMN
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.push_str(&format!(
        "\nRun '{} {HELP_VERB} <verb>' for the parameters of a verb.\n",
        registry.program()
    ));
    out
}

fn format_aliases(param: &ParamDef) -> String {
    let mut out = param.aliases.join(" | ");
    if param.takes_value {
        out.push_str(" <value>");
    }
    out
}

fn format_description(param: &ParamDef) -> String {
    let tag = if param.optional {
        "[OPTIONAL]"
    } else {
        "[MANDATORY]"
    };
    let description = param.description.trim();
    if description.is_empty() {
        tag.to_string()
    } else {
        format!("{description} {tag}")
    }
}

pub fn render_verb_help(verb: &VerbDef) -> String {
    let mut out = if verb.description.trim().is_empty() {
        format!("Parameters of verb '{}':\n", verb.name)
    } else {
        format!(
            "Parameters of verb '{}': {}\n",
            verb.name,
            verb.description.trim()
        )
    };

    if verb.params.is_empty() {
        out.push_str(&format!("{INDENT}(no parameters)\n"));
        return out;
    }

    for param in &verb.params {
        let left = format_aliases(param);
        let right = format_description(param);
        // Only the alias text counts toward the column, not the `<value>` suffix.
        let alias_width = param.aliases.join(" | ").chars().count();
        if alias_width > ALIAS_COLUMN {
            out.push_str(&format!("{INDENT}{left}\n"));
            out.push_str(&format!(
                "{INDENT}{:width$}{GAP}{right}\n",
                "",
                width = ALIAS_COLUMN
            ));
        } else {
            out.push_str(&format!(
                "{INDENT}{left:<width$}{GAP}{right}\n",
                width = ALIAS_COLUMN
            ));
        }
    }
    out
}

pub fn print_usage_message<W: Write>(registry: &Registry, out: &mut W) -> io::Result<()> {
    out.write_all(render_usage(registry).as_bytes())
}

pub fn print_list_of_verbs<W: Write>(registry: &Registry, out: &mut W) -> io::Result<()> {
    out.write_all(render_verb_list(registry).as_bytes())
}

pub fn print_help_for_verb<W: Write>(verb: &VerbDef, out: &mut W) -> io::Result<()> {
    out.write_all(render_verb_help(verb).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::builder("bip")
            .verb(VerbDef::new("node", "Creates a node."))
            .verb(VerbDef::new("a-verb-name-longer-than-twenty", "Long."))
            .build()
            .unwrap()
    }

    #[test]
    fn usage_lists_every_verb_once() {
        let text = render_usage(&registry());
        assert!(text.starts_with("Usage: bip [verb] [param value] [param value] ...\n"));
        assert!(text.contains("List of verbs:"));
        assert!(text.contains("  help                 Print this help message.\n"));
        assert!(text.contains("  node                 Creates a node.\n"));
        assert!(text.contains("  a-verb-name-longer-than-twenty Long.\n"));
        assert!(text.contains("Run 'bip help <verb>'"));
        assert_eq!(text.matches("  node ").count(), 1);
    }

    #[test]
    fn verb_help_aligns_and_tags() {
        let verb = VerbDef::new("fssd", "Filesystem service.")
            .param(ParamDef::new("workdir", ["workdir", "wdir"], "Work dir.").takes_value())
            .param(ParamDef::new("verbose", ["verbose", "v"], "").optional());
        let text = render_verb_help(&verb);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Parameters of verb 'fssd': Filesystem service.");
        assert_eq!(
            lines[1],
            format!("  {:<50}  Work dir. [MANDATORY]", "workdir | wdir <value>")
        );
        assert_eq!(lines[2], format!("  {:<50}  [OPTIONAL]", "verbose | v"));
    }

    #[test]
    fn verb_help_wraps_long_alias_text() {
        let aliases = [
            "unixsock",
            "sock",
            "sockpath",
            "unixsockpath",
            "unix-domain-socket",
        ];
        let verb = VerbDef::new("statd", "")
            .param(ParamDef::new("unixsock", aliases, "Socket path.").takes_value());
        let text = render_verb_help(&verb);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Parameters of verb 'statd':");
        assert_eq!(
            lines[1],
            "  unixsock | sock | sockpath | unixsockpath | unix-domain-socket <value>"
        );
        assert_eq!(lines[2], format!("{}Socket path. [MANDATORY]", " ".repeat(54)));
    }

    #[test]
    fn value_suffix_does_not_force_a_wrap() {
        // 48 columns of aliases plus " <value>" stays on one line.
        let alias = "a".repeat(48);
        let verb = VerbDef::new("mond", "")
            .param(ParamDef::new("target", [alias.as_str()], "Target.").takes_value());
        let text = render_verb_help(&verb);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], format!("  {alias} <value>  Target. [MANDATORY]"));
    }

    #[test]
    fn non_ascii_aliases_are_measured_in_chars() {
        // 30 chars, 60 bytes: fits the column.
        let alias = "\u{e9}".repeat(30);
        let verb = VerbDef::new("statd", "")
            .param(ParamDef::new("accent", [alias.as_str()], "Accented.").optional());
        let text = render_verb_help(&verb);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], format!("  {alias:<50}  Accented. [OPTIONAL]"));
    }

    #[test]
    fn verb_help_without_params() {
        let text = render_verb_help(&VerbDef::new("help", "Print this help message."));
        assert!(text.ends_with("  (no parameters)\n"));
    }

    #[test]
    fn printers_write_rendered_text() {
        let registry = registry();
        let mut buf = Vec::new();
        print_list_of_verbs(&registry, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), render_verb_list(&registry));
    }
}
