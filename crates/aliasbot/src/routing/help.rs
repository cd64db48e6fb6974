use super::Subcommand;

const DESCRIBED: [(Subcommand, &str); 6] = [
    (Subcommand::Help, "show this text"),
    (Subcommand::Make, "create an alias"),
    (Subcommand::Delete, "delete an alias"),
    (Subcommand::List, "list aliases, oldest first"),
    (Subcommand::Status, "show how many aliases exist"),
    (Subcommand::Ranking, "show the most used aliases"),
];

/// Static help text for `prefix`.
pub fn help_text(prefix: &str) -> String {
    let entries: Vec<(String, &str)> = DESCRIBED
        .iter()
        .map(|(subcommand, description)| {
            let usage = match subcommand.synopsis() {
                "" => subcommand.name().to_string(),
                synopsis => format!("{} {synopsis}", subcommand.name()),
            };
            (usage, *description)
        })
        .collect();
    let width = entries
        .iter()
        .map(|(usage, _)| usage.chars().count())
        .max()
        .unwrap_or_default();

    let mut lines = vec![
        "```asciidoc".to_string(),
        "= alias =".to_string(),
        format!("{prefix} [subcommand] [args...]"),
        String::new(),
        ">>> every argument must be wrapped in double quotes (\") <<<".to_string(),
        String::new(),
        "= subcommands =".to_string(),
    ];
    for (usage, description) in entries {
        lines.push(format!("    {usage:<width$} :: {description}"));
    }
    lines.push("```".to_string());
    lines.join("\n")
}

/// One-line usage reply for a subcommand called with the wrong arguments.
pub fn usage_text(prefix: &str, subcommand: Subcommand) -> String {
    let synopsis = subcommand.synopsis();
    if synopsis.is_empty() {
        format!("usage: `{prefix} {}`", subcommand.name())
    } else {
        format!("usage: `{prefix} {} {synopsis}`", subcommand.name())
    }
}
