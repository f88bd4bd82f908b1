//! Configuration templates for `appraise init`.
//!
//! Templates are kept as valid TOML and handed out commented-out, so a fresh config
//! changes nothing until the user uncomments a line.

/// Local configuration template (valid TOML).
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Global configuration template (valid TOML).
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Returns the local configuration template as a commented-out example.
pub fn local_template() -> String {
    comment_template(LOCAL_TEMPLATE)
}

/// Returns the global configuration template as a commented-out example.
pub fn global_template() -> String {
    comment_template(GLOBAL_TEMPLATE)
}

/// Prefixes every non-empty, non-comment line with `# `.
fn comment_template(template: &str) -> String {
    template
        .lines()
        .map(|line| {
            if line.is_empty() || line.starts_with('#') {
                format!("{line}\n")
            } else {
                format!("# {line}\n")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::parse::parse_config_str;

    #[test]
    fn local_template_is_valid_config() {
        let result = parse_config_str(LOCAL_TEMPLATE, Path::new("config.toml"));
        assert!(result.is_ok(), "local template failed to parse: {result:?}");
    }

    #[test]
    fn global_template_is_valid_config() {
        let config = parse_config_str(GLOBAL_TEMPLATE, Path::new("config-global.toml")).unwrap();
        assert!(config.matcher.is_some());
        assert!(config.root.is_none());
    }

    #[test]
    fn commented_template_is_inert() {
        let config = parse_config_str(&local_template(), Path::new("x.toml")).unwrap();
        assert!(config.matcher.is_none());
        assert!(config.query.is_none());
        assert!(config.catalog.is_none());
    }

    #[test]
    fn comment_template_keeps_comments_and_blanks() {
        let result = comment_template("# note\n[query]\n\nleague = \"Standard\"\n");
        assert_eq!(result, "# note\n# [query]\n\n# league = \"Standard\"\n");
    }
}
