//! Version comparison for CLI and template compatibility

use semver::Version;

/// Compare the CLI version against the version a template declares.
/// Returns a warning message when the CLI is older than the template
/// expects; invalid version strings are ignored rather than fatal.
pub fn check_compatibility(
    cli_version: &str,
    template_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli = Version::parse(cli_version.strip_prefix('v').unwrap_or(cli_version)).ok()?;
    let template =
        Version::parse(template_version.strip_prefix('v').unwrap_or(template_version)).ok()?;

    if cli < template {
        Some(format!(
            "This template targets CLI version {} or newer, but you are running {}.\n\
             Consider updating: {}",
            template_version, cli_version, upgrade_command
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPGRADE: &str = "cargo install stencil-cli --force";

    #[test]
    fn test_cli_older_than_template() {
        let warning = check_compatibility("0.1.0", "0.2.0", UPGRADE);
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("0.2.0"));
    }

    #[test]
    fn test_cli_same_as_template() {
        assert!(check_compatibility("0.1.0", "0.1.0", UPGRADE).is_none());
    }

    #[test]
    fn test_cli_newer_than_template() {
        assert!(check_compatibility("0.2.0", "0.1.0", UPGRADE).is_none());
    }

    #[test]
    fn test_leading_v_is_tolerated() {
        assert!(check_compatibility("v0.1.0", "v0.2.0", UPGRADE).is_some());
    }

    #[test]
    fn test_invalid_versions_skip_the_warning() {
        assert!(check_compatibility("invalid", "0.1.0", UPGRADE).is_none());
        assert!(check_compatibility("0.1.0", "invalid", UPGRADE).is_none());
    }
}
