pub const TITLE: &str = "Intuition - Planning and Execution CLI";

pub const HELP_HINT: &str = "Run \"intuition help\" for usage information";

pub const HELP: &str = r#"
Intuition - Planning and Execution CLI

Usage:
  intuition <command> [options]

Commands:
  plan <description>    Start a planning session with Waldo
                        Example: intuition plan "Add user authentication"

  execute              Execute a plan with Architect
                       Reads existing plan from docs/project_notes/

  memory setup         Initialize project memory system
                       Sets up docs/project_notes/ directory structure

  help                 Show this help message

Examples:
  intuition plan "Implement real-time notifications"
  intuition execute
  intuition memory setup
  intuition help

For more information, visit: https://github.com/tgoodington/intuition
"#;

pub const SEPARATOR: &str = "========================================";

pub const INSTALL_PREFIX: &str = "[intuition-install]";
pub const UNINSTALL_PREFIX: &str = "[intuition-uninstall]";
pub const SKILLS_PREFIX: &str = "[intuition-skills]";
