//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Life OS Debugger Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[model]
# name = "gemini-3-flash-preview"
# temperature = 0.7          # 0.0-2.0
# max_tokens = 4096          # 1-65536
# api_key_env = ["GEMINI_API_KEY", "API_KEY"]
# system_instruction = "..."  # replaces the built-in diagnostic persona

[session]
# default_title = "New Session"
# title_max_chars = 30       # 1-200
# greeting = "Hello. I am the Life OS Debugger. ..."

[display]
# reveal_ms = 15             # 0-1000, 0 prints replies at once
# stream = false             # print reply chunks as they arrive
# scroll_threshold = 200

[logging]
# level = "info"             # trace, debug, info, warn, error
"##
    .to_string()
}
