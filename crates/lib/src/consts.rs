//! Project-wide constants.

/// Application name.
pub const APP_NAME: &str = "outlay";

/// The module every other module's configuration is evaluated after.
pub const EVALUATION_ANCHOR: &str = "app";

/// Task kind for toolchain source-compilation tasks.
pub const JAVA_COMPILE: &str = "java-compile";

/// Compiler arguments appended to every compile task by the default policy.
/// `-Xlint:-options` suppresses the toolchain's option-compatibility warnings.
pub const COMPILER_POLICY_FLAGS: &[&str] = &["-Xlint:-options"];
