mod clean;
mod configure;
mod info;
mod plan;

pub use clean::cmd_clean;
pub use configure::cmd_configure;
pub use info::cmd_info;
pub use plan::cmd_plan;
