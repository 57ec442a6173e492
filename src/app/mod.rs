// ==========================================
// 灌溉排程系统 - 应用层
// ==========================================
// 职责: 组装仓储/引擎/API,驱动交互式菜单
// ==========================================

pub mod input;
pub mod prompt;
pub mod shell;
pub mod state;

// 重导出
pub use prompt::{Prompter, RustylinePrompter, ScriptedPrompter};
pub use shell::Shell;
pub use state::AppState;
