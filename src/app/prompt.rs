// ==========================================
// 灌溉排程系统 - 交互输入源
// ==========================================
// Prompter 抽象行输入: 终端使用 rustyline,测试/脚本使用预置行
// ==========================================

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::VecDeque;
use tracing::warn;

/// 行输入源
pub trait Prompter {
    /// 显示提示并读取一行
    ///
    /// # 返回
    /// - Some(line): 读取成功 (不含换行)
    /// - None: 输入结束 (EOF / Ctrl-C / 终端错误)
    fn read_line(&mut self, prompt: &str) -> Option<String>;
}

// ==========================================
// RustylinePrompter - 终端输入
// ==========================================
pub struct RustylinePrompter {
    editor: DefaultEditor,
}

impl RustylinePrompter {
    pub fn new() -> rustyline::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl Prompter for RustylinePrompter {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Some(line)
            }
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => None,
            Err(e) => {
                warn!(error = %e, "读取终端输入失败");
                None
            }
        }
    }
}

// ==========================================
// ScriptedPrompter - 预置输入
// ==========================================
/// 按顺序返回预置行,耗尽后视为输入结束
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    lines: VecDeque<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// 剩余未消费的行数
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, _prompt: &str) -> Option<String> {
        self.lines.pop_front()
    }
}
