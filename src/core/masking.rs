//! # Output Masking Module / 输出掩码模块
//!
//! Recorded notebook output routinely contains values that legitimately
//! change between runs: timestamps, memory addresses, host names. A mask is
//! a regular expression that blanks such regions out of both the recorded
//! and the freshly generated text before they are compared.
//!
//! 记录的 notebook 输出经常包含在两次运行之间合理变化的值：
//! 时间戳、内存地址、主机名。掩码是一个正则表达式，
//! 在比较之前将这些区域从记录的文本和新生成的文本中抹去。

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

use crate::infra::t;

/// The fixed token every mask match is replaced with.
/// 每个掩码匹配被替换成的固定标记。
pub const MASK_PLACEHOLDER: &str = "<masked>";

/// An ordered set of compiled mask patterns.
/// 一组有序的已编译掩码模式。
#[derive(Debug, Default)]
pub struct MaskSet {
    patterns: Vec<Regex>,
}

impl MaskSet {
    /// Compiles the patterns in multi-line mode (`^`/`$` match per line),
    /// keeping their configured order. Reports the offending pattern on
    /// compile failure.
    ///
    /// 以多行模式编译这些模式（`^`/`$` 按行匹配），并保持其配置顺序。
    /// 编译失败时报告出错的模式。
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern.as_ref())
                    .multi_line(true)
                    .build()
                    .with_context(|| {
                        t!("config.bad_mask", pattern = pattern.as_ref()).to_string()
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Applies every pattern in order, replacing all matches with the
    /// placeholder. Patterns are sequential: a later pattern sees the text
    /// already rewritten by earlier ones. Zero matches is not an error.
    ///
    /// 按顺序应用每个模式，将所有匹配替换为占位符。
    /// 模式是顺序应用的：后面的模式会看到已被前面模式改写的文本。
    /// 没有匹配不是错误。
    pub fn apply(&self, text: &str) -> String {
        let mut masked = text.to_string();
        for pattern in &self.patterns {
            masked = pattern.replace_all(&masked, MASK_PLACEHOLDER).into_owned();
        }
        masked
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
