//! Instruction serializer.
//!
//! Renders a motion table as newline-delimited positional instructions:
//!
//! ```text
//! <header>
//! <prefix> <X><x> <Y><y> <Z><z> <A><angle> [<F><speed>]
//! ...
//! <footer>
//! ```
//!
//! Axis words are only written when their value changed since the previous
//! line (the first line carries all four). The first line and every
//! non-cutting pose use the rapid prefix. A cutting line states the feed when
//! it follows a rapid line or a pose that was not part of a driven segment,
//! so a driven segment states its feed once, on its first cutting line.

use crate::error::ToolpathResult;
use std::path::Path;
use wirekit_core::{MotionTable, MoveKind, Pose, Precision};
use wirekit_settings::Config;

/// Renders motion tables with a fixed output format
#[derive(Debug, Clone)]
pub struct InstructionSerializer<'a> {
    config: &'a Config,
    precision: Precision,
}

impl<'a> InstructionSerializer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            precision: config.precision(),
        }
    }

    /// Render the full program, header and footer included
    pub fn render(&self, table: &MotionTable) -> Vec<String> {
        let mut lines = Vec::with_capacity(table.len() + 2);
        lines.push(self.config.header.clone());

        let mut previous: Option<(&Pose, bool)> = None;
        for pose in table {
            let (line, rapid) = self.render_pose(pose, previous);
            lines.push(line);
            previous = Some((pose, rapid));
        }

        lines.push(self.config.footer.clone());
        lines
    }

    /// Render one pose against the previous pose and whether its line was rapid.
    /// Returns the line and whether it is rapid.
    fn render_pose(&self, pose: &Pose, previous: Option<(&Pose, bool)>) -> (String, bool) {
        let rapid = previous.is_none() || pose.kind.is_rapid();
        let prefix = if rapid {
            &self.config.rapid_prefix
        } else {
            &self.config.cut_prefix
        };

        let mut line = format!("{} ", prefix);
        let values = pose.axes();
        for (index, (label, value)) in self.config.axis_labels.iter().zip(values).enumerate() {
            let text = self.precision.format(value);
            let changed =
                previous.is_none_or(|(p, _)| self.precision.format(p.axes()[index]) != text);
            if changed {
                line.push_str(&format!("{}{} ", label, text));
            }
        }

        let needs_feed = !rapid
            && previous.is_some_and(|(p, was_rapid)| was_rapid || p.kind != MoveKind::Drive);
        if needs_feed {
            line.push_str(&format!(
                "{}{}",
                self.config.feed_prefix, self.config.cutting_speed
            ));
        }

        (line.trim_end().to_string(), rapid)
    }
}

/// Render `table` with `config`
pub fn render(table: &MotionTable, config: &Config) -> Vec<String> {
    InstructionSerializer::new(config).render(table)
}

/// Join rendered lines into program text, one instruction per line
pub fn to_program_text(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Write rendered lines to `path`
pub fn write_program(path: &Path, lines: &[String]) -> ToolpathResult<()> {
    std::fs::write(path, to_program_text(lines))?;
    Ok(())
}
