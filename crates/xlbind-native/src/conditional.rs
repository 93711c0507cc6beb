//! Conditional formats and conditional formatting rules

use crate::color::Color;
use crate::error::{NativeError, Result};
use crate::format::{Borders, Fill};
use crate::handle::{ConditionalFormatId, FontId};
use crate::range::CellRange;
use crate::types::{num_format, CfOperator, CfTimePeriod, CfType, CfvoType};

/// Style applied to cells matching a conditional rule
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalFormat {
    pub font: FontId,
    pub num_format: i32,
    pub custom_num_format: Option<String>,
    pub borders: Borders,
    pub fill: Fill,
}

impl ConditionalFormat {
    pub(crate) fn new(font: FontId) -> Self {
        Self {
            font,
            num_format: num_format::GENERAL,
            custom_num_format: None,
            borders: Borders::default(),
            fill: Fill::default(),
        }
    }

    /// Use a custom number format string
    pub fn set_custom_num_format(&mut self, format: &str) -> Result<()> {
        if format.is_empty() {
            return Err(NativeError::InvalidArgument("empty number format".into()));
        }
        self.custom_num_format = Some(format.to_string());
        Ok(())
    }
}

/// One stop of a color scale
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    pub color: Color,
    pub kind: CfvoType,
    pub value: String,
}

/// A rule of a conditional formatting range-set
#[derive(Debug, Clone, PartialEq)]
pub enum CfRule {
    Typed {
        kind: CfType,
        format: ConditionalFormatId,
        value: String,
    },
    Top {
        format: ConditionalFormatId,
        value: i32,
        bottom: bool,
        percent: bool,
    },
    OpNum {
        op: CfOperator,
        format: ConditionalFormatId,
        value1: f64,
        value2: f64,
    },
    OpStr {
        op: CfOperator,
        format: ConditionalFormatId,
        value1: String,
        value2: String,
    },
    AboveAverage {
        format: ConditionalFormatId,
        above: bool,
        equal: bool,
        std_dev: i32,
    },
    TimePeriod {
        format: ConditionalFormatId,
        period: CfTimePeriod,
    },
    ColorScale(Vec<ColorStop>),
}

impl CfRule {
    /// Conditional format applied by the rule; color scales carry their own colors
    pub fn format(&self) -> Option<ConditionalFormatId> {
        match self {
            CfRule::Typed { format, .. }
            | CfRule::Top { format, .. }
            | CfRule::OpNum { format, .. }
            | CfRule::OpStr { format, .. }
            | CfRule::AboveAverage { format, .. }
            | CfRule::TimePeriod { format, .. } => Some(*format),
            CfRule::ColorScale(_) => None,
        }
    }
}

/// A rule with its stop-if-true flag
#[derive(Debug, Clone, PartialEq)]
pub struct RuleEntry {
    pub rule: CfRule,
    pub stop_if_true: bool,
}

/// Ranges sharing an ordered list of conditional rules
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionalFormatting {
    pub(crate) ranges: Vec<CellRange>,
    rules: Vec<RuleEntry>,
}

impl ConditionalFormatting {
    /// Ranges covered
    pub fn ranges(&self) -> &[CellRange] {
        &self.ranges
    }

    /// Rules in priority order
    pub fn rules(&self) -> &[RuleEntry] {
        &self.rules
    }

    /// Cover another range
    pub fn add_range(&mut self, range: CellRange) {
        self.ranges.push(range);
    }

    /// Append a rule after validating its parameters
    pub fn add_rule(&mut self, rule: CfRule, stop_if_true: bool) -> Result<()> {
        match &rule {
            CfRule::Top { value, percent, .. } => {
                let max = if *percent { 100 } else { 1000 };
                if !(1..=max).contains(value) {
                    return Err(NativeError::InvalidArgument(format!("top rule rank {value}")));
                }
            }
            CfRule::OpNum { op, value1, value2, .. } => {
                if op.takes_two_values() && value2 < value1 {
                    return Err(NativeError::InvalidArgument(format!(
                        "range {value1}..{value2} is inverted"
                    )));
                }
            }
            CfRule::AboveAverage { std_dev, .. } => {
                if !(0..=3).contains(std_dev) {
                    return Err(NativeError::InvalidArgument(format!("std dev {std_dev}")));
                }
            }
            CfRule::ColorScale(stops) => {
                if stops.len() < 2 || stops.len() > 3 {
                    return Err(NativeError::InvalidArgument("color scale needs 2 or 3 stops".into()));
                }
            }
            CfRule::Typed { .. } | CfRule::OpStr { .. } | CfRule::TimePeriod { .. } => {}
        }
        self.rules.push(RuleEntry { rule, stop_if_true });
        Ok(())
    }

    /// Conditional formats referenced by the rules
    pub fn formats(&self) -> impl Iterator<Item = ConditionalFormatId> + '_ {
        self.rules.iter().filter_map(|entry| entry.rule.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stop(color: Color, kind: CfvoType) -> ColorStop {
        ColorStop {
            color,
            kind,
            value: String::new(),
        }
    }

    #[test]
    fn test_rule_validation() {
        let mut cf = ConditionalFormatting::default();
        let format = ConditionalFormatId(0);

        let rank_too_big = CfRule::Top {
            format,
            value: 150,
            bottom: false,
            percent: true,
        };
        assert!(cf.add_rule(rank_too_big, false).is_err());

        let inverted = CfRule::OpNum {
            op: CfOperator::Between,
            format,
            value1: 5.0,
            value2: 1.0,
        };
        assert!(cf.add_rule(inverted, false).is_err());

        let scale = CfRule::ColorScale(vec![stop(Color::RED, CfvoType::Min), stop(Color::BLUE, CfvoType::Max)]);
        cf.add_rule(scale, true).unwrap();

        assert_eq!(cf.rules().len(), 1);
        assert!(cf.rules()[0].stop_if_true);
        assert_eq!(cf.formats().count(), 0);
    }
}
