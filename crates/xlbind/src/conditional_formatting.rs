//! The conditional formatting proxy
//!
//! Every rule that applies a [`ConditionalFormat`] checks that the format
//! comes from the same book as the sheet before anything reaches the book.

use xlbind_native::{
    CellRange, CfOperator, CfRule, CfTimePeriod, CfType, ColorStop, ConditionalFormatId, ConditionalFormattingId,
};

use crate::conditional_format::ConditionalFormat;
use crate::error::Result;
use crate::holder::{ensure_same_book, HasBook};
use crate::proxy::{proxy_class, Proxy};

proxy_class!(
    /// Ranges of a sheet sharing an ordered list of conditional rules
    ConditionalFormatting,
    ConditionalFormattingId,
    "ConditionalFormatting"
);

impl ConditionalFormatting {
    fn format_arg(&self, format: &ConditionalFormat) -> Result<ConditionalFormatId> {
        ensure_same_book!(self.owning_book(), format.owning_book());
        Ok(format.scope()?.0)
    }

    fn push(&self, rule: CfRule, stop_if_true: bool) -> Result<()> {
        let (id, book) = self.scope()?;
        book.call_ok(|native| native.conditional_formatting_add_rule(id, rule, stop_if_true))
    }

    /// Cover another range of the sheet
    pub fn add_range(&self, range: CellRange) -> Result<()> {
        let (id, book) = self.scope()?;
        book.call_ok(|native| native.conditional_formatting_add_range(id, range))
    }

    /// Rule of a kind that takes at most one text value
    pub fn add_rule(&self, kind: CfType, format: &ConditionalFormat, value: &str, stop_if_true: bool) -> Result<()> {
        let format = self.format_arg(format)?;
        let rule = CfRule::Typed {
            kind,
            format,
            value: value.to_string(),
        };
        self.push(rule, stop_if_true)
    }

    /// Highlight the top or bottom ranked values
    pub fn add_top_rule(
        &self,
        format: &ConditionalFormat,
        value: i32,
        bottom: bool,
        percent: bool,
        stop_if_true: bool,
    ) -> Result<()> {
        let format = self.format_arg(format)?;
        let rule = CfRule::Top {
            format,
            value,
            bottom,
            percent,
        };
        self.push(rule, stop_if_true)
    }

    /// Compare against one or two numbers
    pub fn add_op_num_rule(
        &self,
        op: CfOperator,
        format: &ConditionalFormat,
        value1: f64,
        value2: f64,
        stop_if_true: bool,
    ) -> Result<()> {
        let format = self.format_arg(format)?;
        let rule = CfRule::OpNum {
            op,
            format,
            value1,
            value2,
        };
        self.push(rule, stop_if_true)
    }

    /// Compare against one or two strings
    pub fn add_op_str_rule(
        &self,
        op: CfOperator,
        format: &ConditionalFormat,
        value1: &str,
        value2: &str,
        stop_if_true: bool,
    ) -> Result<()> {
        let format = self.format_arg(format)?;
        let rule = CfRule::OpStr {
            op,
            format,
            value1: value1.to_string(),
            value2: value2.to_string(),
        };
        self.push(rule, stop_if_true)
    }

    pub fn add_above_average_rule(
        &self,
        format: &ConditionalFormat,
        above: bool,
        equal: bool,
        std_dev: i32,
        stop_if_true: bool,
    ) -> Result<()> {
        let format = self.format_arg(format)?;
        let rule = CfRule::AboveAverage {
            format,
            above,
            equal,
            std_dev,
        };
        self.push(rule, stop_if_true)
    }

    pub fn add_time_period_rule(&self, format: &ConditionalFormat, period: CfTimePeriod, stop_if_true: bool) -> Result<()> {
        let format = self.format_arg(format)?;
        self.push(CfRule::TimePeriod { format, period }, stop_if_true)
    }

    /// Two-color scale from `min` to `max`
    pub fn add_2color_scale_rule(&self, min: ColorStop, max: ColorStop, stop_if_true: bool) -> Result<()> {
        self.push(CfRule::ColorScale(vec![min, max]), stop_if_true)
    }

    /// Three-color scale through `mid`
    pub fn add_3color_scale_rule(&self, min: ColorStop, mid: ColorStop, max: ColorStop, stop_if_true: bool) -> Result<()> {
        self.push(CfRule::ColorScale(vec![min, mid, max]), stop_if_true)
    }

    /// Number of rules
    pub fn rule_size(&self) -> Result<i32> {
        let (id, book) = self.scope()?;
        book.call(|native| native.with_conditional_formatting(id, |cf| Ok(cf.rules().len() as i32)))
    }
}
