//! Terminal bar charts
//!
//! The renderer holds its [`ChartStyle`] from construction; nothing about
//! appearance is global. Data arrives as a [`ChartSpec`] built from the
//! aggregation results.

use serde::{Deserialize, Serialize};

use crate::models::Money;

/// Chart appearance, part of the user settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartStyle {
    /// Width of the longest bar in characters
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,

    /// Character for the filled part of a bar
    #[serde(default = "default_fill")]
    pub fill: char,

    /// Character for the unfilled remainder
    #[serde(default = "default_empty")]
    pub empty: char,

    /// Print the amount after each bar
    #[serde(default = "default_show_values")]
    pub show_values: bool,
}

fn default_bar_width() -> usize {
    40
}

fn default_fill() -> char {
    '█'
}

fn default_empty() -> char {
    '░'
}

fn default_show_values() -> bool {
    true
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            bar_width: default_bar_width(),
            fill: default_fill(),
            empty: default_empty(),
            show_values: default_show_values(),
        }
    }
}

/// What to draw: title, axis labels and one labelled value per bar
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub currency_label: String,
    pub points: Vec<(String, Money)>,
}

impl ChartSpec {
    /// Create a chart whose value axis is labelled with the currency
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        value_label: &str,
        currency_label: impl Into<String>,
    ) -> Self {
        let currency_label = currency_label.into();
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: format!("{} ({})", value_label, currency_label),
            currency_label,
            points: Vec::new(),
        }
    }

    /// Set the bars
    pub fn with_points<L: ToString>(mut self, points: impl IntoIterator<Item = (L, Money)>) -> Self {
        self.points = points
            .into_iter()
            .map(|(label, value)| (label.to_string(), value))
            .collect();
        self
    }
}

/// Renders [`ChartSpec`]s as horizontal bar charts
#[derive(Debug, Clone)]
pub struct BarChart {
    style: ChartStyle,
}

impl BarChart {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Draw one bar scaled against `max`
    pub fn bar(&self, value: Money, max: Money) -> String {
        let width = self.style.bar_width;
        if !max.is_positive() || !value.is_positive() {
            return self.style.empty.to_string().repeat(width);
        }

        let filled = ((value.as_f64() / max.as_f64()) * width as f64).round() as usize;
        let filled = filled.min(width);

        let mut out = String::with_capacity(width * 3);
        out.extend(std::iter::repeat(self.style.fill).take(filled));
        out.extend(std::iter::repeat(self.style.empty).take(width - filled));
        out
    }

    /// Render the whole chart, one line per point
    pub fn render(&self, spec: &ChartSpec) -> String {
        let mut output = String::new();

        output.push_str(&spec.title);
        output.push('\n');
        output.push_str(&"=".repeat(spec.title.chars().count()));
        output.push('\n');

        if spec.points.is_empty() {
            output.push_str("No data to plot\n");
            return output;
        }

        let label_width = spec
            .points
            .iter()
            .map(|(label, _)| label.chars().count())
            .chain(std::iter::once(spec.x_label.chars().count()))
            .max()
            .unwrap_or(0);
        let max = spec
            .points
            .iter()
            .map(|(_, value)| *value)
            .max()
            .unwrap_or_else(Money::zero);

        output.push_str(&format!(
            "{:<width$}  {}\n",
            spec.x_label,
            spec.y_label,
            width = label_width
        ));

        for (label, value) in &spec.points {
            output.push_str(&format!(
                "{:<width$}  {}",
                label,
                self.bar(*value, max),
                width = label_width
            ));
            if self.style.show_values {
                output.push_str("  ");
                output.push_str(&value.format_with_label(&spec.currency_label));
            }
            output.push('\n');
        }

        output
    }
}
