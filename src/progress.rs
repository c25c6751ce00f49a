pub const SAVE_LABEL: &str = "Save";
pub const FINISH_LABEL: &str = "Finish";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Success,
    Danger,
}

impl ButtonStyle {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "btn-success",
            Self::Danger => "btn-danger",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Success => Self::Danger,
            Self::Danger => Self::Success,
        }
    }
}

/// Everything the progress display shows for one slider position.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub pages_text: String,
    pub percent_text: String,
    pub save_label: &'static str,
    pub save_style: ButtonStyle,
}

impl ProgressView {
    pub fn compute(value: i64, total_pages: u32) -> Self {
        let finished = value == i64::from(total_pages);
        Self {
            pages_text: pages_text(value, total_pages),
            percent_text: percent_text(percent(value, total_pages)),
            save_label: if finished { FINISH_LABEL } else { SAVE_LABEL },
            save_style: if finished {
                ButtonStyle::Danger
            } else {
                ButtonStyle::Success
            },
        }
    }
}

/// Share of the book read, in percent. A book without pages reads as 0 %.
pub fn percent(value: i64, total_pages: u32) -> f64 {
    if total_pages == 0 {
        return 0.0;
    }
    100.0 * value as f64 / f64::from(total_pages)
}

pub fn pages_text(value: i64, total_pages: u32) -> String {
    format!("{value} / {total_pages} pages")
}

/// One decimal, ties rounded up (`0.25` shows as `0.3`).
pub fn percent_text(percent: f64) -> String {
    format!("{:.1} %", (percent * 10.0).round() / 10.0)
}
