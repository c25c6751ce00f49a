use std::fmt;

#[derive(Debug)]
pub enum WidgetError {
    MissingElement(String),
    MissingAttribute { element: String, name: String },
    InvalidNumber { element: String, value: String },
    InvalidReadingId(String),
    InvalidDeadline(String),
    ZeroTotalPages,
    SubmissionInFlight,
    Http(String),
}

impl WidgetError {
    pub fn missing_element(id: impl Into<String>) -> Self {
        Self::MissingElement(id.into())
    }

    pub fn invalid_number(element: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            element: element.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingElement(id) => write!(f, "element '{id}' not found"),
            Self::MissingAttribute { element, name } => {
                write!(f, "element '{element}' has no '{name}' attribute")
            }
            Self::InvalidNumber { element, value } => {
                write!(f, "element '{element}' holds non-numeric value '{value}'")
            }
            Self::InvalidReadingId(id) => write!(f, "invalid reading id '{id}'"),
            Self::InvalidDeadline(value) => {
                write!(f, "deadline '{value}' must be YYYY-MM-DD or YYYY-MM-DD HH:MM")
            }
            Self::ZeroTotalPages => write!(f, "total page count is zero"),
            Self::SubmissionInFlight => write!(f, "an update is already being submitted"),
            Self::Http(message) => write!(f, "http client error: {message}"),
        }
    }
}

impl std::error::Error for WidgetError {}

impl From<reqwest::Error> for WidgetError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}
