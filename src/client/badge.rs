use std::fmt;

/// Visual style for an event's category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Primary,
    Success,
    Info,
    Secondary,
}

impl Badge {
    pub fn for_type(event_type: Option<&str>) -> Self {
        match event_type.map(str::to_lowercase).as_deref() {
            Some("social") => Badge::Primary,
            Some("educativo") => Badge::Success,
            Some("celebração") | Some("celebracao") => Badge::Info,
            _ => Badge::Secondary,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Badge::Primary => "primary",
            Badge::Success => "success",
            Badge::Info => "info",
            Badge::Secondary => "secondary",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_ignore_case() {
        assert_eq!(Badge::for_type(Some("Social")), Badge::Primary);
        assert_eq!(Badge::for_type(Some("EDUCATIVO")), Badge::Success);
        assert_eq!(Badge::for_type(Some("Celebração")), Badge::Info);
        assert_eq!(Badge::for_type(Some("celebracao")), Badge::Info);
    }

    #[test]
    fn everything_else_is_secondary() {
        assert_eq!(Badge::for_type(Some("Esportivo")), Badge::Secondary);
        assert_eq!(Badge::for_type(Some("")), Badge::Secondary);
        assert_eq!(Badge::for_type(None), Badge::Secondary);
    }
}
