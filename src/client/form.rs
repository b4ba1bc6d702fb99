use chrono::{Local, TimeZone};
use thiserror::Error;

use crate::client::time::{combine_date_time, to_iso_string};
use crate::models::EventInput;

pub struct ColorOption {
    pub color: &'static str,
    pub label: &'static str,
}

pub const COLOR_OPTIONS: &[ColorOption] = &[
    ColorOption { color: "#3788d8", label: "Azul" },
    ColorOption { color: "#e74c3c", label: "Vermelho" },
    ColorOption { color: "#2ecc71", label: "Verde" },
    ColorOption { color: "#f39c12", label: "Laranja" },
    ColorOption { color: "#9b59b6", label: "Roxo" },
];

pub const DEFAULT_COLOR: &str = "#3788d8";
pub const DEFAULT_TYPE: &str = "Social";

/// Resolves a palette label (`Verde`) or a hex value to the hex value.
pub fn resolve_color(value: &str) -> Option<&'static str> {
    COLOR_OPTIONS
        .iter()
        .find(|opt| opt.label.eq_ignore_ascii_case(value) || opt.color.eq_ignore_ascii_case(value))
        .map(|opt| opt.color)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Preencha este campo: {0}")]
    Required(&'static str),

    #[error("Data ou hora inválida: {0}")]
    InvalidDateTime(&'static str),

    #[error("A antecedência da notificação deve ser um número maior ou igual a 1")]
    InvalidNotifyTime,
}

/// The "Novo Evento" form, with dates and times kept as typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub title: String,
    pub color: String,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub location: String,
    pub description: String,
    pub notify: bool,
    pub notify_time: String,
    pub event_type: String,
}

impl Default for EventForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            color: DEFAULT_COLOR.to_string(),
            start_date: String::new(),
            start_time: String::new(),
            end_date: String::new(),
            end_time: String::new(),
            location: String::new(),
            description: String::new(),
            notify: false,
            notify_time: "60".to_string(),
            event_type: String::new(),
        }
    }
}

impl EventForm {
    /// Field-level checks that run before anything is sent.
    pub fn check_validity(&self) -> Result<(), FormError> {
        let required = [
            ("title", &self.title),
            ("startDate", &self.start_date),
            ("startTime", &self.start_time),
            ("endDate", &self.end_date),
            ("endTime", &self.end_time),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(FormError::Required(name));
            }
        }

        if self.notify {
            self.parsed_notify_time()?;
        }
        Ok(())
    }

    fn parsed_notify_time(&self) -> Result<i32, FormError> {
        match self.notify_time.trim().parse::<i32>() {
            Ok(minutes) if minutes >= 1 => Ok(minutes),
            _ => Err(FormError::InvalidNotifyTime),
        }
    }

    /// Builds the request payload, reading dates and times in local time.
    pub fn to_input(&self) -> Result<EventInput, FormError> {
        self.to_input_in(&Local)
    }

    pub fn to_input_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<EventInput, FormError> {
        self.check_validity()?;

        let start = combine_date_time(&self.start_date, &self.start_time, tz)
            .ok_or(FormError::InvalidDateTime("start"))?;
        let end = combine_date_time(&self.end_date, &self.end_time, tz)
            .ok_or(FormError::InvalidDateTime("end"))?;

        let notify_time = if self.notify {
            Some(self.parsed_notify_time()?)
        } else {
            None
        };

        let event_type = match self.event_type.trim() {
            "" => DEFAULT_TYPE.to_string(),
            _ => self.event_type.clone(),
        };

        Ok(EventInput {
            title: Some(self.title.clone()),
            start: Some(to_iso_string(&start)),
            end: Some(to_iso_string(&end)),
            color: Some(self.color.clone()),
            location: Some(self.location.clone()),
            description: Some(self.description.clone()),
            notify: Some(self.notify),
            notify_time,
            event_type: Some(event_type),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn filled() -> EventForm {
        EventForm {
            title: "Sarau".into(),
            start_date: "2025-08-15".into(),
            start_time: "19:00".into(),
            end_date: "2025-08-15".into(),
            end_time: "22:30".into(),
            location: "Praça".into(),
            ..Default::default()
        }
    }

    #[test]
    fn builds_iso_payload_with_defaults() {
        let input = filled().to_input_in(&Utc).unwrap();

        assert_eq!(input.start.as_deref(), Some("2025-08-15T19:00:00.000Z"));
        assert_eq!(input.end.as_deref(), Some("2025-08-15T22:30:00.000Z"));
        assert_eq!(input.color.as_deref(), Some(DEFAULT_COLOR));
        assert_eq!(input.event_type.as_deref(), Some("Social"));
        assert_eq!(input.notify, Some(false));
        assert_eq!(input.notify_time, None);
    }

    #[test]
    fn notify_time_only_sent_when_notifying() {
        let mut form = filled();
        form.notify_time = "15".into();
        assert_eq!(form.to_input_in(&Utc).unwrap().notify_time, None);

        form.notify = true;
        assert_eq!(form.to_input_in(&Utc).unwrap().notify_time, Some(15));
    }

    #[test]
    fn notify_time_must_be_positive() {
        let mut form = filled();
        form.notify = true;
        form.notify_time = "0".into();
        assert_eq!(form.check_validity(), Err(FormError::InvalidNotifyTime));

        form.notify_time = "abc".into();
        assert_eq!(form.check_validity(), Err(FormError::InvalidNotifyTime));
    }

    #[test]
    fn required_fields_are_checked_in_form_order() {
        let mut form = filled();
        form.start_time.clear();
        form.title = "  ".into();
        assert_eq!(form.check_validity(), Err(FormError::Required("title")));

        form.title = "Sarau".into();
        assert_eq!(form.check_validity(), Err(FormError::Required("startTime")));
    }

    #[test]
    fn bad_dates_are_rejected() {
        let mut form = filled();
        form.end_date = "15/08/2025".into();
        assert_eq!(
            form.to_input_in(&Utc),
            Err(FormError::InvalidDateTime("end"))
        );
    }

    #[test]
    fn keeps_explicit_type() {
        let mut form = filled();
        form.event_type = "Educativo".into();
        assert_eq!(
            form.to_input_in(&Utc).unwrap().event_type.as_deref(),
            Some("Educativo")
        );
    }

    #[test]
    fn resolves_palette_labels() {
        assert_eq!(resolve_color("verde"), Some("#2ecc71"));
        assert_eq!(resolve_color("#9B59B6"), Some("#9b59b6"));
        assert_eq!(resolve_color("#123456"), None);
    }
}
