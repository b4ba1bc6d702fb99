use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc, Weekday};
use std::collections::BTreeMap;
use std::fmt::{Display, Write};

use crate::client::badge::Badge;
use crate::client::time::parse_timestamp;
use crate::models::Event;

const MONTHS: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho",
    "Julho", "Agosto", "Setembro", "Outubro", "Novembro", "Dezembro",
];

fn weekday_abbrev(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "seg",
        Weekday::Tue => "ter",
        Weekday::Wed => "qua",
        Weekday::Thu => "qui",
        Weekday::Fri => "sex",
        Weekday::Sat => "sáb",
        Weekday::Sun => "dom",
    }
}

fn local<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    parse_timestamp(raw).map(|dt| dt.with_timezone(tz))
}

fn hour_minute<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    local(raw, tz)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// The "Próximos Eventos" panel.
pub fn render_upcoming<Tz: TimeZone>(events: &[&Event], tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    if events.is_empty() {
        return "Nenhum evento próximo.\n".to_string();
    }

    let mut out = String::new();
    for event in events {
        let date = local(&event.start, tz)
            .map(|dt| dt.format("%d/%m/%Y").to_string())
            .unwrap_or_default();
        let _ = writeln!(out, "#{} {}", event.id, event.title);
        let _ = writeln!(out, "  {}", date);
        let _ = writeln!(
            out,
            "  {} - {}",
            hour_minute(&event.start, tz),
            hour_minute(&event.end, tz)
        );
        let _ = writeln!(out, "  {}", event.location.as_deref().unwrap_or(""));
    }
    out
}

/// Read-only detail view of a single event.
pub fn render_event<Tz: TimeZone>(event: &Event, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    let when = |raw: &str| {
        local(raw, tz)
            .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
            .unwrap_or_else(|| raw.to_string())
    };
    let badge = Badge::for_type(event.event_type.as_deref());

    let mut out = String::new();
    let _ = writeln!(out, "{}", event.title);
    let _ = writeln!(out, "  Início:    {}", when(&event.start));
    let _ = writeln!(out, "  Fim:       {}", when(&event.end));
    if let Some(location) = event.location.as_deref().filter(|l| !l.is_empty()) {
        let _ = writeln!(out, "  Local:     {}", location);
    }
    if let Some(description) = event.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "  Descrição: {}", description);
    }
    let _ = writeln!(
        out,
        "  Tipo:      {} [{}]",
        event.event_type.as_deref().unwrap_or("-"),
        badge
    );
    if let Some(color) = &event.color {
        let _ = writeln!(out, "  Cor:       {}", color);
    }
    let reminder = match (event.notify, event.notify_time) {
        (Some(true), Some(minutes)) => format!("{} minutos antes", minutes),
        (Some(true), None) => "sim".to_string(),
        _ => "não".to_string(),
    };
    let _ = writeln!(out, "  Notificar: {}", reminder);
    out
}

/// Month view: each day of `year`/`month` that has events starting on it,
/// in local time, with the events in start order.
pub fn render_month<Tz: TimeZone>(events: &[Event], year: i32, month: u32, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    let mut days: BTreeMap<NaiveDate, Vec<(DateTime<Utc>, &Event)>> = BTreeMap::new();
    for event in events {
        let Some(start) = parse_timestamp(&event.start) else {
            continue;
        };
        let day = start.with_timezone(tz).date_naive();
        if day.year() == year && day.month() == month {
            days.entry(day).or_default().push((start, event));
        }
    }

    let name = MONTHS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?");
    let mut out = format!("{} de {}\n", name, year);
    if days.is_empty() {
        out.push_str("  (sem eventos)\n");
        return out;
    }

    for (day, mut entries) in days {
        entries.sort_by_key(|(start, _)| *start);
        let _ = writeln!(
            out,
            "{} {}",
            day.format("%d/%m"),
            weekday_abbrev(day.weekday())
        );
        for (_, event) in entries {
            let _ = writeln!(
                out,
                "  {}-{}  #{} {} [{}]",
                hour_minute(&event.start, tz),
                hour_minute(&event.end, tz),
                event.id,
                event.title,
                Badge::for_type(event.event_type.as_deref())
            );
        }
    }
    out
}
