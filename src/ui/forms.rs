use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::Record;
use crate::store::RecordId;

/// Form state for record creation and editing.
#[derive(Default, Clone)]
pub(crate) struct RecordForm {
    pub(crate) name: String,
    pub(crate) region: String,
    pub(crate) lat: String,
    pub(crate) lng: String,
    pub(crate) address: String,
    pub(crate) open_chat_url: String,
    pub(crate) phone_number: String,
    pub(crate) active: RecordField,
    pub(crate) error: Option<String>,
}

/// Enumerates the form fields to drive focus management and cursor math.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum RecordField {
    #[default]
    Name,
    Region,
    Lat,
    Lng,
    Address,
    OpenChatUrl,
    PhoneNumber,
}

impl RecordField {
    /// Top-to-bottom field order as rendered in the form popup.
    pub(crate) const ORDER: [RecordField; 7] = [
        RecordField::Name,
        RecordField::Region,
        RecordField::Lat,
        RecordField::Lng,
        RecordField::Address,
        RecordField::OpenChatUrl,
        RecordField::PhoneNumber,
    ];

    /// Label shown next to the field value.
    pub(crate) fn label(self) -> &'static str {
        match self {
            RecordField::Name => "Name",
            RecordField::Region => "Region",
            RecordField::Lat => "Latitude",
            RecordField::Lng => "Longitude",
            RecordField::Address => "Address",
            RecordField::OpenChatUrl => "Open chat",
            RecordField::PhoneNumber => "Phone",
        }
    }

    /// Row index of the field inside the form popup.
    pub(crate) fn row(self) -> u16 {
        RecordField::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0) as u16
    }

    fn required(self) -> bool {
        matches!(self, RecordField::Name | RecordField::Region)
    }

    fn next(self) -> Self {
        let position = RecordField::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0);
        RecordField::ORDER[(position + 1) % RecordField::ORDER.len()]
    }

    fn previous(self) -> Self {
        let position = RecordField::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0);
        RecordField::ORDER[(position + RecordField::ORDER.len() - 1) % RecordField::ORDER.len()]
    }
}

impl RecordForm {
    /// Populate the form from an existing record when entering edit mode.
    pub(crate) fn from_record(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            region: record.region.clone(),
            lat: record.lat.clone(),
            lng: record.lng.clone(),
            address: record.address.clone(),
            open_chat_url: record.open_chat_url.clone(),
            phone_number: record.phone_number.clone(),
            active: RecordField::Name,
            error: None,
        }
    }

    /// Cycle focus forward through the fields.
    pub(crate) fn next_field(&mut self) {
        self.active = self.active.next();
    }

    /// Cycle focus backward through the fields.
    pub(crate) fn previous_field(&mut self) {
        self.active = self.active.previous();
    }

    /// Insert a character into the active field.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value_mut(self.active).push(ch);
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        self.value_mut(self.active).pop();
    }

    /// Validate and normalize the inputs into a record ready for the store.
    /// Every field is trimmed; name and region must survive the trim.
    pub(crate) fn parse_inputs(&self) -> Result<Record> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Store name is required."));
        }
        let region = self.region.trim();
        if region.is_empty() {
            return Err(anyhow!("Region is required."));
        }

        Ok(Record {
            name: name.to_string(),
            region: region.to_string(),
            lat: self.lat.trim().to_string(),
            lng: self.lng.trim().to_string(),
            address: self.address.trim().to_string(),
            open_chat_url: self.open_chat_url.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
        })
    }

    /// Render a styled line for the form popup.
    pub(crate) fn build_line(&self, field: RecordField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let placeholder = if field.required() {
            "<required>"
        } else {
            "<optional>"
        };
        let display = if value.is_empty() {
            placeholder.to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Character count of the requested field, for cursor placement.
    pub(crate) fn value_len(&self, field: RecordField) -> usize {
        self.value(field).chars().count()
    }

    fn value(&self, field: RecordField) -> &str {
        match field {
            RecordField::Name => &self.name,
            RecordField::Region => &self.region,
            RecordField::Lat => &self.lat,
            RecordField::Lng => &self.lng,
            RecordField::Address => &self.address,
            RecordField::OpenChatUrl => &self.open_chat_url,
            RecordField::PhoneNumber => &self.phone_number,
        }
    }

    fn value_mut(&mut self, field: RecordField) -> &mut String {
        match field {
            RecordField::Name => &mut self.name,
            RecordField::Region => &mut self.region,
            RecordField::Lat => &mut self.lat,
            RecordField::Lng => &mut self.lng,
            RecordField::Address => &mut self.address,
            RecordField::OpenChatUrl => &mut self.open_chat_url,
            RecordField::PhoneNumber => &mut self.phone_number,
        }
    }
}

/// State for confirming a record deletion.
#[derive(Clone)]
pub(crate) struct ConfirmRecordDelete {
    pub(crate) id: RecordId,
    pub(crate) display_line: String,
}

impl ConfirmRecordDelete {
    /// Build the confirmation state from the record being considered.
    pub(crate) fn from(id: RecordId, record: &Record) -> Self {
        Self {
            id,
            display_line: record.display_line(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordField, RecordForm};

    #[test]
    fn tab_cycles_through_all_fields_and_wraps() {
        let mut form = RecordForm::default();
        for expected in RecordField::ORDER {
            assert_eq!(form.active, expected);
            form.next_field();
        }
        assert_eq!(form.active, RecordField::Name);
        form.previous_field();
        assert_eq!(form.active, RecordField::PhoneNumber);
    }

    #[test]
    fn parse_inputs_trims_every_field() {
        let mut form = RecordForm::default();
        form.name = "  Alpha  ".to_string();
        form.region = " Seoul".to_string();
        form.lat = " 37.56 ".to_string();
        form.phone_number = "02-555-0100 ".to_string();

        let record = form.parse_inputs().unwrap();
        assert_eq!(record.name, "Alpha");
        assert_eq!(record.region, "Seoul");
        assert_eq!(record.lat, "37.56");
        assert_eq!(record.phone_number, "02-555-0100");
    }

    #[test]
    fn parse_inputs_rejects_blank_required_fields() {
        let mut form = RecordForm::default();
        form.region = "Seoul".to_string();
        assert!(form.parse_inputs().is_err());

        form.name = "Alpha".to_string();
        form.region = "   ".to_string();
        assert!(form.parse_inputs().is_err());
    }

    #[test]
    fn control_characters_are_not_inserted() {
        let mut form = RecordForm::default();
        assert!(!form.push_char('\u{7}'));
        assert!(form.push_char('A'));
        assert_eq!(form.name, "A");
    }
}
