use crate::domain::AppointmentForm;
use chrono::{NaiveDate, NaiveTime};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("Age must be a whole number between 1 and 150")]
    InvalidAge,
    #[error("Mobile number must contain 7 to 15 digits")]
    InvalidMobile,
    #[error("Date must be in YYYY-MM-DD format")]
    InvalidDate,
    #[error("Time must be in HH:MM format")]
    InvalidTime,
}

/// A booking that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub hospital: String,
    pub patient_name: String,
    pub patient_age: u8,
    pub patient_mobile: String,
    pub purpose: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Which input of the booking form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    PatientName,
    PatientAge,
    PatientMobile,
    Purpose,
    Date,
    Time,
}

impl FormField {
    pub const ALL: [Self; 6] = [
        Self::PatientName,
        Self::PatientAge,
        Self::PatientMobile,
        Self::Purpose,
        Self::Date,
        Self::Time,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::PatientName => "Patient Name",
            Self::PatientAge => "Patient Age",
            Self::PatientMobile => "Patient Mobile Number",
            Self::Purpose => "Purpose of Visit",
            Self::Date => "Appointment Date",
            Self::Time => "Appointment Time",
        }
    }

    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Purpose => "Please describe the reason for your appointment",
            Self::Date => "YYYY-MM-DD",
            Self::Time => "HH:MM",
            _ => "",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::PatientName => 0,
            Self::PatientAge => 1,
            Self::PatientMobile => 2,
            Self::Purpose => 3,
            Self::Date => 4,
            Self::Time => 5,
        }
    }

    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub const fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn value(self, form: &AppointmentForm) -> &str {
        match self {
            Self::PatientName => &form.patient_name,
            Self::PatientAge => &form.patient_age,
            Self::PatientMobile => &form.patient_mobile,
            Self::Purpose => &form.purpose,
            Self::Date => &form.date,
            Self::Time => &form.time,
        }
    }

    pub fn value_mut(self, form: &mut AppointmentForm) -> &mut String {
        match self {
            Self::PatientName => &mut form.patient_name,
            Self::PatientAge => &mut form.patient_age,
            Self::PatientMobile => &mut form.patient_mobile,
            Self::Purpose => &mut form.purpose,
            Self::Date => &mut form.date,
            Self::Time => &mut form.time,
        }
    }
}

/// Checks every field and returns the typed appointment.
pub fn validate(form: &AppointmentForm) -> Result<Appointment, FormError> {
    let hospital = required(&form.hospital, "Hospital")?;
    let patient_name = required(&form.patient_name, FormField::PatientName.label())?;

    let age_raw = required(&form.patient_age, FormField::PatientAge.label())?;
    let patient_age = age_raw
        .parse::<u8>()
        .ok()
        .filter(|age| (1..=150).contains(age))
        .ok_or(FormError::InvalidAge)?;

    let mobile_raw = required(&form.patient_mobile, FormField::PatientMobile.label())?;
    let patient_mobile = normalize_mobile(&mobile_raw).ok_or(FormError::InvalidMobile)?;

    let purpose = required(&form.purpose, FormField::Purpose.label())?;

    let date_raw = required(&form.date, FormField::Date.label())?;
    let date = NaiveDate::parse_from_str(&date_raw, DATE_FORMAT).map_err(|_| FormError::InvalidDate)?;

    let time_raw = required(&form.time, FormField::Time.label())?;
    let time = NaiveTime::parse_from_str(&time_raw, TIME_FORMAT).map_err(|_| FormError::InvalidTime)?;

    Ok(Appointment {
        hospital,
        patient_name,
        patient_age,
        patient_mobile,
        purpose,
        date,
        time,
    })
}

fn required(value: &str, label: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::Missing(label))
    } else {
        Ok(trimmed.to_string())
    }
}

fn normalize_mobile(raw: &str) -> Option<String> {
    let body = raw.strip_prefix('+').unwrap_or(raw);
    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
    {
        return None;
    }
    let digits = body.chars().filter(char::is_ascii_digit).count();
    (7..=15).contains(&digits).then(|| raw.to_string())
}
