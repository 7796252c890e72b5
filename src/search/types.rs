/// Types for teacher search criteria and results
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// User-chosen search constraints, edited field-by-field.
///
/// `day` must be non-empty and `timezone`/`start_time`/`end_time` must be
/// set before a submission is allowed; `course` is optional. The gate in
/// [`crate::validate::validate_criteria`] enforces this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Weekday labels, e.g. "Monday"
    #[serde(default)]
    pub day: Vec<String>,
    /// Course identifiers
    #[serde(default)]
    pub course: Vec<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default, with = "time_text")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "time_text")]
    pub end_time: Option<NaiveTime>,
}

impl SearchCriteria {
    /// Applies a single field edit.
    ///
    /// Time edits arrive as raw user text; unparsable text leaves the
    /// field unset so validation reports it.
    pub fn apply(&mut self, edit: CriteriaEdit) {
        match edit {
            CriteriaEdit::Days(days) => self.day = days,
            CriteriaEdit::Courses(courses) => self.course = courses,
            CriteriaEdit::Timezone(tz) => {
                self.timezone = if tz.is_empty() { None } else { Some(tz) };
            }
            CriteriaEdit::StartTime(text) => {
                self.start_time = super::query::parse_time_text(&text);
            }
            CriteriaEdit::EndTime(text) => {
                self.end_time = super::query::parse_time_text(&text);
            }
        }
    }
}

/// A single field change to [`SearchCriteria`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaEdit {
    Days(Vec<String>),
    Courses(Vec<String>),
    Timezone(String),
    StartTime(String),
    EndTime(String),
}

/// A teacher record as returned by the backend.
///
/// The backend owns this shape; only the name/contact fields are typed
/// and everything else is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body of a successful `/results` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub teachers: Vec<Teacher>,
}

/// Serializes times as "HH:MM" text, the format users type and the
/// query string carries.
mod time_text {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_some(&time.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text: Option<String> = Option::deserialize(deserializer)?;
        Ok(text
            .as_deref()
            .and_then(crate::search::query::parse_time_text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_round_trip_through_json() {
        let json = r#"{
            "day": ["Monday", "Wednesday"],
            "course": ["7"],
            "timezone": "UTC",
            "start_time": "09:00",
            "end_time": "17:30"
        }"#;

        let criteria: SearchCriteria = serde_json::from_str(json).unwrap();
        assert_eq!(criteria.day.len(), 2);
        assert_eq!(
            criteria.start_time,
            NaiveTime::from_hms_opt(9, 0, 0)
        );
        assert_eq!(criteria.end_time, NaiveTime::from_hms_opt(17, 30, 0));
    }

    #[test]
    fn test_unparsable_time_edit_leaves_field_unset() {
        let mut criteria = SearchCriteria::default();
        criteria.apply(CriteriaEdit::StartTime("09:00".to_string()));
        assert!(criteria.start_time.is_some());

        criteria.apply(CriteriaEdit::StartTime("soonish".to_string()));
        assert!(criteria.start_time.is_none());
    }

    #[test]
    fn test_teacher_preserves_unknown_fields() {
        let json = r#"{ "name": "Ada", "email": "ada@example.com", "rating": 4.9 }"#;
        let teacher: Teacher = serde_json::from_str(json).unwrap();
        assert_eq!(teacher.name.as_deref(), Some("Ada"));
        assert!(teacher.extra.contains_key("rating"));
    }
}
