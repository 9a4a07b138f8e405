use super::Resource;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use utoipa::ToSchema;

// Numbers are echoed as sent: `88` stays `88`, `88.5` stays `88.5`.
fn zero() -> Number {
    Number::from(0)
}

/// A stored student record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: i64,
    #[serde(default)]
    pub gender: String,
    #[serde(default = "zero")]
    #[schema(value_type = f64)]
    pub marks: Number,
    #[serde(default = "zero")]
    #[schema(value_type = f64)]
    pub attendance: Number,
    #[serde(default)]
    pub grade: String,
}

/// Body of `POST /students`. Missing fields default to empty / zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub age: i64,
    pub grade: String,
    pub gender: String,
    #[schema(value_type = f64)]
    pub marks: Number,
    #[schema(value_type = f64)]
    pub attendance: Number,
}

impl Default for NewStudent {
    fn default() -> Self {
        NewStudent {
            name: String::new(),
            age: 0,
            grade: String::new(),
            gender: String::new(),
            marks: zero(),
            attendance: zero(),
        }
    }
}

/// Body of `PUT /students/{id}`. Only supplied fields are written.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub marks: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub attendance: Option<Number>,
}

impl Resource for Student {
    type Input = NewStudent;
    type Patch = StudentPatch;

    const COLLECTION: &'static str = "students";
    const KEY: &'static str = "student";
    const LABEL: &'static str = "Student";
    const TAG: &'static str = "Students";
    const FETCH_FAILED: &'static str = "Failed to fetch student";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_student_defaults_missing_fields() {
        let input: NewStudent = serde_json::from_value(json!({ "name": "Asha" })).unwrap();
        assert_eq!(input.name, "Asha");
        assert_eq!(input.age, 0);
        assert_eq!(input.grade, "");
        assert_eq!(input.marks, Number::from(0));
    }

    #[test]
    fn new_student_rejects_wrong_types() {
        let err = serde_json::from_value::<NewStudent>(json!({ "age": "fourteen" }));
        assert!(err.is_err());
    }

    #[test]
    fn patch_serializes_only_supplied_fields() {
        let patch: StudentPatch = serde_json::from_value(json!({ "marks": 95 })).unwrap();
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({ "marks": 95 }));
    }

    #[test]
    fn numbers_keep_the_form_they_were_sent_in() {
        let input: NewStudent = serde_json::from_value(json!({ "marks": 88, "attendance": 92.5 })).unwrap();
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["marks"].to_string(), "88");
        assert_eq!(value["attendance"].to_string(), "92.5");
    }

    #[test]
    fn non_numeric_marks_are_rejected() {
        assert!(serde_json::from_value::<NewStudent>(json!({ "marks": "high" })).is_err());
    }

    #[test]
    fn patch_treats_null_as_absent() {
        let patch: StudentPatch = serde_json::from_value(json!({ "name": null })).unwrap();
        assert_eq!(patch, StudentPatch::default());
    }

    #[test]
    fn stored_student_uses_underscore_id() {
        let student = Student {
            id: "abc".into(),
            name: "Asha".into(),
            age: 14,
            gender: "F".into(),
            marks: Number::from(88),
            attendance: Number::from(92),
            grade: "9".into(),
        };
        let value = serde_json::to_value(&student).unwrap();
        assert_eq!(value["_id"], "abc");
        assert!(value.get("id").is_none());
    }
}
