use super::Resource;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactInformation {
    pub email: String,
    pub phone_number: String,
}

/// A stored teacher record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub contact_information: ContactInformation,
}

/// Body of `POST /teachers`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct NewTeacher {
    pub name: String,
    pub subject: String,
    pub contact_information: ContactInformation,
}

/// Body of `PUT /teachers/{id}`. A supplied `contactInformation` replaces the stored one whole.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TeacherPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_information: Option<ContactInformation>,
}

impl Resource for Teacher {
    type Input = NewTeacher;
    type Patch = TeacherPatch;

    const COLLECTION: &'static str = "teachers";
    const KEY: &'static str = "teacher";
    const LABEL: &'static str = "Teacher";
    const TAG: &'static str = "Teachers";
    const FETCH_FAILED: &'static str = "Failed to fetch Teacher";

    fn id(&self) -> &str {
        &self.id
    }
}
