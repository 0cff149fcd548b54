//! Static entity definitions: which fields each resource stores, which are required, and
//! which are stamped with a default at creation.

/// Default applied to a field that is absent when a record is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldDefault {
    /// Current date in the school's zone.
    CurrentDate,
    /// Current wall-clock time in the school's zone, 12-hour clock.
    CurrentTime,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    /// Wire name (camelCase, as clients send it).
    pub name: &'static str,
    pub required: bool,
    pub default: Option<FieldDefault>,
}

impl FieldSpec {
    const fn required(name: &'static str) -> Self {
        FieldSpec {
            name,
            required: true,
            default: None,
        }
    }

    const fn defaulted(name: &'static str, default: FieldDefault) -> Self {
        FieldSpec {
            name,
            required: false,
            default: Some(default),
        }
    }
}

#[derive(Debug)]
pub struct EntitySchema {
    /// Human-readable name used in messages ("Class schedule").
    pub label: &'static str,
    /// Store collection (one Postgres table per collection).
    pub collection: &'static str,
    /// Response key for one record.
    pub singular: &'static str,
    /// Response key for a list of records.
    pub plural: &'static str,
    pub fields: &'static [FieldSpec],
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }
}

pub static CLASS_SCHEDULE: EntitySchema = EntitySchema {
    label: "Class schedule",
    collection: "class_schedules",
    singular: "schedule",
    plural: "schedules",
    fields: &[
        FieldSpec::required("class"),
        FieldSpec::required("subject"),
        FieldSpec::required("startTime"),
        FieldSpec::required("endTime"),
        FieldSpec::required("day"),
        FieldSpec::required("period"),
    ],
};

pub static SUBJECT: EntitySchema = EntitySchema {
    label: "Subject",
    collection: "subjects",
    singular: "subject",
    plural: "subjects",
    fields: &[
        FieldSpec::required("class"),
        FieldSpec::required("subject"),
        FieldSpec::defaulted("date", FieldDefault::CurrentDate),
        FieldSpec::defaulted("time", FieldDefault::CurrentTime),
    ],
};

pub static ENQUIRY: EntitySchema = EntitySchema {
    label: "Enquiry",
    collection: "enquiries",
    singular: "enquiry",
    plural: "enquiries",
    fields: &[
        FieldSpec::required("name"),
        FieldSpec::required("contactNumber"),
        FieldSpec::required("email"),
        FieldSpec::required("enquiryRelated"),
    ],
};

/// Every entity served by the API; used to provision collections at startup.
pub static ALL_ENTITIES: [&EntitySchema; 3] = [&CLASS_SCHEDULE, &SUBJECT, &ENQUIRY];
