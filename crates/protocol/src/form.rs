use serde::{Deserialize, Serialize};
use std::fmt;

use crate::vitals::{bmi, coerce_number};
use crate::{PredictRequest, WireNumber};

/// One named entry of the intake form. The serialized name is the wire name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Age,
    Gender,
    Height,
    Weight,
    ApHi,
    ApLo,
    Cholesterol,
    Gluc,
    Smoke,
    Alco,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

const GENDER_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "2", label: "Male" },
    SelectOption { value: "1", label: "Female" },
];

const LEVEL_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "1", label: "Normal" },
    SelectOption { value: "2", label: "Above Normal" },
    SelectOption { value: "3", label: "Well Above Normal" },
];

const NO_YES_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "0", label: "No" },
    SelectOption { value: "1", label: "Yes" },
];

const YES_NO_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "1", label: "Yes" },
    SelectOption { value: "0", label: "No" },
];

impl Field {
    /// Form order, top to bottom.
    pub const ALL: [Field; 11] = [
        Field::Age,
        Field::Gender,
        Field::Height,
        Field::Weight,
        Field::ApHi,
        Field::ApLo,
        Field::Cholesterol,
        Field::Gluc,
        Field::Smoke,
        Field::Alco,
        Field::Active,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::Gender => "gender",
            Field::Height => "height",
            Field::Weight => "weight",
            Field::ApHi => "ap_hi",
            Field::ApLo => "ap_lo",
            Field::Cholesterol => "cholesterol",
            Field::Gluc => "gluc",
            Field::Smoke => "smoke",
            Field::Alco => "alco",
            Field::Active => "active",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Age => "Age (Years)",
            Field::Gender => "Gender",
            Field::Height => "Height (cm)",
            Field::Weight => "Weight (kg)",
            Field::ApHi => "Systolic (Hi)",
            Field::ApLo => "Diastolic (Lo)",
            Field::Cholesterol => "Cholesterol",
            Field::Gluc => "Glucose",
            Field::Smoke => "Smoke?",
            Field::Alco => "Alcohol?",
            Field::Active => "Active?",
        }
    }

    /// Hint shown while a numeric field is still empty.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Field::Age => Some("50"),
            Field::Height => Some("175"),
            Field::Weight => Some("75"),
            Field::ApHi => Some("120"),
            Field::ApLo => Some("80"),
            _ => None,
        }
    }

    /// Selector choices in display order; empty for free-text fields.
    pub fn options(self) -> &'static [SelectOption] {
        match self {
            Field::Gender => GENDER_OPTIONS,
            Field::Cholesterol | Field::Gluc => LEVEL_OPTIONS,
            Field::Smoke | Field::Alco => NO_YES_OPTIONS,
            Field::Active => YES_NO_OPTIONS,
            _ => &[],
        }
    }

    pub fn is_select(self) -> bool {
        !self.options().is_empty()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "2",
            Gender::Female => "1",
        }
    }
}

/// Cholesterol and glucose bands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Level {
    Normal,
    AboveNormal,
    WellAboveNormal,
}

impl Level {
    pub fn code(self) -> &'static str {
        match self {
            Level::Normal => "1",
            Level::AboveNormal => "2",
            Level::WellAboveNormal => "3",
        }
    }
}

pub fn flag_code(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Raw form values, held as text exactly as entered until submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssessmentForm {
    pub age: String,
    pub gender: String,
    pub height: String,
    pub weight: String,
    pub ap_hi: String,
    pub ap_lo: String,
    pub cholesterol: String,
    pub gluc: String,
    pub smoke: String,
    pub alco: String,
    pub active: String,
}

impl Default for AssessmentForm {
    fn default() -> Self {
        Self {
            age: String::new(),
            gender: Gender::Female.code().to_string(),
            height: String::new(),
            weight: String::new(),
            ap_hi: String::new(),
            ap_lo: String::new(),
            cholesterol: Level::Normal.code().to_string(),
            gluc: Level::Normal.code().to_string(),
            smoke: flag_code(false).to_string(),
            alco: flag_code(false).to_string(),
            active: flag_code(true).to_string(),
        }
    }
}

impl AssessmentForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Age => &self.age,
            Field::Gender => &self.gender,
            Field::Height => &self.height,
            Field::Weight => &self.weight,
            Field::ApHi => &self.ap_hi,
            Field::ApLo => &self.ap_lo,
            Field::Cholesterol => &self.cholesterol,
            Field::Gluc => &self.gluc,
            Field::Smoke => &self.smoke,
            Field::Alco => &self.alco,
            Field::Active => &self.active,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Age => &mut self.age,
            Field::Gender => &mut self.gender,
            Field::Height => &mut self.height,
            Field::Weight => &mut self.weight,
            Field::ApHi => &mut self.ap_hi,
            Field::ApLo => &mut self.ap_lo,
            Field::Cholesterol => &mut self.cholesterol,
            Field::Gluc => &mut self.gluc,
            Field::Smoke => &mut self.smoke,
            Field::Alco => &mut self.alco,
            Field::Active => &mut self.active,
        }
    }

    /// Replaces one field's value; every other field is left as is.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Label of the currently selected option, if the field is a selector and
    /// its value is one of the offered choices.
    pub fn selected_label(&self, field: Field) -> Option<&'static str> {
        let current = self.get(field);
        field
            .options()
            .iter()
            .find(|option| option.value == current)
            .map(|option| option.label)
    }

    /// Moves a selector to the neighbouring option, wrapping at either end.
    /// Free-text fields are left alone.
    pub fn cycle_option(&mut self, field: Field, forward: bool) {
        let options = field.options();
        if options.is_empty() {
            return;
        }
        let current = self.get(field);
        let next = match options.iter().position(|option| option.value == current) {
            Some(index) if forward => (index + 1) % options.len(),
            Some(index) => (index + options.len() - 1) % options.len(),
            None => 0,
        };
        self.set(field, options[next].value);
    }

    /// Coerces every field and derives BMI, producing the request body.
    pub fn to_request(&self) -> PredictRequest {
        let number = |field: Field| WireNumber(coerce_number(self.get(field)));
        let height = coerce_number(&self.height);
        let weight = coerce_number(&self.weight);
        PredictRequest {
            age: number(Field::Age),
            gender: number(Field::Gender),
            height: WireNumber(height),
            weight: WireNumber(weight),
            ap_hi: number(Field::ApHi),
            ap_lo: number(Field::ApLo),
            cholesterol: number(Field::Cholesterol),
            gluc: number(Field::Gluc),
            smoke: number(Field::Smoke),
            alco: number(Field::Alco),
            active: number(Field::Active),
            bmi: WireNumber(bmi(height, weight)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn filled() -> AssessmentForm {
        AssessmentForm::default()
            .with(Field::Age, "50")
            .with(Field::Height, "175")
            .with(Field::Weight, "75")
            .with(Field::ApHi, "120")
            .with(Field::ApLo, "80")
    }

    #[test]
    fn defaults_match_the_page() {
        let form = AssessmentForm::default();
        assert_eq!(form.gender, "1");
        assert_eq!(form.cholesterol, "1");
        assert_eq!(form.gluc, "1");
        assert_eq!(form.smoke, "0");
        assert_eq!(form.alco, "0");
        assert_eq!(form.active, "1");
        assert!(form.age.is_empty());
        assert!(form.height.is_empty());
    }

    #[test]
    fn setting_one_field_keeps_the_rest() {
        let before = filled();
        let mut after = before.clone();
        after.set(Field::Age, "61");
        assert_eq!(after.get(Field::Age), "61");
        for field in Field::ALL.into_iter().filter(|field| *field != Field::Age) {
            assert_eq!(after.get(field), before.get(field), "{field}");
        }
    }

    #[test]
    fn request_has_all_twelve_numeric_fields() {
        let body = serde_json::to_value(filled().to_request()).expect("serialize");
        let object = body.as_object().expect("object");
        assert_eq!(object.len(), 12);
        for (name, value) in object {
            assert!(value.is_number(), "{name} = {value}");
        }
        assert_eq!(body["gender"], json!(1));
        assert_eq!(body["age"], json!(50));
        assert_eq!(body["active"], json!(1));
        let bmi = body["bmi"].as_f64().expect("bmi");
        assert!((bmi - 24.49).abs() < 0.01);
    }

    #[test]
    fn wire_names_line_up_with_request_keys() {
        let body = serde_json::to_value(filled().to_request()).expect("serialize");
        for field in Field::ALL {
            assert!(body.get(field.wire_name()).is_some(), "{field}");
        }
    }

    #[test]
    fn unvalidated_input_is_forwarded() {
        let form = filled()
            .with(Field::Height, "0")
            .with(Field::ApHi, "high");
        let body = serde_json::to_value(form.to_request()).expect("serialize");
        assert_eq!(body.as_object().expect("object").len(), 12);
        assert_eq!(body["bmi"], Value::Null);
        assert_eq!(body["ap_hi"], Value::Null);
        assert_eq!(body["height"], json!(0));
    }

    #[test]
    fn cycling_wraps_around() {
        let mut form = AssessmentForm::default();
        form.cycle_option(Field::Cholesterol, true);
        assert_eq!(form.selected_label(Field::Cholesterol), Some("Above Normal"));
        form.cycle_option(Field::Cholesterol, true);
        form.cycle_option(Field::Cholesterol, true);
        assert_eq!(form.cholesterol, "1");
        form.cycle_option(Field::Cholesterol, false);
        assert_eq!(form.cholesterol, "3");

        form.cycle_option(Field::Gender, true);
        assert_eq!(form.selected_label(Field::Gender), Some("Male"));

        form.cycle_option(Field::Age, true);
        assert!(form.age.is_empty());
    }
}
