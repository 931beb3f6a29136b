//! 申請表單的欄位規則。
//!
//! 每個欄位獨立檢查，沒有跨欄位規則；空白輸入視為「未填」而不是 0。

use crate::domain::model::{ApplicationProfile, FormInput, RiskTolerance};
use crate::utils::error::AdvisorError;
use serde::Serialize;
use std::fmt;

pub const MIN_AGE: f64 = 18.0;
pub const MAX_AGE: f64 = 80.0;
pub const MIN_INCOME: f64 = 1.0;
pub const MIN_DEPENDENTS: f64 = 0.0;
pub const MAX_DEPENDENTS: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Age,
    Income,
    Dependents,
    RiskTolerance,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Age,
        Field::Income,
        Field::Dependents,
        Field::RiskTolerance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::Income => "income",
            Field::Dependents => "dependents",
            Field::RiskTolerance => "riskTolerance",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Age => "Age",
            Field::Income => "Annual Income",
            Field::Dependents => "Number of Dependents",
            Field::RiskTolerance => "Risk Tolerance",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Per-field messages, in form order, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn for_field(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl From<ValidationErrors> for AdvisorError {
    fn from(errors: ValidationErrors) -> Self {
        AdvisorError::ValidationError {
            message: errors.to_string(),
        }
    }
}

struct NumberRule {
    field: Field,
    required: &'static str,
    min: (f64, &'static str),
    max: Option<(f64, &'static str)>,
}

const AGE_RULE: NumberRule = NumberRule {
    field: Field::Age,
    required: "Please enter your age",
    min: (MIN_AGE, "Age must be at least 18"),
    max: Some((MAX_AGE, "Age must be less than 80")),
};

const INCOME_RULE: NumberRule = NumberRule {
    field: Field::Income,
    required: "Please enter your income.",
    min: (MIN_INCOME, "Income must be greater than 0"),
    max: None,
};

const DEPENDENTS_RULE: NumberRule = NumberRule {
    field: Field::Dependents,
    required: "Please enter number of dependents.",
    min: (MIN_DEPENDENTS, "Number of dependents cannot be negative"),
    max: Some((MAX_DEPENDENTS, "Please enter a reasonable number")),
};

const RISK_TOLERANCE_REQUIRED: &str = "Please select your risk tolerance.";

impl NumberRule {
    fn check(&self, raw: Option<&str>) -> Result<f64, FieldError> {
        let value = parse_number(raw).ok_or_else(|| FieldError::new(self.field, self.required))?;

        let (min, min_message) = self.min;
        if value < min {
            return Err(FieldError::new(self.field, min_message));
        }
        if let Some((max, max_message)) = self.max {
            if value > max {
                return Err(FieldError::new(self.field, max_message));
            }
        }
        Ok(value)
    }
}

/// 空白、非數字或非有限值都當成未填
fn parse_number(raw: Option<&str>) -> Option<f64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn check_risk_tolerance(raw: Option<&str>) -> Result<RiskTolerance, FieldError> {
    raw.and_then(RiskTolerance::from_token)
        .ok_or_else(|| FieldError::new(Field::RiskTolerance, RISK_TOLERANCE_REQUIRED))
}

/// Checks all four fields and returns the profile, or every failing field.
pub fn validate(input: &FormInput) -> Result<ApplicationProfile, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let age = AGE_RULE.check(input.age.as_deref());
    let income = INCOME_RULE.check(input.income.as_deref());
    let dependents = DEPENDENTS_RULE.check(input.dependents.as_deref());
    let risk_tolerance = check_risk_tolerance(input.risk_tolerance.as_deref());

    match (age, income, dependents, risk_tolerance) {
        (Ok(age), Ok(income), Ok(dependents), Ok(risk_tolerance)) => Ok(ApplicationProfile {
            age,
            income,
            dependents,
            risk_tolerance,
        }),
        (age, income, dependents, risk_tolerance) => {
            for err in [age.err(), income.err(), dependents.err(), risk_tolerance.err()]
                .into_iter()
                .flatten()
            {
                errors.push(err);
            }
            Err(errors)
        }
    }
}
