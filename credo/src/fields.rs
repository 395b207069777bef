//! The wizard's field sequence: identifiers, prompts, successor table, and validators.
//!
//! Each prompted field is one [`Field`] variant. The transition table is the pair of
//! `Field::FIRST` and [`Field::successor`]; validation is a pure function of the raw
//! input string ([`Field::validate`]). The derived `loan_percent_income` feature is
//! not a prompted field; it is computed when the record is assembled
//! ([`CollectedData::to_record`]).

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::error::AdvisorError;
use crate::record::{HomeOwnership, LoanGrade, LoanIntent, LoanRecord, PriorDefault};

/// Why an input was rejected. The display text is the user-facing re-prompt.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Input did not parse as the expected numeric type.
    #[error("Please enter a valid numeric {what}.")]
    NotNumeric { what: &'static str },
    /// Parsed, but fell outside the legal range.
    #[error("Please enter a {what} between {min} and {max}.")]
    OutOfRange {
        what: &'static str,
        min: i64,
        max: i64,
    },
    /// Parsed, but must be strictly positive.
    #[error("Please enter a positive {what}.")]
    NotPositive { what: &'static str },
    /// Not one of the legal codes for a categorical field.
    #[error("'{value}' is not a valid option. Please choose from: {}.", .allowed.join(", "))]
    NotInSet {
        value: String,
        allowed: &'static [&'static str],
    },
}

/// One validated answer, typed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldValue {
    Int(u64),
    Float(f64),
    Ownership(HomeOwnership),
    Intent(LoanIntent),
    Grade(LoanGrade),
    Flag(PriorDefault),
}

/// Identifier of one prompted field, in collection order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Age,
    Income,
    HomeOwnership,
    EmploymentLength,
    LoanIntent,
    LoanGrade,
    LoanAmount,
    InterestRate,
    PriorDefault,
    CreditHistoryLength,
}

impl Field {
    /// Where every new session starts.
    pub const FIRST: Field = Field::Age;

    /// The next field to collect; `None` after the terminal field.
    pub fn successor(self) -> Option<Field> {
        match self {
            Field::Age => Some(Field::Income),
            Field::Income => Some(Field::HomeOwnership),
            Field::HomeOwnership => Some(Field::EmploymentLength),
            Field::EmploymentLength => Some(Field::LoanIntent),
            Field::LoanIntent => Some(Field::LoanGrade),
            Field::LoanGrade => Some(Field::LoanAmount),
            Field::LoanAmount => Some(Field::InterestRate),
            Field::InterestRate => Some(Field::PriorDefault),
            Field::PriorDefault => Some(Field::CreditHistoryLength),
            Field::CreditHistoryLength => None,
        }
    }

    /// The question asked when the cursor enters this field.
    pub fn prompt(self) -> &'static str {
        match self {
            Field::Age => "What is your age?",
            Field::Income => "Great! Now, what is your annual income in dollars?",
            Field::HomeOwnership => {
                "What is your home ownership status? Please choose from: RENT, MORTGAGE, OWN, OTHER."
            }
            Field::EmploymentLength => "How many years have you been employed? (Enter a number.)",
            Field::LoanIntent => {
                "What is the purpose of the loan? Please choose from: MEDICAL, DEBTCONSOLIDATION, HOMEIMPROVEMENT, VENTURE, PERSONAL, EDUCATION."
            }
            Field::LoanGrade => "What is the loan grade? Please choose from: A, B, C, D, E, F, G.",
            Field::LoanAmount => "What is the requested loan amount in dollars?",
            Field::InterestRate => "What is the interest rate of the loan (as a percentage)?",
            Field::PriorDefault => "Do you have any defaults on file? (Y/N)",
            Field::CreditHistoryLength => "How many years of credit history do you have?",
        }
    }

    /// Validates raw user input for this field. Pure: parse to the target type, then
    /// check the range or membership constraint. Categorical input is normalized to
    /// uppercase by the domain enums' `FromStr`.
    pub fn validate(self, raw: &str) -> Result<FieldValue, ValidationError> {
        match self {
            Field::Age => int_in_range(raw, "age", 18, 100),
            Field::Income => positive_int(raw, "income amount"),
            Field::HomeOwnership => raw.parse::<HomeOwnership>().map(FieldValue::Ownership),
            Field::EmploymentLength => int_in_range(raw, "employment length in years", 0, 50),
            Field::LoanIntent => raw.parse::<LoanIntent>().map(FieldValue::Intent),
            Field::LoanGrade => raw.parse::<LoanGrade>().map(FieldValue::Grade),
            Field::LoanAmount => positive_int(raw, "loan amount"),
            Field::InterestRate => float_in_range(raw, "interest rate", 0, 100),
            Field::PriorDefault => raw.parse::<PriorDefault>().map(FieldValue::Flag),
            Field::CreditHistoryLength => int_in_range(raw, "credit history length in years", 0, 60),
        }
    }
}

impl fmt::Display for Field {
    /// The classifier's wire name for this field.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Age => "person_age",
            Field::Income => "person_income",
            Field::HomeOwnership => "person_home_ownership",
            Field::EmploymentLength => "person_emp_length",
            Field::LoanIntent => "loan_intent",
            Field::LoanGrade => "loan_grade",
            Field::LoanAmount => "loan_amnt",
            Field::InterestRate => "loan_int_rate",
            Field::PriorDefault => "cb_person_default_on_file",
            Field::CreditHistoryLength => "cb_person_cred_hist_length",
        };
        f.write_str(name)
    }
}

fn int_in_range(raw: &str, what: &'static str, min: i64, max: i64) -> Result<FieldValue, ValidationError> {
    let n: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotNumeric { what })?;
    if (min..=max).contains(&n) {
        Ok(FieldValue::Int(n as u64))
    } else {
        Err(ValidationError::OutOfRange { what, min, max })
    }
}

fn positive_int(raw: &str, what: &'static str) -> Result<FieldValue, ValidationError> {
    let n: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotNumeric { what })?;
    if n > 0 {
        Ok(FieldValue::Int(n as u64))
    } else {
        Err(ValidationError::NotPositive { what })
    }
}

fn float_in_range(raw: &str, what: &'static str, min: i64, max: i64) -> Result<FieldValue, ValidationError> {
    let x: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotNumeric { what })?;
    if x >= min as f64 && x <= max as f64 {
        Ok(FieldValue::Float(x))
    } else {
        Err(ValidationError::OutOfRange { what, min, max })
    }
}

/// The session's collected answers: field -> validated value.
///
/// Values only enter through [`Field::validate`], so the map never holds anything
/// that failed its validator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollectedData {
    values: BTreeMap<Field, FieldValue>,
}

impl CollectedData {
    pub fn insert(&mut self, field: Field, value: FieldValue) {
        self.values.insert(field, value);
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    fn int(&self, field: Field) -> Result<u64, AdvisorError> {
        match self.values.get(&field) {
            Some(FieldValue::Int(n)) => Ok(*n),
            _ => Err(AdvisorError::MissingField(field)),
        }
    }

    fn float(&self, field: Field) -> Result<f64, AdvisorError> {
        match self.values.get(&field) {
            Some(FieldValue::Float(x)) => Ok(*x),
            _ => Err(AdvisorError::MissingField(field)),
        }
    }

    /// Assembles the classifier record, computing the derived
    /// `loan_percent_income = loan_amnt / person_income * 100`.
    ///
    /// Errors with [`AdvisorError::MissingField`] if any prompted field is absent or
    /// mistyped; the dialog engine only calls this after the terminal field is stored.
    pub fn to_record(&self) -> Result<LoanRecord, AdvisorError> {
        let ownership = match self.values.get(&Field::HomeOwnership) {
            Some(FieldValue::Ownership(v)) => *v,
            _ => return Err(AdvisorError::MissingField(Field::HomeOwnership)),
        };
        let intent = match self.values.get(&Field::LoanIntent) {
            Some(FieldValue::Intent(v)) => *v,
            _ => return Err(AdvisorError::MissingField(Field::LoanIntent)),
        };
        let grade = match self.values.get(&Field::LoanGrade) {
            Some(FieldValue::Grade(v)) => *v,
            _ => return Err(AdvisorError::MissingField(Field::LoanGrade)),
        };
        let default_on_file = match self.values.get(&Field::PriorDefault) {
            Some(FieldValue::Flag(v)) => *v,
            _ => return Err(AdvisorError::MissingField(Field::PriorDefault)),
        };

        let income = self.int(Field::Income)?;
        let amount = self.int(Field::LoanAmount)?;

        Ok(LoanRecord {
            person_age: self.int(Field::Age)? as u32,
            person_income: income,
            person_home_ownership: ownership,
            person_emp_length: self.int(Field::EmploymentLength)? as u32,
            loan_intent: intent,
            loan_grade: grade,
            loan_amnt: amount,
            loan_int_rate: self.float(Field::InterestRate)?,
            cb_person_default_on_file: default_on_file,
            cb_person_cred_hist_length: self.int(Field::CreditHistoryLength)? as u32,
            loan_percent_income: amount as f64 / income as f64 * 100.0,
        })
    }
}
