//! The classifier's input record and its categorical domains.
//!
//! [`LoanRecord`] is the exact shape the external model expects: fixed field names and
//! order, uppercase categorical codes. The categorical enums parse case-insensitively
//! (user input is normalized on the way in) and display as the wire codes.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::fields::ValidationError;

macro_rules! categorical {
    ($(#[$doc:meta])* $name:ident { $($variant:ident => $code:literal),+ $(,)? }) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
        pub enum $name {
            $(#[serde(rename = $code)] $variant),+
        }

        impl $name {
            /// All legal wire codes, in declaration order.
            pub const CODES: &'static [&'static str] = &[$($code),+];

            pub fn code(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($code => Ok(Self::$variant),)+
                    _ => Err(ValidationError::NotInSet {
                        value: s.trim().to_string(),
                        allowed: Self::CODES,
                    }),
                }
            }
        }
    };
}

categorical! {
    /// Home ownership status.
    HomeOwnership {
        Rent => "RENT",
        Mortgage => "MORTGAGE",
        Own => "OWN",
        Other => "OTHER",
    }
}

categorical! {
    /// Purpose of the loan.
    LoanIntent {
        Medical => "MEDICAL",
        DebtConsolidation => "DEBTCONSOLIDATION",
        HomeImprovement => "HOMEIMPROVEMENT",
        Venture => "VENTURE",
        Personal => "PERSONAL",
        Education => "EDUCATION",
    }
}

categorical! {
    /// Loan grade, A (best) through G.
    LoanGrade {
        A => "A",
        B => "B",
        C => "C",
        D => "D",
        E => "E",
        F => "F",
        G => "G",
    }
}

categorical! {
    /// Prior default on file.
    PriorDefault {
        Yes => "Y",
        No => "N",
    }
}

/// Fully populated, validated input for the external classifier.
///
/// Field names and order match the model's training columns; do not reorder.
#[derive(Clone, Debug, Serialize)]
pub struct LoanRecord {
    pub person_age: u32,
    pub person_income: u64,
    pub person_home_ownership: HomeOwnership,
    pub person_emp_length: u32,
    pub loan_intent: LoanIntent,
    pub loan_grade: LoanGrade,
    pub loan_amnt: u64,
    pub loan_int_rate: f64,
    pub cb_person_default_on_file: PriorDefault,
    pub cb_person_cred_hist_length: u32,
    /// Derived: `loan_amnt / person_income * 100`. Never collected directly.
    pub loan_percent_income: f64,
}

/// Binary outcome of one classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskLabel {
    High,
    Low,
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLabel::High => f.write_str("High Default Risk"),
            RiskLabel::Low => f.write_str("Low Default Risk"),
        }
    }
}
